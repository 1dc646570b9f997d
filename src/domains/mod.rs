//! Reusable helpers for building demo domains: rigid-relation lookups,
//! distance tables, and `StateValue` accessors. None of this is part of
//! the planner's public contract — domain authors are free to ignore it
//! and work with `StateValue`/`serde_json::Value` directly.

use crate::core::{State, StateValue};
use std::collections::HashMap;

/// Check whether `variable` belongs to the named rigid type.
pub fn is_a(variable: &str, var_type: &str, rigid_types: &HashMap<String, Vec<String>>) -> bool {
    rigid_types
        .get(var_type)
        .is_some_and(|type_list| type_list.iter().any(|v| v == variable))
}

/// Symmetric lookup into a `(from, to) -> distance` table.
pub fn distance(x: &str, y: &str, distances: &HashMap<(String, String), f64>) -> Option<f64> {
    distances
        .get(&(x.to_string(), y.to_string()))
        .or_else(|| distances.get(&(y.to_string(), x.to_string())))
        .copied()
}

/// A simple fixed-plus-per-distance taxi fare model used by the travel demo.
pub fn taxi_rate(dist: f64) -> f64 {
    1.5 + 0.5 * dist
}

pub fn state_value_as_string(value: &StateValue) -> Option<String> {
    match value {
        StateValue::String(s) => Some(s.clone()),
        _ => None,
    }
}

pub fn state_value_as_f64(value: &StateValue) -> Option<f64> {
    match value {
        StateValue::Number(n) => n.as_f64(),
        _ => None,
    }
}

pub fn state_value_as_i64(value: &StateValue) -> Option<i64> {
    match value {
        StateValue::Number(n) => n.as_i64(),
        _ => None,
    }
}

pub fn state_value_as_bool(value: &StateValue) -> Option<bool> {
    match value {
        StateValue::Bool(b) => Some(*b),
        _ => None,
    }
}

pub fn state_var_equals(state: &State, var_name: &str, arg: &str, expected: &StateValue) -> bool {
    state.get_var(var_name, arg) == Some(expected)
}

pub fn get_state_var_string(state: &State, var_name: &str, arg: &str) -> Option<String> {
    state.get_var(var_name, arg).and_then(state_value_as_string)
}

pub fn get_state_var_f64(state: &State, var_name: &str, arg: &str) -> Option<f64> {
    state.get_var(var_name, arg).and_then(state_value_as_f64)
}

pub fn get_state_var_i64(state: &State, var_name: &str, arg: &str) -> Option<i64> {
    state.get_var(var_name, arg).and_then(state_value_as_i64)
}

pub fn get_state_var_bool(state: &State, var_name: &str, arg: &str) -> Option<bool> {
    state.get_var(var_name, arg).and_then(state_value_as_bool)
}
