//! A search-node snapshot: `var_name -> arg -> value` bindings for one point
//! in the planner's branching exploration.
//!
//! The planner clones a `State` every time it tries an action or a method
//! alternative, so cloning has to be cheap and has to leave sibling
//! branches untouched — no branch may observe a mutation made by another.
//! Plain value semantics (derive `Clone`, no shared interior mutability)
//! gets this for free; the cost is an allocation per clone, which is the
//! trade the search already makes everywhere else (`Plan`, `TodoList`).

use super::StateValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    bindings: IndexMap<String, HashMap<String, StateValue>>,
    copy_counter: usize,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: IndexMap::new(),
            copy_counter: 0,
        }
    }

    pub fn set_var(&mut self, var_name: impl Into<String>, arg: impl Into<String>, value: StateValue) {
        self.bindings.entry(var_name.into()).or_default().insert(arg.into(), value);
    }

    pub fn get_var(&self, var_name: &str, arg: &str) -> Option<&StateValue> {
        self.bindings.get(var_name)?.get(arg)
    }

    pub fn has_var(&self, var_name: &str) -> bool {
        self.bindings.contains_key(var_name)
    }

    pub fn has_var_arg(&self, var_name: &str, arg: &str) -> bool {
        self.bindings.get(var_name).is_some_and(|bound| bound.contains_key(arg))
    }

    /// The full `arg -> value` table for one variable — e.g. every block's
    /// `clear` flag at once, which `demos::blocks_world` scans to find a
    /// movable block without hardcoding a block-name list.
    pub fn get_var_map(&self, var_name: &str) -> Option<&HashMap<String, StateValue>> {
        self.bindings.get(var_name)
    }

    /// A fresh, independently-mutable snapshot, named either explicitly or
    /// by appending a counter so repeated copies of the same state don't
    /// collide in trace output.
    pub fn copy(&self, new_name: Option<String>) -> Self {
        let mut copy = self.clone();
        match new_name {
            Some(name) => copy.name = name,
            None => {
                copy.name = format!("{}_copy_{}", self.name, self.copy_counter);
                copy.copy_counter += 1;
            }
        }
        copy
    }

    /// Does this state already bind `var_name[arg]` to `desired_value`?
    /// The question every unigoal refiner asks before consulting a method.
    pub fn satisfies_unigoal(&self, var_name: &str, arg: &str, desired_value: &StateValue) -> bool {
        self.get_var(var_name, arg) == Some(desired_value)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<State {}>", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_fresh_state_carries_its_name_and_no_bindings() {
        let state = State::new("initial");
        assert_eq!(state.name, "initial");
        assert!(!state.has_var("loc"));
    }

    #[test]
    fn bindings_are_looked_up_by_variable_then_argument() {
        let mut state = State::new("s0");
        state.set_var("loc", "alice", "home".into());
        state.set_var("loc", "bob", "park".into());
        state.set_var("cash", "alice", 20.into());

        assert_eq!(state.get_var("loc", "alice"), Some(&"home".into()));
        assert_eq!(state.get_var("loc", "bob"), Some(&"park".into()));
        assert_eq!(state.get_var("cash", "alice"), Some(&20.into()));
        assert_eq!(state.get_var("loc", "nobody"), None);

        assert!(state.has_var("loc"));
        assert!(state.has_var_arg("loc", "alice"));
        assert!(!state.has_var_arg("loc", "nobody"));
        assert!(!state.has_var("unknown_var"));
    }

    #[test]
    fn copying_without_a_name_appends_a_counter_each_time() {
        let mut state = State::new("original");
        state.set_var("loc", "alice", "home".into());

        let first = state.copy(None);
        assert_eq!(first.name, "original_copy_0");
        assert_eq!(first.get_var("loc", "alice"), Some(&"home".into()));

        let second = state.copy(None);
        assert_eq!(second.name, "original_copy_1");

        let named = state.copy(Some("checkpoint".to_string()));
        assert_eq!(named.name, "checkpoint");
    }

    #[test]
    fn unigoal_satisfaction_checks_the_exact_value() {
        let mut state = State::new("s0");
        state.set_var("loc", "alice", "home".into());

        assert!(state.satisfies_unigoal("loc", "alice", &"home".into()));
        assert!(!state.satisfies_unigoal("loc", "alice", &"park".into()));
        assert!(!state.satisfies_unigoal("loc", "bob", &"home".into()));
    }

    #[test]
    fn get_var_map_exposes_every_binding_for_one_variable() {
        let mut state = State::new("s0");
        state.set_var("clear", "a", true.into());
        state.set_var("clear", "b", false.into());

        let clear = state.get_var_map("clear").unwrap();
        assert_eq!(clear.len(), 2);
        assert_eq!(clear.get("a"), Some(&true.into()));
        assert!(state.get_var_map("nonexistent").is_none());
    }
}
