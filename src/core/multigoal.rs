//! A conjunctive goal: the same `var_name -> arg -> value` shape as `State`,
//! read as "every listed binding must hold in the target state."
//!
//! Both levels of the binding table are `IndexMap`, not
//! `std::collections::HashMap`: `m_split_multigoal` (and any domain-specific
//! splitter built the same way) walks `to_unigoals()` in declaration order,
//! and a caller relies on that order to resolve one binding before the next
//! when two goals share a variable — e.g. moving block `b` before block `c`
//! under the `loc` variable. A plain `HashMap` for either level would make
//! that walk iterate in an arbitrary, run-dependent order instead.

use super::StateValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Multigoal {
    pub name: String,
    bindings: IndexMap<String, IndexMap<String, StateValue>>,
    copy_counter: usize,
}

impl Multigoal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: IndexMap::new(),
            copy_counter: 0,
        }
    }

    pub fn set_goal(&mut self, var_name: impl Into<String>, arg: impl Into<String>, value: StateValue) {
        self.bindings.entry(var_name.into()).or_default().insert(arg.into(), value);
    }

    pub fn get_goal(&self, var_name: &str, arg: &str) -> Option<&StateValue> {
        self.bindings.get(var_name)?.get(arg)
    }

    pub fn has_goal_var(&self, var_name: &str) -> bool {
        self.bindings.contains_key(var_name)
    }

    pub fn has_goal_arg(&self, var_name: &str, arg: &str) -> bool {
        self.bindings.get(var_name).is_some_and(|bound| bound.contains_key(arg))
    }

    /// A fresh, independently-mutable snapshot, named either explicitly or
    /// by appending a counter.
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

    pub fn is_satisfied_by(&self, state: &crate::core::State) -> bool {
        self.bindings.iter().all(|(var_name, goal_map)| {
            goal_map
                .iter()
                .all(|(arg, desired)| state.satisfies_unigoal(var_name, arg, desired))
        })
    }

    /// Every `(var, arg)` binding this goal names that `state` doesn't yet
    /// match. Keyed by `HashMap` here — unlike `to_unigoals`, nothing reads
    /// this result in order, only by membership and value.
    pub fn unsatisfied_goals(&self, state: &crate::core::State) -> HashMap<String, HashMap<String, StateValue>> {
        let mut unsatisfied: HashMap<String, HashMap<String, StateValue>> = HashMap::new();
        for (var_name, goal_map) in &self.bindings {
            for (arg, desired) in goal_map {
                if !state.satisfies_unigoal(var_name, arg, desired) {
                    unsatisfied.entry(var_name.clone()).or_default().insert(arg.clone(), desired.clone());
                }
            }
        }
        unsatisfied
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.values().all(|goal_map| goal_map.is_empty())
    }

    pub fn goal_count(&self) -> usize {
        self.bindings.values().map(|goal_map| goal_map.len()).sum()
    }

    pub fn from_unigoals(name: impl Into<String>, unigoals: Vec<(String, String, StateValue)>) -> Self {
        let mut goal = Self::new(name);
        for (var_name, arg, value) in unigoals {
            goal.set_goal(var_name, arg, value);
        }
        goal
    }

    /// Flatten back into individual `(var, arg, val)` unigoals, in the
    /// order the bindings were declared — the property `m_split_multigoal`
    /// depends on to resolve conjuncts one at a time in a stable order.
    pub fn to_unigoals(&self) -> Vec<(String, String, StateValue)> {
        self.bindings
            .iter()
            .flat_map(|(var_name, goal_map)| {
                goal_map
                    .iter()
                    .map(move |(arg, value)| (var_name.clone(), arg.clone(), value.clone()))
            })
            .collect()
    }
}

impl std::fmt::Display for Multigoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Multigoal {}>", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;

    #[test]
    fn a_fresh_multigoal_has_no_bindings() {
        let goal = Multigoal::new("g0");
        assert_eq!(goal.name, "g0");
        assert!(goal.is_empty());
        assert_eq!(goal.goal_count(), 0);
    }

    #[test]
    fn goals_are_looked_up_by_variable_then_argument() {
        let mut goal = Multigoal::new("g0");
        goal.set_goal("loc", "alice", "park".into());
        goal.set_goal("loc", "bob", "home".into());
        goal.set_goal("cash", "alice", 50.into());

        assert_eq!(goal.get_goal("loc", "alice"), Some(&"park".into()));
        assert_eq!(goal.get_goal("loc", "bob"), Some(&"home".into()));
        assert_eq!(goal.get_goal("loc", "charlie"), None);

        assert!(goal.has_goal_var("loc"));
        assert!(goal.has_goal_arg("loc", "alice"));
        assert!(!goal.has_goal_arg("loc", "charlie"));
        assert!(!goal.has_goal_var("nonexistent"));

        assert_eq!(goal.goal_count(), 3);
        assert!(!goal.is_empty());
    }

    #[test]
    fn satisfaction_requires_every_conjunct_to_hold() {
        let mut goal = Multigoal::new("g0");
        goal.set_goal("loc", "alice", "park".into());
        goal.set_goal("loc", "bob", "home".into());

        let mut state = State::new("s0");
        state.set_var("loc", "alice", "park".into());
        state.set_var("loc", "bob", "home".into());
        assert!(goal.is_satisfied_by(&state));

        state.set_var("loc", "alice", "store".into());
        assert!(!goal.is_satisfied_by(&state));

        let unsatisfied = goal.unsatisfied_goals(&state);
        assert_eq!(unsatisfied.len(), 1);
        assert_eq!(unsatisfied["loc"]["alice"], crate::core::string_value("park"));
    }

    #[test]
    fn copying_without_a_name_appends_a_counter_each_time() {
        let mut goal = Multigoal::new("original");
        goal.set_goal("loc", "alice", "park".into());

        let copy1 = goal.copy(None);
        assert_eq!(copy1.name, "original_copy_0");
        assert_eq!(copy1.get_goal("loc", "alice"), Some(&"park".into()));

        let copy2 = goal.copy(Some("checkpoint".to_string()));
        assert_eq!(copy2.name, "checkpoint");
    }

    #[test]
    fn to_unigoals_preserves_declaration_order_within_a_shared_variable() {
        let goal = Multigoal::from_unigoals(
            "g0",
            vec![
                ("loc".to_string(), "b".to_string(), "room2".into()),
                ("loc".to_string(), "c".to_string(), "room3".into()),
                ("cash".to_string(), "alice".to_string(), 50.into()),
            ],
        );
        assert_eq!(goal.goal_count(), 3);

        let unigoals = goal.to_unigoals();
        assert_eq!(
            unigoals,
            vec![
                ("loc".to_string(), "b".to_string(), "room2".into()),
                ("loc".to_string(), "c".to_string(), "room3".into()),
                ("cash".to_string(), "alice".to_string(), 50.into()),
            ]
        );
    }
}
