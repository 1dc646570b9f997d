//! `_m_verify_g`/`_m_verify_mg`: the built-in post-condition checks the
//! planner injects after a unigoal/multigoal method succeeds (spec §4.3.5).
//!
//! Both share the `Option<TodoList>` convention every method uses:
//! `Some(vec![])` is success (no further subtasks), `None` is the Failure
//! sentinel that sends the caller back to try its next alternative.
//! A verification failure is therefore an ordinary method-inapplicable
//! event, not a fatal error — it triggers backtracking past the method
//! that claimed (wrongly) to have achieved the goal.

use super::verbose_print;
use crate::core::{Multigoal, State, StateValue, TodoList};
use std::collections::HashMap;

/// Every `(var_name, arg)` binding in `multigoal` whose value in `state`
/// doesn't match. Pure, no side effects (spec §4.3.6).
pub fn goals_not_achieved(
    state: &State,
    multigoal: &Multigoal,
) -> HashMap<String, HashMap<String, StateValue>> {
    multigoal.unsatisfied_goals(state)
}

pub fn verify_unigoal(
    state: &State,
    method_name: &str,
    var_name: &str,
    arg: &str,
    desired: &StateValue,
    depth: usize,
) -> Option<TodoList> {
    if state.satisfies_unigoal(var_name, arg, desired) {
        Some(vec![])
    } else {
        verbose_print(
            1,
            "SEEK",
            &format!(
                "depth {depth}: method '{method_name}' did not achieve {var_name}[{arg}] = {desired}"
            ),
        );
        None
    }
}

pub fn verify_multigoal(
    state: &State,
    method_name: &str,
    goal: &Multigoal,
    depth: usize,
) -> Option<TodoList> {
    let unmet = goals_not_achieved(state, goal);
    if unmet.is_empty() {
        Some(vec![])
    } else {
        verbose_print(
            1,
            "SEEK",
            &format!(
                "depth {depth}: method '{method_name}' did not achieve multigoal '{}': {unmet:?}",
                goal.name
            ),
        );
        None
    }
}
