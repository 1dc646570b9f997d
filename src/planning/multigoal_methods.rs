//! `m_split_multigoal`: the generic, opt-in baseline multigoal-splitting
//! method (spec §4.3.7). Not auto-registered — a domain author calls
//! `domain.declare_multigoal_method("m_split_multigoal", m_split_multigoal)`
//! to opt in.

use super::verification::goals_not_achieved;
use crate::core::{Multigoal, PlanItem, State, TodoList};

/// Emit one `Unigoal` per unachieved `(var, arg, val)` binding, in
/// insertion order, followed by the multigoal itself so the planner loops
/// on it until every conjunct holds simultaneously. Already-satisfied
/// multigoals return `Some(vec![])`.
///
/// This is intentionally naive: it imposes no ordering heuristic over
/// which unigoal to tackle first, and is documented (spec §4.3.7) as a
/// baseline meant to be replaced by a domain-specific method when
/// ordering matters (e.g. the blocks-world "move to table before
/// stacking" heuristic in `demos::blocks_world`).
pub fn m_split_multigoal(state: &State, multigoal: &Multigoal) -> Option<TodoList> {
    let unmet = goals_not_achieved(state, multigoal);
    if unmet.is_empty() {
        return Some(vec![]);
    }

    let mut todo = Vec::new();
    for (var_name, arg, value) in multigoal.to_unigoals() {
        if unmet
            .get(&var_name)
            .is_some_and(|args| args.contains_key(&arg))
        {
            todo.push(PlanItem::unigoal(var_name, arg, value));
        }
    }
    todo.push(PlanItem::multigoal(multigoal.clone()));
    Some(todo)
}
