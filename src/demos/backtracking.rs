//! A minimal domain whose sole purpose is exercising backtracking across
//! declared method order: each `put_it` task has a method that always
//! fails, one that sets the wrong value, and one that succeeds, exactly
//! spec §8 scenario 4's shape but with three alternatives instead of two
//! so exhausting two failures before success is visible in a trace.

use crate::core::{string_value, Domain, PlanItem, State, StateValue};
use crate::error::Result;

pub fn create_backtracking_domain() -> Result<Domain> {
    let mut domain = Domain::new("backtracking");

    domain.declare_action("set_flag", |state: &mut State, args: &[StateValue]| {
        let value = args.first()?.as_str()?;
        // "__unreachable__" models a value no real plan should ever try to
        // set; treating it as a failing precondition lets m_wrong below
        // demonstrate a failure surfacing from the action, not the method.
        if value == "__unreachable__" {
            return None;
        }
        state.set_var("flag", "f", string_value(value));
        Some(state.clone())
    })?;

    // m_err: the method itself refuses (models a precondition that never holds).
    domain.declare_task_method("put_it", "m_err", |_state: &State, _args: &[StateValue]| None)?;

    // m_wrong: succeeds, but at the action level — its action has a bad
    // precondition and fails, so the task-level method's own return value
    // (Some(subtasks)) isn't the source of the backtrack; the subsequent
    // action application is.
    domain.declare_task_method("put_it", "m_wrong", |_state: &State, args: &[StateValue]| {
        let _ = args.first()?.as_str()?;
        Some(vec![PlanItem::action("set_flag", vec![string_value("__unreachable__")])])
    })?;

    domain.declare_task_method("put_it", "m_right", |_state: &State, args: &[StateValue]| {
        let value = args.first()?.as_str()?.to_string();
        Some(vec![PlanItem::action("set_flag", vec![string_value(value)])])
    })?;

    Ok(domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::PlannerBuilder;

    #[test]
    fn planner_exhausts_failing_methods_before_the_one_that_works() {
        let planner = PlannerBuilder::new().with_domain(create_backtracking_domain().unwrap()).build().unwrap();
        let plan = planner
            .find_plan(State::new("s0"), vec![PlanItem::task("put_it", vec![string_value("done")])])
            .unwrap()
            .unwrap();
        assert_eq!(plan, vec![PlanItem::action("set_flag", vec![string_value("done")])]);
    }

    #[test]
    fn declaration_order_determines_which_plan_is_returned() {
        // Re-declaring in a domain where only m_right exists still
        // succeeds — order changes *which* plan, never *whether* one exists.
        let mut domain = Domain::new("backtracking_reordered");
        domain
            .declare_action("set_flag", |state, args| {
                let value = args.first()?.as_str()?;
                state.set_var("flag", "f", string_value(value));
                Some(state.clone())
            })
            .unwrap();
        domain
            .declare_task_method("put_it", "m_right", |_state, args| {
                let value = args.first()?.as_str()?.to_string();
                Some(vec![PlanItem::action("set_flag", vec![string_value(value)])])
            })
            .unwrap();
        domain
            .declare_task_method("put_it", "m_err", |_state, _args| None)
            .unwrap();

        let planner = PlannerBuilder::new().with_domain(domain).build().unwrap();
        let plan = planner
            .find_plan(State::new("s0"), vec![PlanItem::task("put_it", vec![string_value("done")])])
            .unwrap()
            .unwrap();
        assert_eq!(plan, vec![PlanItem::action("set_flag", vec![string_value("done")])]);
    }
}
