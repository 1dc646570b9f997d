//! A worked demo of the acting loop: when a person can't afford the taxi
//! fare, planning itself falls back to walking — and separately, a
//! command that fails once shows the actor replanning mid-execution.

use crate::core::{string_value, Domain, PlanItem, State, StateValue};
use crate::domains::{get_state_var_f64, get_state_var_string};
use crate::error::Result;
use crate::planning::PlannerBuilder;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const TAXI_FARE: f64 = 10.0;

fn declare_travel(domain: &mut Domain) -> Result<()> {
    domain.declare_action("walk", |state: &mut State, args: &[StateValue]| {
        let person = args.first()?.as_str()?;
        let to = args.get(2)?.as_str()?;
        state.set_var("loc", person, string_value(to));
        Some(state.clone())
    })?;

    domain.declare_action("ride_taxi", |state: &mut State, args: &[StateValue]| {
        let person = args.first()?.as_str()?;
        let to = args.get(2)?.as_str()?;
        let cash = get_state_var_f64(state, "cash", person)?;
        if cash < TAXI_FARE {
            return None;
        }
        state.set_var("loc", person, string_value(to));
        state.set_var("loc", "taxi1", string_value(to));
        state.set_var("cash", person, (cash - TAXI_FARE).into());
        Some(state.clone())
    })?;

    // m_taxi is tried first; it's only reachable when the action itself
    // accepts, so an empty wallet falls through to m_walk_fallback.
    domain.declare_task_method("travel", "m_taxi", |state: &State, args: &[StateValue]| {
        let person = args.first()?.as_str()?.to_string();
        let from = args.get(1)?.as_str()?.to_string();
        let to = args.get(2)?.as_str()?.to_string();
        if get_state_var_string(state, "loc", &person).as_deref() == Some(to.as_str()) {
            return Some(vec![]);
        }
        Some(vec![PlanItem::action(
            "ride_taxi",
            vec![string_value(person), string_value(from), string_value(to)],
        )])
    })?;

    domain.declare_task_method("travel", "m_walk_fallback", |_state: &State, args: &[StateValue]| {
        let person = args.first()?.as_str()?.to_string();
        let from = args.get(1)?.as_str()?.to_string();
        let to = args.get(2)?.as_str()?.to_string();
        Some(vec![PlanItem::action("walk", vec![string_value(person), string_value(from), string_value(to)])])
    })?;

    Ok(())
}

/// A domain whose `ride_taxi` command fails on its first real dispatch
/// (the taxi never shows up), even though the action it mirrors would
/// have succeeded — the actor must notice the mismatch and replan.
pub fn create_flaky_taxi_domain() -> Result<Domain> {
    let mut domain = Domain::new("flaky_taxi");
    declare_travel(&mut domain)?;

    let taxi_showed_up = Arc::new(AtomicBool::new(false));
    domain.declare_command("c_ride_taxi", move |state, args| {
        if taxi_showed_up.swap(true, Ordering::SeqCst) {
            None
        } else {
            let person = args.first()?.as_str()?;
            let to = args.get(2)?.as_str()?;
            let cash = get_state_var_f64(state, "cash", person)?;
            state.set_var("loc", person, string_value(to));
            state.set_var("loc", "taxi1", string_value(to));
            state.set_var("cash", person, (cash - TAXI_FARE).into());
            Some(state.clone())
        }
    })?;
    Ok(domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_funded_traveler_takes_the_taxi() {
        let mut domain = Domain::new("taxi");
        declare_travel(&mut domain).unwrap();
        let planner = PlannerBuilder::new().with_domain(domain).build().unwrap();

        let mut state = State::new("s0");
        state.set_var("loc", "alice", string_value("home_a"));
        state.set_var("loc", "taxi1", string_value("home_a"));
        state.set_var("cash", "alice", 20.0.into());

        let result = planner
            .run_lazy_lookahead(
                state,
                vec![PlanItem::task("travel", vec![string_value("alice"), string_value("home_a"), string_value("park")])],
                5,
            )
            .unwrap();
        assert_eq!(result.get_var("loc", "alice"), Some(&string_value("park")));
        assert_eq!(get_state_var_f64(&result, "cash", "alice"), Some(10.0));
    }

    #[test]
    fn an_empty_wallet_falls_back_to_walking() {
        let mut domain = Domain::new("taxi");
        declare_travel(&mut domain).unwrap();
        let planner = PlannerBuilder::new().with_domain(domain).build().unwrap();

        let mut state = State::new("s0");
        state.set_var("loc", "alice", string_value("home_a"));
        state.set_var("loc", "taxi1", string_value("home_a"));
        state.set_var("cash", "alice", 2.0.into());

        let result = planner
            .run_lazy_lookahead(
                state,
                vec![PlanItem::task("travel", vec![string_value("alice"), string_value("home_a"), string_value("park")])],
                5,
            )
            .unwrap();
        assert_eq!(result.get_var("loc", "alice"), Some(&string_value("park")));
        assert_eq!(get_state_var_f64(&result, "cash", "alice"), Some(2.0));
    }

    #[test]
    fn a_no_show_taxi_forces_a_replan_that_succeeds_on_retry() {
        let domain = create_flaky_taxi_domain().unwrap();
        let planner = PlannerBuilder::new().with_domain(domain).build().unwrap();

        let mut state = State::new("s0");
        state.set_var("loc", "alice", string_value("home_a"));
        state.set_var("loc", "taxi1", string_value("home_a"));
        state.set_var("cash", "alice", 20.0.into());

        let result = planner
            .run_lazy_lookahead(
                state,
                vec![PlanItem::task("travel", vec![string_value("alice"), string_value("home_a"), string_value("park")])],
                5,
            )
            .unwrap();
        assert_eq!(result.get_var("loc", "alice"), Some(&string_value("park")));
    }
}
