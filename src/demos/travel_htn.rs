//! Travel domain (HTN): walk-or-taxi, with genuinely separate task methods
//! so that method-declaration order drives backtracking (spec §8 scenario
//! 4), rather than the single branching method the teacher's
//! `simple_htn.rs` used.

use crate::core::{string_value, Domain, PlanItem, State, StateValue};
use crate::domains::{get_state_var_f64, get_state_var_string};
use crate::error::Result;

const TAXI_FARE: f64 = 10.0;

pub fn create_travel_domain() -> Result<Domain> {
    let mut domain = Domain::new("travel_htn");

    domain.declare_action("walk", |state: &mut State, args: &[StateValue]| {
        let person = args.first()?.as_str()?;
        let from = args.get(1)?.as_str()?;
        let to = args.get(2)?.as_str()?;
        if get_state_var_string(state, "loc", person).as_deref() == Some(from) {
            state.set_var("loc", person, string_value(to));
            Some(state.clone())
        } else {
            None
        }
    })?;

    domain.declare_action("call_taxi", |state: &mut State, args: &[StateValue]| {
        let location = args.get(1)?.as_str()?;
        state.set_var("loc", "taxi1", string_value(location));
        Some(state.clone())
    })?;

    domain.declare_action("ride_taxi", |state: &mut State, args: &[StateValue]| {
        let person = args.first()?.as_str()?;
        let from = args.get(1)?.as_str()?;
        let to = args.get(2)?.as_str()?;
        let person_loc = get_state_var_string(state, "loc", person);
        let taxi_loc = get_state_var_string(state, "loc", "taxi1");
        if person_loc.as_deref() == Some(from) && taxi_loc.as_deref() == Some(from) {
            state.set_var("loc", person, string_value(to));
            state.set_var("loc", "taxi1", string_value(to));
            if let Some(cash) = get_state_var_f64(state, "cash", person) {
                state.set_var("cash", person, (cash - TAXI_FARE).into());
            }
            Some(state.clone())
        } else {
            None
        }
    })?;

    // Two separately declared methods: short walks are tried first, and
    // only if that's inapplicable does the planner fall back to a taxi.
    domain.declare_task_method("travel", "m_walk", |state: &State, args: &[StateValue]| {
        let person = args.first()?.as_str()?.to_string();
        let from = args.get(1)?.as_str()?.to_string();
        let to = args.get(2)?.as_str()?.to_string();
        if get_state_var_string(state, "loc", &person).as_deref() == Some(to.as_str()) {
            return Some(vec![]);
        }
        if from != "home_a" || to != "park" {
            return None;
        }
        Some(vec![PlanItem::action(
            "walk",
            vec![string_value(person), string_value(from), string_value(to)],
        )])
    })?;

    domain.declare_task_method("travel", "m_taxi", |state: &State, args: &[StateValue]| {
        let person = args.first()?.as_str()?.to_string();
        let from = args.get(1)?.as_str()?.to_string();
        let to = args.get(2)?.as_str()?.to_string();
        if get_state_var_string(state, "loc", &person).as_deref() == Some(to.as_str()) {
            return Some(vec![]);
        }
        Some(vec![
            PlanItem::action("call_taxi", vec![string_value(person.clone()), string_value(from.clone())]),
            PlanItem::action("ride_taxi", vec![string_value(person), string_value(from), string_value(to)]),
        ])
    })?;

    Ok(domain)
}
