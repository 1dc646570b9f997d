//! Logistics (HGN): trucks move packages within a city, planes move them
//! between cities, expressed entirely through unigoal methods — no task
//! methods at all, the HGN counterpart to [`super::blocks_world`]'s HTN
//! style.

use crate::core::{string_value, Domain, PlanItem, State, StateValue};
use crate::error::Result;
use crate::planning::m_split_multigoal;

pub fn create_logistics_domain() -> Result<Domain> {
    let mut domain = Domain::new("logistics_hgn");
    declare_actions(&mut domain)?;
    declare_unigoal_methods(&mut domain)?;
    domain.declare_multigoal_method("m_split_multigoal", m_split_multigoal)?;
    Ok(domain)
}

fn declare_actions(domain: &mut Domain) -> Result<()> {
    domain.declare_action("drive_truck", |state: &mut State, args: &[StateValue]| {
        let truck = args.first()?.as_str()?;
        let location = args.get(1)?.as_str()?;
        state.set_var("truck_at", truck, string_value(location));
        Some(state.clone())
    })?;

    domain.declare_action("load_truck", |state: &mut State, args: &[StateValue]| {
        let package = args.first()?.as_str()?;
        let truck = args.get(1)?.as_str()?;
        state.set_var("at", package, string_value(truck));
        Some(state.clone())
    })?;

    domain.declare_action("unload_truck", |state: &mut State, args: &[StateValue]| {
        let package = args.first()?.as_str()?;
        let location = args.get(1)?.as_str()?;
        let truck = state.get_var("at", package)?.as_str()?;
        if state.get_var("truck_at", truck)?.as_str()? != location {
            return None;
        }
        state.set_var("at", package, string_value(location));
        Some(state.clone())
    })?;

    domain.declare_action("fly_plane", |state: &mut State, args: &[StateValue]| {
        let plane = args.first()?.as_str()?;
        let airport = args.get(1)?.as_str()?;
        state.set_var("plane_at", plane, string_value(airport));
        Some(state.clone())
    })?;

    domain.declare_action("load_plane", |state: &mut State, args: &[StateValue]| {
        let package = args.first()?.as_str()?;
        let plane = args.get(1)?.as_str()?;
        state.set_var("at", package, string_value(plane));
        Some(state.clone())
    })?;

    domain.declare_action("unload_plane", |state: &mut State, args: &[StateValue]| {
        let package = args.first()?.as_str()?;
        let airport = args.get(1)?.as_str()?;
        let plane = state.get_var("at", package)?.as_str()?;
        if state.get_var("plane_at", plane)?.as_str()? != airport {
            return None;
        }
        state.set_var("at", package, string_value(airport));
        Some(state.clone())
    })?;

    Ok(())
}

fn declare_unigoal_methods(domain: &mut Domain) -> Result<()> {
    domain.declare_unigoal_method("truck_at", "m_drive_truck", |state: &State, arg: &str, value: &StateValue| {
        let location = value.as_str()?;
        if !is_truck(state, arg) || !is_location(state, location) {
            return None;
        }
        if get_city(state, arg) != get_city(state, location) {
            return None;
        }
        Some(vec![PlanItem::action("drive_truck", vec![string_value(arg), string_value(location)])])
    })?;

    domain.declare_unigoal_method("plane_at", "m_fly_plane", |state: &State, arg: &str, value: &StateValue| {
        let airport = value.as_str()?;
        if !is_plane(state, arg) || !is_airport(state, airport) {
            return None;
        }
        Some(vec![PlanItem::action("fly_plane", vec![string_value(arg), string_value(airport)])])
    })?;

    domain.declare_unigoal_method("at", "m_load_truck", |state: &State, arg: &str, value: &StateValue| {
        let truck = value.as_str()?;
        if !is_truck(state, truck) {
            return None;
        }
        let package_loc = state.get_var("at", arg)?.as_str()?.to_string();
        let truck_loc = state.get_var("truck_at", truck)?.as_str()?;
        if package_loc != truck_loc {
            return None;
        }
        Some(vec![PlanItem::action("load_truck", vec![string_value(arg), string_value(truck)])])
    })?;

    domain.declare_unigoal_method("at", "m_unload_truck", |state: &State, arg: &str, value: &StateValue| {
        let location = value.as_str()?;
        if !is_location(state, location) {
            return None;
        }
        let carrier = state.get_var("at", arg)?.as_str()?.to_string();
        if !is_truck(state, &carrier) {
            return None;
        }
        Some(vec![PlanItem::action("unload_truck", vec![string_value(arg), string_value(location)])])
    })?;

    domain.declare_unigoal_method("at", "m_load_plane", |state: &State, arg: &str, value: &StateValue| {
        let plane = value.as_str()?;
        if !is_plane(state, plane) {
            return None;
        }
        let package_loc = state.get_var("at", arg)?.as_str()?.to_string();
        let plane_loc = state.get_var("plane_at", plane)?.as_str()?;
        if package_loc != plane_loc {
            return None;
        }
        Some(vec![PlanItem::action("load_plane", vec![string_value(arg), string_value(plane)])])
    })?;

    domain.declare_unigoal_method("at", "m_unload_plane", |state: &State, arg: &str, value: &StateValue| {
        let airport = value.as_str()?;
        if !is_airport(state, airport) {
            return None;
        }
        let carrier = state.get_var("at", arg)?.as_str()?.to_string();
        if !is_plane(state, &carrier) {
            return None;
        }
        Some(vec![PlanItem::action("unload_plane", vec![string_value(arg), string_value(airport)])])
    })?;

    // Same city: find a truck, drive it to the package, load, drive to the
    // destination, unload.
    domain.declare_unigoal_method("at", "m_move_within_city", |state: &State, arg: &str, value: &StateValue| {
        let target = value.as_str()?;
        if !is_package(state, arg) || !is_location(state, target) {
            return None;
        }
        let package_loc = state.get_var("at", arg)?.as_str()?.to_string();
        if !is_location(state, &package_loc) {
            return None;
        }
        let city = get_city(state, &package_loc)?;
        if city != get_city(state, target)? {
            return None;
        }
        let truck = find_entity_in_city(state, "trucks", "truck_at", &city)?;
        Some(vec![
            PlanItem::unigoal("truck_at", truck.clone(), string_value(package_loc)),
            PlanItem::unigoal("at", arg, string_value(truck.clone())),
            PlanItem::unigoal("truck_at", truck, string_value(target)),
            PlanItem::unigoal("at", arg, string_value(target)),
        ])
    })?;

    // Different city: find a plane, fly it to the package's airport, load,
    // fly to the destination airport, unload.
    domain.declare_unigoal_method("at", "m_move_between_cities", |state: &State, arg: &str, value: &StateValue| {
        let target = value.as_str()?;
        if !is_package(state, arg) || !is_airport(state, target) {
            return None;
        }
        let package_loc = state.get_var("at", arg)?.as_str()?.to_string();
        if !is_airport(state, &package_loc) {
            return None;
        }
        let origin_city = get_city(state, &package_loc)?;
        if origin_city == get_city(state, target)? {
            return None;
        }
        let plane = find_entity_in_city(state, "airplanes", "plane_at", &origin_city).or_else(|| any_entity(state, "airplanes"))?;
        Some(vec![
            PlanItem::unigoal("plane_at", plane.clone(), string_value(package_loc)),
            PlanItem::unigoal("at", arg, string_value(plane.clone())),
            PlanItem::unigoal("plane_at", plane, string_value(target)),
            PlanItem::unigoal("at", arg, string_value(target)),
        ])
    })?;

    Ok(())
}

fn is_package(state: &State, entity: &str) -> bool {
    state.get_var("packages", entity).and_then(StateValue::as_bool).unwrap_or(false)
}

fn is_truck(state: &State, entity: &str) -> bool {
    state.get_var("trucks", entity).and_then(StateValue::as_bool).unwrap_or(false)
}

fn is_plane(state: &State, entity: &str) -> bool {
    state.get_var("airplanes", entity).and_then(StateValue::as_bool).unwrap_or(false)
}

fn is_location(state: &State, entity: &str) -> bool {
    state.get_var("locations", entity).and_then(StateValue::as_bool).unwrap_or(false)
}

fn is_airport(state: &State, entity: &str) -> bool {
    state.get_var("airports", entity).and_then(StateValue::as_bool).unwrap_or(false)
}

fn get_city(state: &State, entity: &str) -> Option<String> {
    state.get_var("in_city", entity)?.as_str().map(str::to_string)
}

/// Find any registered entity (by its `kind_var`, e.g. `"trucks"`) whose
/// `location_var` (e.g. `"truck_at"`) places it in `city`. Unlike a fixed
/// name list, this scales to however many vehicles a state declares.
fn find_entity_in_city(state: &State, kind_var: &str, location_var: &str, city: &str) -> Option<String> {
    let candidates = state.get_var_map(kind_var)?;
    candidates
        .iter()
        .filter(|(_, registered)| registered.as_bool() == Some(true))
        .find(|(name, _)| state.get_var(location_var, name).and_then(|loc| loc.as_str()).and_then(|loc| get_city(state, loc)).as_deref() == Some(city))
        .map(|(name, _)| name.clone())
}

fn any_entity(state: &State, kind_var: &str) -> Option<String> {
    state.get_var_map(kind_var)?.iter().find(|(_, registered)| registered.as_bool() == Some(true)).map(|(name, _)| name.clone())
}

pub fn create_two_city_state() -> State {
    let mut state = State::new("logistics_initial");
    state.set_var("at", "package1", string_value("location1"));
    state.set_var("at", "package2", string_value("location2"));
    state.set_var("truck_at", "truck1", string_value("location3"));
    state.set_var("truck_at", "truck6", string_value("location10"));
    state.set_var("plane_at", "plane2", string_value("airport2"));

    for (loc, city) in [
        ("location1", "city1"),
        ("location2", "city1"),
        ("location3", "city1"),
        ("airport1", "city1"),
        ("location10", "city2"),
        ("airport2", "city2"),
    ] {
        state.set_var("in_city", loc, string_value(city));
    }
    for package in ["package1", "package2"] {
        state.set_var("packages", package, true.into());
    }
    for truck in ["truck1", "truck6"] {
        state.set_var("trucks", truck, true.into());
    }
    state.set_var("airplanes", "plane2", true.into());
    for loc in ["location1", "location2", "location3", "airport1", "location10", "airport2"] {
        state.set_var("locations", loc, true.into());
    }
    for airport in ["airport1", "airport2"] {
        state.set_var("airports", airport, true.into());
    }
    state
}
