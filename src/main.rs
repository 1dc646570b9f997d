//! Runs a worked planning-and-acting scenario end to end.

use taskloom::core::string_value;
use taskloom::demos::{print_plan, travel_htn::create_travel_domain};
use taskloom::{PlanItem, PlannerBuilder, State};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("taskloom");
    println!("========");

    let domain = create_travel_domain()?;
    let planner = PlannerBuilder::new().with_domain(domain).with_verbose_level(1)?.build()?;

    let mut state = State::new("s0");
    state.set_var("loc", "alice", string_value("home_a"));
    state.set_var("loc", "taxi1", string_value("home_a"));
    state.set_var("cash", "alice", 20.into());

    let todo = vec![PlanItem::task(
        "travel",
        vec![string_value("alice"), string_value("home_a"), string_value("park")],
    )];

    match planner.find_plan(state, todo)? {
        Some(plan) => print_plan(&plan),
        None => println!("no plan found"),
    }

    Ok(())
}
