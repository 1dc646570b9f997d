//! # taskloom
//!
//! A hybrid HTN/HGN (Hierarchical Task/Goal Network) automated planner with
//! a lazy-lookahead acting loop.
//!
//! ## Planning paradigms
//!
//! A [`core::Domain`] can mix both styles freely:
//!
//! ### HTN: task methods decompose abstract tasks
//!
//! ```rust
//! use taskloom::{Domain, State, PlanItem, PlannerBuilder, core::string_value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut domain = Domain::new("travel_domain");
//!
//! domain.declare_task_method("travel", "m_taxi", |_state, args| {
//!     let person = args.first()?.as_str()?.to_string();
//!     Some(vec![
//!         PlanItem::task("get_taxi", vec![string_value(person.clone())]),
//!         PlanItem::task("pay_taxi", vec![string_value(person)]),
//!     ])
//! })?;
//! domain.declare_task_method("get_taxi", "m_get_taxi", |_state, _args| Some(vec![]))?;
//! domain.declare_task_method("pay_taxi", "m_pay_taxi", |_state, _args| Some(vec![]))?;
//!
//! let planner = PlannerBuilder::new().with_domain(domain).build()?;
//! let state = State::new("initial");
//! let plan = planner.find_plan(state, vec![PlanItem::task("travel", vec![string_value("alice")])])?;
//! assert!(plan.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ### HGN: multigoal methods decompose conjunctive goals
//!
//! ```rust
//! use taskloom::{Domain, State, PlanItem, Multigoal, PlannerBuilder, core::string_value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut domain = Domain::new("goal_domain");
//! domain.declare_action("move", |state: &mut State, args: &[taskloom::core::StateValue]| {
//!     let who = args.first()?.as_str()?;
//!     let to = args.get(1)?.clone();
//!     state.set_var("loc", who, to);
//!     Some(state.clone())
//! })?;
//! domain.declare_multigoal_method("m_split", taskloom::planning::m_split_multigoal)?;
//!
//! let planner = PlannerBuilder::new().with_domain(domain).build()?;
//! let mut state = State::new("initial");
//! state.set_var("loc", "alice", string_value("home"));
//!
//! let mut goal = Multigoal::new("travel_goal");
//! goal.set_goal("loc", "alice", string_value("park"));
//! let plan = planner.find_plan(state, vec![PlanItem::multigoal(goal)])?;
//! assert!(plan.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Acting: the lazy-lookahead loop
//!
//! [`Planner::run_lazy_lookahead`] interleaves planning with execution: it
//! finds a plan, executes it action by action via matching `c_<action>`
//! commands, and re-plans from the actual resulting state the moment a
//! command's outcome diverges from what the planner predicted.
//!
//! ## Demos
//!
//! The [`demos`] module carries five worked domains exercising every
//! corner of the planner: `travel_htn`, `backtracking`, `blocks_world`,
//! `logistics_hgn`, and `lazy_lookahead`.

pub mod core;
pub mod demos;
pub mod domains;
pub mod error;
pub mod planning;

pub use core::{Domain, Multigoal, PlanItem, State};
pub use error::{PlannerError, Result};
pub use planning::{Planner, PlannerBuilder, PlanningStrategy};

/// Crate version, re-exported for diagnostics and `--version` output.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
