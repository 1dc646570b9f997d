//! Planner configuration, tracing, and the `Planner`/`PlannerBuilder` pair.
//!
//! The planner is an explicit, immutable, `Send + Sync` value: no
//! process-global "current domain" or "current strategy" binding is load
//! bearing anywhere in `planning/`. A thin convenience wrapper
//! (`planning::default`) keeps a single default `Planner` for interactive
//! use, layered on top of the explicit API, per spec §5/§9.

pub mod actor;
pub mod multigoal_methods;
pub mod seek;
pub mod verification;

pub use actor::run_lazy_lookahead;
pub use multigoal_methods::m_split_multigoal;

use crate::core::{Domain, Plan, PlanItem, State, StateValue, TodoList};
use crate::error::{PlannerError, Result};
use std::sync::{Arc, Mutex};

static VERBOSE_LEVEL: Mutex<i32> = Mutex::new(0);

pub fn set_verbose_level(level: i32) -> Result<()> {
    if !(0..=3).contains(&level) {
        return Err(PlannerError::invalid_verbose_level(level));
    }
    *VERBOSE_LEVEL.lock().unwrap() = level;
    Ok(())
}

pub fn get_verbose_level() -> i32 {
    *VERBOSE_LEVEL.lock().unwrap()
}

pub fn is_verbose(level: i32) -> bool {
    get_verbose_level() >= level
}

/// Print a depth-prefixed trace line when the given verbosity threshold is met.
pub fn verbose_print(level: i32, prefix: &str, message: &str) {
    if is_verbose(level) {
        println!("{prefix}> {message}");
    }
}

pub fn value_to_string(value: &StateValue) -> String {
    match value {
        StateValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn item_to_string(item: &PlanItem) -> String {
    item.to_string()
}

pub fn todo_list_to_string(todo_list: &TodoList) -> String {
    let items: Vec<String> = todo_list.iter().map(item_to_string).collect();
    format!("[{}]", items.join(", "))
}

/// The two interchangeable search implementations over the same domain
/// tables and the same recursion structure; neither one changes *what*
/// plan is found (modulo method order), only how the call stack is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanningStrategy {
    #[default]
    Recursive,
    Iterative,
}

/// An immutable, cloneable planner configuration. Built via
/// [`PlannerBuilder`]; every field here is read-only once built, so a
/// `Planner` can be freely shared across threads (`Arc<Domain>` inside).
#[derive(Debug, Clone)]
pub struct Planner {
    domain: Arc<Domain>,
    verbose_level: i32,
    strategy: PlanningStrategy,
    verify_goals: bool,
    max_depth: Option<usize>,
}

impl Planner {
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn domain_arc(&self) -> Arc<Domain> {
        Arc::clone(&self.domain)
    }

    pub fn verbose_level(&self) -> i32 {
        self.verbose_level
    }

    pub fn is_verbose(&self, level: i32) -> bool {
        self.verbose_level >= level
    }

    pub fn strategy(&self) -> PlanningStrategy {
        self.strategy
    }

    pub fn verify_goals(&self) -> bool {
        self.verify_goals
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Public entry point: `find_plan(state, todo_list) -> plan | Failure`.
    /// Emits a call trace at verbosity >= 1 and delegates to `seek_plan`.
    pub fn find_plan(&self, state: State, todo_list: TodoList) -> Result<Option<Plan>> {
        verbose_print(
            1,
            "FP",
            &format!(
                "find_plan({}, {})",
                state.name,
                todo_list_to_string(&todo_list)
            ),
        );
        let result = match self.strategy {
            PlanningStrategy::Recursive => seek::seek_plan_recursive(self, state, todo_list, vec![], 0),
            PlanningStrategy::Iterative => seek::seek_plan_iterative(self, state, todo_list),
        };
        match &result {
            Ok(Some(plan)) => verbose_print(1, "FP", &format!("succeeded, plan length {}", plan.len())),
            Ok(None) => verbose_print(1, "FP", "failed: no plan found"),
            Err(e) => verbose_print(1, "FP", &format!("fatal error: {e}")),
        }
        result
    }

    pub fn run_lazy_lookahead(
        &self,
        state: State,
        todo_list: TodoList,
        max_tries: usize,
    ) -> Result<State> {
        actor::run_lazy_lookahead(self, state, todo_list, max_tries)
    }
}

#[derive(Debug, Default)]
pub struct PlannerBuilder {
    domain: Option<Domain>,
    verbose_level: i32,
    strategy: PlanningStrategy,
    verify_goals: bool,
    max_depth: Option<usize>,
}

impl PlannerBuilder {
    pub fn new() -> Self {
        Self {
            domain: None,
            verbose_level: 0,
            strategy: PlanningStrategy::Recursive,
            verify_goals: true,
            max_depth: None,
        }
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }

    pub fn with_verbose_level(mut self, level: i32) -> Result<Self> {
        if !(0..=3).contains(&level) {
            return Err(PlannerError::invalid_verbose_level(level));
        }
        self.verbose_level = level;
        Ok(self)
    }

    pub fn with_strategy(mut self, strategy: PlanningStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_goal_verification(mut self, verify_goals: bool) -> Self {
        self.verify_goals = verify_goals;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn build(self) -> Result<Planner> {
        let domain = self.domain.ok_or(PlannerError::NoDomain)?;
        set_verbose_level(self.verbose_level)?;
        Ok(Planner {
            domain: Arc::new(domain),
            verbose_level: self.verbose_level,
            strategy: self.strategy,
            verify_goals: self.verify_goals,
            max_depth: self.max_depth,
        })
    }
}

/// A thin convenience wrapper keeping a single default planner bound for
/// interactive use (spec §9: "a thin convenience wrapper may keep a
/// default-domain binding"). Never read by `planning::seek`/`actor`
/// themselves — those always take an explicit `&Planner`.
pub mod default {
    use super::{Planner, PlannerBuilder};
    use crate::core::{Domain, Plan, State, TodoList};
    use crate::error::{PlannerError, Result};
    use std::sync::Mutex;

    static DEFAULT_PLANNER: Mutex<Option<Planner>> = Mutex::new(None);

    pub fn set_default_domain(domain: Domain) -> Result<()> {
        let planner = PlannerBuilder::new().with_domain(domain).build()?;
        *DEFAULT_PLANNER.lock().unwrap() = Some(planner);
        Ok(())
    }

    pub fn default_planner() -> Result<Planner> {
        DEFAULT_PLANNER
            .lock()
            .unwrap()
            .clone()
            .ok_or(PlannerError::NoDomain)
    }

    pub fn find_plan(state: State, todo_list: TodoList) -> Result<Option<Plan>> {
        default_planner()?.find_plan(state, todo_list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{string_value, PlanItem};

    fn travel_domain() -> Domain {
        let mut domain = Domain::new("travel");
        domain
            .declare_action("move", |state, args| {
                let obj = args.first()?.as_str()?;
                let dst = args.get(1)?.as_str()?;
                if state.has_var_arg("loc", obj) {
                    state.set_var("loc", obj, string_value(dst));
                    Some(state.clone())
                } else {
                    None
                }
            })
            .unwrap();
        domain
            .declare_task_method("transport", "m_transport", |_state, args| {
                let obj = args.first()?.as_str()?.to_string();
                let dst = args.get(1)?.as_str()?.to_string();
                Some(vec![PlanItem::action("move", vec![string_value(obj), string_value(dst)])])
            })
            .unwrap();
        domain
    }

    #[test]
    fn builder_requires_a_domain() {
        let err = PlannerBuilder::new().build().unwrap_err();
        assert!(matches!(err, PlannerError::NoDomain));
    }

    #[test]
    fn builder_rejects_out_of_range_verbosity() {
        let err = PlannerBuilder::new().with_verbose_level(9).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidVerboseLevel { level: 9 }));
    }

    #[test]
    fn simple_task_planning_finds_the_expected_plan() {
        let planner = PlannerBuilder::new()
            .with_domain(travel_domain())
            .build()
            .unwrap();
        let mut state = State::new("s0");
        state.set_var("loc", "b", string_value("room1"));
        let plan = planner
            .find_plan(
                state,
                vec![PlanItem::task("transport", vec![string_value("b"), string_value("room2")])],
            )
            .unwrap();
        assert_eq!(plan, Some(vec![PlanItem::action("move", vec![string_value("b"), string_value("room2")])]));
    }
}
