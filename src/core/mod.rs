//! Core data structures: states, goals, and the todo-item tagged sum.

pub mod state;
pub mod multigoal;
pub mod domain;

pub use state::State;
pub use multigoal::Multigoal;
pub use domain::Domain;

use serde::{Deserialize, Serialize};

/// Type alias for state variable values. Arguments and values are opaque
/// symbolic terms (strings, integers, tuples of the same); `serde_json::Value`
/// models all of these and gives free (de)serialization for diagnostics.
pub type StateValue = serde_json::Value;

/// The planner-injected verification payload. Carries the *real* method
/// name (via the method wrapper's `name()` accessor, see `core::domain`)
/// rather than a placeholder, and carries a `Multigoal` directly instead of
/// round-tripping it through JSON-encoded `StateValue` arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum VerifyKind {
    Unigoal {
        method_name: String,
        var_name: String,
        arg: String,
        desired: StateValue,
        depth: usize,
    },
    Multigoal {
        method_name: String,
        goal: Multigoal,
        depth: usize,
    },
}

/// The uniform todo-item type: Action | Task | Unigoal | Multigoal | Verify.
/// The first four are legal caller inputs; `Verify` is constructed only by
/// the planner's refiners.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanItem {
    /// A compound task with name and arguments, refined via `task_methods`.
    Task(String, Vec<StateValue>),
    /// A primitive action with name and arguments.
    Action(String, Vec<StateValue>),
    /// A single-variable goal: `(var_name, arg, value)`.
    Unigoal(String, String, StateValue),
    /// A conjunctive goal fragment.
    Multigoal(Multigoal),
    /// An internally injected post-condition check.
    Verify(VerifyKind),
}

impl PlanItem {
    pub fn task(name: impl Into<String>, args: Vec<StateValue>) -> Self {
        Self::Task(name.into(), args)
    }

    pub fn action(name: impl Into<String>, args: Vec<StateValue>) -> Self {
        Self::Action(name.into(), args)
    }

    pub fn unigoal(
        state_var_name: impl Into<String>,
        arg: impl Into<String>,
        value: StateValue,
    ) -> Self {
        Self::Unigoal(state_var_name.into(), arg.into(), value)
    }

    pub fn multigoal(multigoal: Multigoal) -> Self {
        Self::Multigoal(multigoal)
    }

    /// Name used for dispatch and tracing. Verify items report the name of
    /// the method they are checking, not a fixed sentinel string, so trace
    /// output stays informative.
    pub fn name(&self) -> &str {
        match self {
            Self::Task(name, _) | Self::Action(name, _) | Self::Unigoal(name, _, _) => name,
            Self::Multigoal(mg) => &mg.name,
            Self::Verify(VerifyKind::Unigoal { method_name, .. })
            | Self::Verify(VerifyKind::Multigoal { method_name, .. }) => method_name,
        }
    }

    pub fn is_task(&self) -> bool {
        matches!(self, Self::Task(_, _))
    }

    pub fn is_action(&self) -> bool {
        matches!(self, Self::Action(_, _))
    }

    pub fn is_unigoal(&self) -> bool {
        matches!(self, Self::Unigoal(_, _, _))
    }

    pub fn is_multigoal(&self) -> bool {
        matches!(self, Self::Multigoal(_))
    }

    pub fn is_verify(&self) -> bool {
        matches!(self, Self::Verify(_))
    }
}

impl std::fmt::Display for PlanItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Task(name, args) | Self::Action(name, args) => {
                write!(f, "({name}")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                write!(f, ")")
            }
            Self::Unigoal(var_name, arg, value) => write!(f, "({var_name} {arg} {value})"),
            Self::Multigoal(mg) => write!(f, "{mg}"),
            Self::Verify(VerifyKind::Unigoal {
                method_name,
                var_name,
                arg,
                depth,
                ..
            }) => write!(f, "(_verify_g {method_name} {var_name} {arg} @{depth})"),
            Self::Verify(VerifyKind::Multigoal {
                method_name, depth, ..
            }) => write!(f, "(_verify_mg {method_name} @{depth})"),
        }
    }
}

/// A sequence of (eventually primitive) actions.
pub type Plan = Vec<PlanItem>;

/// The current agenda of items remaining to achieve/execute.
pub type TodoList = Vec<PlanItem>;

pub fn string_value(s: impl Into<String>) -> StateValue {
    StateValue::String(s.into())
}

pub fn int_value(i: i64) -> StateValue {
    StateValue::Number(serde_json::Number::from(i))
}

pub fn float_value(f: f64) -> StateValue {
    StateValue::Number(serde_json::Number::from_f64(f).unwrap_or(serde_json::Number::from(0)))
}

pub fn bool_value(b: bool) -> StateValue {
    StateValue::Bool(b)
}
