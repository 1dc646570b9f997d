//! Error types for taskloom.

use thiserror::Error;

/// Result type alias for taskloom operations.
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Fatal domain-authoring errors and the recoverable-but-reported shapes
/// that accompany them. Method-inapplicable (a method returning the
/// Failure sentinel) is represented by `Ok(None)`/`Ok(Some(vec![]))` in the
/// planner's own return type, not by a `PlannerError` variant — only
/// kind-3 "fatal domain error" conditions (see spec §7) become `Err`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// A name is registered in both `actions` and `task_methods`.
    #[error("'{name}' is declared as both an action and a task: dispatch would be ambiguous")]
    NameCollision { name: String },

    /// `PlannerBuilder::build()` called with no domain attached.
    #[error("no domain attached to this planner; call PlannerBuilder::with_domain first")]
    NoDomain,

    /// Verbose level outside the documented 0..=3 range.
    #[error("verbose level must be between 0 and 3, got {level}")]
    InvalidVerboseLevel { level: i32 },

    /// A todo-item's head symbol matched no table in the domain.
    #[error("'{item}' is uninterpretable at depth {depth}: not a known action, task, or unigoal variable")]
    UninterpretableItem { item: String, depth: usize },

    /// `find_plan`/the Actor were asked to run an action/command name the
    /// domain never declared.
    #[error("no action or command named '{name}' is registered in this domain")]
    UnknownAction { name: String },

    /// Generic fatal error for conditions not covered above.
    #[error("planner error: {message}")]
    Generic { message: String },
}

impl PlannerError {
    pub fn name_collision(name: impl Into<String>) -> Self {
        Self::NameCollision { name: name.into() }
    }

    pub fn invalid_verbose_level(level: i32) -> Self {
        Self::InvalidVerboseLevel { level }
    }

    pub fn uninterpretable_item(item: impl Into<String>, depth: usize) -> Self {
        Self::UninterpretableItem {
            item: item.into(),
            depth,
        }
    }

    pub fn unknown_action(name: impl Into<String>) -> Self {
        Self::UnknownAction { name: name.into() }
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }
}
