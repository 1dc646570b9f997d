//! The domain registry: actions, commands, and the three method tables.
//!
//! Methods are stored as named wrapper structs rather than bare closures so
//! that a method's identity survives into trace output and verification
//! tasks — Rust closures carry no runtime name, so the caller supplies one
//! at declaration time and every table entry carries it alongside the
//! callable (see `name()` on each wrapper below).

use super::{Multigoal, State, StateValue, TodoList};
use crate::error::{PlannerError, Result};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

pub type ActionFn = Arc<dyn Fn(&mut State, &[StateValue]) -> Option<State> + Send + Sync>;
pub type CommandFn = ActionFn;
pub type TaskMethodFn = Arc<dyn Fn(&State, &[StateValue]) -> Option<TodoList> + Send + Sync>;
pub type UnigoalMethodFn =
    Arc<dyn Fn(&State, &str, &StateValue) -> Option<TodoList> + Send + Sync>;
pub type MultigoalMethodFn = Arc<dyn Fn(&State, &Multigoal) -> Option<TodoList> + Send + Sync>;

macro_rules! named_method {
    ($struct_name:ident, $fn_type:ty) => {
        #[derive(Clone)]
        pub struct $struct_name {
            name: String,
            func: $fn_type,
        }

        impl $struct_name {
            pub fn new(name: impl Into<String>, func: $fn_type) -> Self {
                Self {
                    name: name.into(),
                    func,
                }
            }

            pub fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

named_method!(TaskMethod, TaskMethodFn);
named_method!(UnigoalMethod, UnigoalMethodFn);
named_method!(MultigoalMethod, MultigoalMethodFn);

impl TaskMethod {
    pub fn call(&self, state: &State, args: &[StateValue]) -> Option<TodoList> {
        (self.func)(state, args)
    }
}

impl UnigoalMethod {
    pub fn call(&self, state: &State, arg: &str, value: &StateValue) -> Option<TodoList> {
        (self.func)(state, arg, value)
    }
}

impl MultigoalMethod {
    pub fn call(&self, state: &State, goal: &Multigoal) -> Option<TodoList> {
        (self.func)(state, goal)
    }
}

/// Reserved task-method names the Domain pre-registers for the
/// verification protocol (spec §3).
pub const VERIFY_UNIGOAL_TASK: &str = "_verify_g";
pub const VERIFY_MULTIGOAL_TASK: &str = "_verify_mg";

/// A named registry of actions, commands, and methods. Built once via the
/// `declare_*` methods, then treated as immutable during planning.
pub struct Domain {
    pub name: String,
    actions: IndexMap<String, ActionFn>,
    commands: IndexMap<String, CommandFn>,
    task_methods: IndexMap<String, Vec<TaskMethod>>,
    unigoal_methods: IndexMap<String, Vec<UnigoalMethod>>,
    multigoal_methods: Vec<MultigoalMethod>,
    copy_counter: usize,
}

impl Domain {
    pub fn new(name: impl Into<String>) -> Self {
        let mut domain = Self {
            name: name.into(),
            actions: IndexMap::new(),
            commands: IndexMap::new(),
            task_methods: IndexMap::new(),
            unigoal_methods: IndexMap::new(),
            multigoal_methods: Vec::new(),
            copy_counter: 0,
        };
        domain.register_builtin_verification_methods();
        domain
    }

    fn register_builtin_verification_methods(&mut self) {
        self.task_methods.insert(
            VERIFY_UNIGOAL_TASK.to_string(),
            vec![TaskMethod::new(
                "_m_verify_g",
                Arc::new(|state: &State, args: &[StateValue]| {
                    let var_name = args.first()?.as_str()?;
                    let arg = args.get(1)?.as_str()?;
                    let desired = args.get(2)?;
                    if state.satisfies_unigoal(var_name, arg, desired) {
                        Some(vec![])
                    } else {
                        None
                    }
                }),
            )],
        );
        self.task_methods.insert(
            VERIFY_MULTIGOAL_TASK.to_string(),
            vec![TaskMethod::new(
                "_m_verify_mg",
                Arc::new(|state: &State, args: &[StateValue]| {
                    let goal: Multigoal = serde_json::from_value(args.first()?.clone()).ok()?;
                    if goal.unsatisfied_goals(state).is_empty() {
                        Some(vec![])
                    } else {
                        None
                    }
                }),
            )],
        );
    }

    /// Declare a single action. Errors if `name` already names a task.
    pub fn declare_action<F>(&mut self, name: impl Into<String>, func: F) -> Result<()>
    where
        F: Fn(&mut State, &[StateValue]) -> Option<State> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.task_methods.contains_key(&name) {
            return Err(PlannerError::name_collision(name));
        }
        self.actions.insert(name, Arc::new(func));
        Ok(())
    }

    pub fn declare_actions<F>(&mut self, fns: Vec<(&str, F)>) -> Result<()>
    where
        F: Fn(&mut State, &[StateValue]) -> Option<State> + Send + Sync + 'static,
    {
        for (name, func) in fns {
            self.declare_action(name, func)?;
        }
        Ok(())
    }

    /// Declare a command — the acting-time analogue of an action, by
    /// convention named `c_<action>`.
    pub fn declare_command<F>(&mut self, name: impl Into<String>, func: F) -> Result<()>
    where
        F: Fn(&mut State, &[StateValue]) -> Option<State> + Send + Sync + 'static,
    {
        self.commands.insert(name.into(), Arc::new(func));
        Ok(())
    }

    pub fn declare_commands<F>(&mut self, fns: Vec<(&str, F)>) -> Result<()>
    where
        F: Fn(&mut State, &[StateValue]) -> Option<State> + Send + Sync + 'static,
    {
        for (name, func) in fns {
            self.declare_command(name, func)?;
        }
        Ok(())
    }

    /// Declare one method for `task_name`. A task name colliding with an
    /// existing action name is rejected; re-declaring a method of the same
    /// name under the same task is a no-op (Invariant 2).
    pub fn declare_task_method<F>(
        &mut self,
        task_name: impl Into<String>,
        method_name: impl Into<String>,
        func: F,
    ) -> Result<()>
    where
        F: Fn(&State, &[StateValue]) -> Option<TodoList> + Send + Sync + 'static,
    {
        let task_name = task_name.into();
        if self.actions.contains_key(&task_name) {
            return Err(PlannerError::name_collision(task_name));
        }
        let method_name = method_name.into();
        let methods = self.task_methods.entry(task_name).or_default();
        if methods.iter().any(|m| m.name() == method_name) {
            return Ok(());
        }
        methods.push(TaskMethod::new(method_name, Arc::new(func)));
        Ok(())
    }

    pub fn declare_task_methods<F>(
        &mut self,
        task_name: impl Into<String>,
        methods: Vec<(&str, F)>,
    ) -> Result<()>
    where
        F: Fn(&State, &[StateValue]) -> Option<TodoList> + Send + Sync + 'static,
    {
        let task_name = task_name.into();
        for (method_name, func) in methods {
            self.declare_task_method(task_name.clone(), method_name, func)?;
        }
        Ok(())
    }

    pub fn declare_unigoal_method<F>(
        &mut self,
        var_name: impl Into<String>,
        method_name: impl Into<String>,
        func: F,
    ) -> Result<()>
    where
        F: Fn(&State, &str, &StateValue) -> Option<TodoList> + Send + Sync + 'static,
    {
        let var_name = var_name.into();
        let method_name = method_name.into();
        let methods = self.unigoal_methods.entry(var_name).or_default();
        if methods.iter().any(|m| m.name() == method_name) {
            return Ok(());
        }
        methods.push(UnigoalMethod::new(method_name, Arc::new(func)));
        Ok(())
    }

    pub fn declare_unigoal_methods<F>(
        &mut self,
        var_name: impl Into<String>,
        methods: Vec<(&str, F)>,
    ) -> Result<()>
    where
        F: Fn(&State, &str, &StateValue) -> Option<TodoList> + Send + Sync + 'static,
    {
        let var_name = var_name.into();
        for (method_name, func) in methods {
            self.declare_unigoal_method(var_name.clone(), method_name, func)?;
        }
        Ok(())
    }

    pub fn declare_multigoal_method<F>(
        &mut self,
        method_name: impl Into<String>,
        func: F,
    ) -> Result<()>
    where
        F: Fn(&State, &Multigoal) -> Option<TodoList> + Send + Sync + 'static,
    {
        let method_name = method_name.into();
        if self.multigoal_methods.iter().any(|m| m.name() == method_name) {
            return Ok(());
        }
        self.multigoal_methods
            .push(MultigoalMethod::new(method_name, Arc::new(func)));
        Ok(())
    }

    pub fn declare_multigoal_methods<F>(&mut self, methods: Vec<(&str, F)>) -> Result<()>
    where
        F: Fn(&State, &Multigoal) -> Option<TodoList> + Send + Sync + 'static,
    {
        for (method_name, func) in methods {
            self.declare_multigoal_method(method_name, func)?;
        }
        Ok(())
    }

    pub fn get_action(&self, name: &str) -> Option<&ActionFn> {
        self.actions.get(name)
    }

    pub fn get_command(&self, name: &str) -> Option<&CommandFn> {
        self.commands.get(name)
    }

    pub fn get_task_methods(&self, task_name: &str) -> Option<&[TaskMethod]> {
        self.task_methods.get(task_name).map(Vec::as_slice)
    }

    pub fn get_unigoal_methods(&self, var_name: &str) -> Option<&[UnigoalMethod]> {
        self.unigoal_methods.get(var_name).map(Vec::as_slice)
    }

    pub fn get_multigoal_methods(&self) -> &[MultigoalMethod] {
        &self.multigoal_methods
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn has_task_methods(&self, task_name: &str) -> bool {
        self.task_methods
            .get(task_name)
            .is_some_and(|methods| !methods.is_empty())
    }

    pub fn has_unigoal_methods(&self, var_name: &str) -> bool {
        self.unigoal_methods
            .get(var_name)
            .is_some_and(|methods| !methods.is_empty())
    }

    pub fn action_names(&self) -> Vec<&String> {
        self.actions.keys().collect()
    }

    pub fn task_names(&self) -> Vec<&String> {
        self.task_methods.keys().collect()
    }

    pub fn copy(&self, new_name: Option<String>) -> Self {
        let mut copy = self.clone();
        if let Some(name) = new_name {
            copy.name = name;
        } else {
            copy.name = format!("{}_copy_{}", self.name, self.copy_counter);
            copy.copy_counter += 1;
        }
        copy
    }

    pub fn display(&self) {
        println!("Domain {}:", self.name);
        self.print_actions();
        self.print_commands();
        self.print_methods();
    }

    pub fn print_actions(&self) {
        println!("  actions: {:?}", self.action_names());
    }

    pub fn print_commands(&self) {
        println!("  commands: {:?}", self.commands.keys().collect::<Vec<_>>());
    }

    pub fn print_methods(&self) {
        self.print_task_methods();
        self.print_unigoal_methods();
        self.print_multigoal_methods();
    }

    pub fn print_task_methods(&self) {
        for (task, methods) in &self.task_methods {
            let names: Vec<&str> = methods.iter().map(TaskMethod::name).collect();
            println!("  task_methods[{task}]: {names:?}");
        }
    }

    pub fn print_unigoal_methods(&self) {
        for (var, methods) in &self.unigoal_methods {
            let names: Vec<&str> = methods.iter().map(UnigoalMethod::name).collect();
            println!("  unigoal_methods[{var}]: {names:?}");
        }
    }

    pub fn print_multigoal_methods(&self) {
        let names: Vec<&str> = self.multigoal_methods.iter().map(MultigoalMethod::name).collect();
        println!("  multigoal_methods: {names:?}");
    }
}

impl Clone for Domain {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            actions: self.actions.clone(),
            commands: self.commands.clone(),
            task_methods: self.task_methods.clone(),
            unigoal_methods: self.unigoal_methods.clone(),
            multigoal_methods: self.multigoal_methods.clone(),
            copy_counter: self.copy_counter,
        }
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("name", &self.name)
            .field("actions", &self.action_names())
            .field("tasks", &self.task_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::string_value;

    #[test]
    fn builtin_verification_methods_are_preregistered() {
        let domain = Domain::new("test");
        assert!(domain.has_task_methods(VERIFY_UNIGOAL_TASK));
        assert!(domain.has_task_methods(VERIFY_MULTIGOAL_TASK));
    }

    #[test]
    fn action_and_task_names_cannot_collide() {
        let mut domain = Domain::new("test");
        domain
            .declare_action("move", |s: &mut State, _: &[StateValue]| Some(s.clone()))
            .unwrap();
        let err = domain
            .declare_task_method("move", "m_move", |_: &State, _: &[StateValue]| Some(vec![]))
            .unwrap_err();
        assert!(matches!(err, PlannerError::NameCollision { .. }));
    }

    #[test]
    fn redeclaring_a_method_under_the_same_name_is_a_no_op() {
        let mut domain = Domain::new("test");
        domain
            .declare_task_method("travel", "m0", |_: &State, _: &[StateValue]| Some(vec![]))
            .unwrap();
        domain
            .declare_task_method("travel", "m0", |_: &State, _: &[StateValue]| Some(vec![]))
            .unwrap();
        assert_eq!(domain.get_task_methods("travel").unwrap().len(), 1);
    }

    #[test]
    fn method_declaration_order_is_preserved() {
        let mut domain = Domain::new("test");
        domain
            .declare_task_method("travel", "m_first", |_: &State, _: &[StateValue]| None)
            .unwrap();
        domain
            .declare_task_method("travel", "m_second", |_: &State, _: &[StateValue]| Some(vec![]))
            .unwrap();
        let names: Vec<&str> = domain
            .get_task_methods("travel")
            .unwrap()
            .iter()
            .map(TaskMethod::name)
            .collect();
        assert_eq!(names, vec!["m_first", "m_second"]);
    }

    #[test]
    fn builtin_unigoal_verification_matches_state() {
        let domain = Domain::new("test");
        let mut state = State::new("s0");
        state.set_var("loc", "b", string_value("room2"));
        let method = &domain.get_task_methods(VERIFY_UNIGOAL_TASK).unwrap()[0];
        let ok = method.call(&state, &[string_value("loc"), string_value("b"), string_value("room2")]);
        assert_eq!(ok, Some(vec![]));
        let bad = method.call(&state, &[string_value("loc"), string_value("b"), string_value("room3")]);
        assert_eq!(bad, None);
    }
}
