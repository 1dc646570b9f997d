//! `seek_plan`: the recursive backtracking workhorse, and its iterative
//! twin. Both implement the same four refinement routines over the same
//! domain tables; the iterative form trades the call stack for an explicit
//! `Vec<Frame>` so that deep domains don't depend on tail-call elimination
//! Rust doesn't provide (spec §9, "Recursion depth").
//!
//! Every refiner returns `Result<Option<Plan>>`: `Err` is a fatal domain
//! error that aborts the whole search, `Ok(None)` is the Failure sentinel
//! (try the next alternative), `Ok(Some(plan))` is success. These three
//! states are never collapsed into each other.

use super::verification::{verify_multigoal, verify_unigoal};
use super::{todo_list_to_string, verbose_print, Planner};
use crate::core::{Plan, PlanItem, State, StateValue, TodoList, VerifyKind};
use crate::error::{PlannerError, Result};

pub fn seek_plan_recursive(
    planner: &Planner,
    state: State,
    mut todo_list: TodoList,
    plan: Plan,
    depth: usize,
) -> Result<Option<Plan>> {
    if let Some(max) = planner.max_depth() {
        if depth > max {
            verbose_print(2, "SEEK", &format!("depth {depth} exceeds max_depth {max}, failing"));
            return Ok(None);
        }
    }
    verbose_print(
        2,
        "SEEK",
        &format!("depth {depth}: todo {}", todo_list_to_string(&todo_list)),
    );

    if todo_list.is_empty() {
        return Ok(Some(plan));
    }
    let item = todo_list.remove(0);
    let rest = todo_list;

    match item {
        PlanItem::Multigoal(goal) => refine_multigoal_and_continue(planner, state, &goal, rest, plan, depth),
        PlanItem::Verify(kind) => apply_verify_and_continue(planner, state, kind, rest, plan, depth),
        PlanItem::Action(name, args) => apply_action_and_continue(planner, state, &name, &args, rest, plan, depth),
        PlanItem::Unigoal(var_name, arg, value) => {
            refine_unigoal_and_continue(planner, state, &var_name, &arg, &value, rest, plan, depth)
        }
        PlanItem::Task(name, args) => dispatch_task(planner, state, &name, &args, rest, plan, depth),
    }
}

/// Task items are dispatched by head-symbol lookup (spec §4.5): an action
/// name takes priority (matches the teacher's convention of letting a
/// primitive be invoked through the same `Task(...)` constructor callers
/// use for compound tasks), otherwise a registered task name, otherwise
/// the item is uninterpretable in this domain.
fn dispatch_task(
    planner: &Planner,
    state: State,
    name: &str,
    args: &[StateValue],
    rest: TodoList,
    plan: Plan,
    depth: usize,
) -> Result<Option<Plan>> {
    if planner.domain().has_action(name) {
        apply_action_and_continue(planner, state, name, args, rest, plan, depth)
    } else if planner.domain().has_task_methods(name) {
        refine_task_and_continue(planner, state, name, args, rest, plan, depth)
    } else {
        Err(PlannerError::uninterpretable_item(name, depth))
    }
}

fn apply_action_and_continue(
    planner: &Planner,
    state: State,
    name: &str,
    args: &[StateValue],
    rest: TodoList,
    plan: Plan,
    depth: usize,
) -> Result<Option<Plan>> {
    let action = planner
        .domain()
        .get_action(name)
        .cloned()
        .ok_or_else(|| PlannerError::unknown_action(name))?;

    let mut working = state.clone();
    match action(&mut working, args) {
        None => {
            verbose_print(2, "SEEK", &format!("depth {depth}: action '{name}' not applicable"));
            Ok(None)
        }
        Some(new_state) => {
            let mut new_plan = plan;
            new_plan.push(PlanItem::Action(name.to_string(), args.to_vec()));
            seek_plan_recursive(planner, new_state, rest, new_plan, depth + 1)
        }
    }
}

fn refine_task_and_continue(
    planner: &Planner,
    state: State,
    name: &str,
    args: &[StateValue],
    rest: TodoList,
    plan: Plan,
    depth: usize,
) -> Result<Option<Plan>> {
    let methods = planner
        .domain()
        .get_task_methods(name)
        .ok_or_else(|| PlannerError::uninterpretable_item(name, depth))?;

    for method in methods {
        match method.call(&state, args) {
            None => continue,
            Some(subtasks) => {
                let mut continuation = subtasks;
                continuation.extend(rest.iter().cloned());
                if let Some(result_plan) =
                    seek_plan_recursive(planner, state.clone(), continuation, plan.clone(), depth + 1)?
                {
                    return Ok(Some(result_plan));
                }
            }
        }
    }
    Ok(None)
}

fn refine_unigoal_and_continue(
    planner: &Planner,
    state: State,
    var_name: &str,
    arg: &str,
    value: &StateValue,
    rest: TodoList,
    plan: Plan,
    depth: usize,
) -> Result<Option<Plan>> {
    if state.satisfies_unigoal(var_name, arg, value) {
        return seek_plan_recursive(planner, state, rest, plan, depth + 1);
    }

    // No registered methods for this variable is an ordinary Failure, not a
    // fatal error: a method may speculatively emit unigoals over several
    // variables and only some need to resolve via this branch.
    let Some(methods) = planner.domain().get_unigoal_methods(var_name) else {
        return Ok(None);
    };

    for method in methods {
        match method.call(&state, arg, value) {
            None => continue,
            Some(subgoals) => {
                let mut continuation = subgoals;
                if planner.verify_goals() {
                    continuation.push(PlanItem::Verify(VerifyKind::Unigoal {
                        method_name: method.name().to_string(),
                        var_name: var_name.to_string(),
                        arg: arg.to_string(),
                        desired: value.clone(),
                        depth,
                    }));
                }
                continuation.extend(rest.iter().cloned());
                if let Some(result_plan) =
                    seek_plan_recursive(planner, state.clone(), continuation, plan.clone(), depth + 1)?
                {
                    return Ok(Some(result_plan));
                }
            }
        }
    }
    Ok(None)
}

fn refine_multigoal_and_continue(
    planner: &Planner,
    state: State,
    goal: &crate::core::Multigoal,
    rest: TodoList,
    plan: Plan,
    depth: usize,
) -> Result<Option<Plan>> {
    for method in planner.domain().get_multigoal_methods() {
        match method.call(&state, goal) {
            None => continue,
            Some(subitems) => {
                let mut continuation = subitems;
                if planner.verify_goals() {
                    continuation.push(PlanItem::Verify(VerifyKind::Multigoal {
                        method_name: method.name().to_string(),
                        goal: goal.clone(),
                        depth,
                    }));
                }
                continuation.extend(rest.iter().cloned());
                if let Some(result_plan) =
                    seek_plan_recursive(planner, state.clone(), continuation, plan.clone(), depth + 1)?
                {
                    return Ok(Some(result_plan));
                }
            }
        }
    }
    Ok(None)
}

fn apply_verify_and_continue(
    planner: &Planner,
    state: State,
    kind: VerifyKind,
    rest: TodoList,
    plan: Plan,
    depth: usize,
) -> Result<Option<Plan>> {
    let ok = match &kind {
        VerifyKind::Unigoal {
            method_name,
            var_name,
            arg,
            desired,
            depth: checked_depth,
        } => verify_unigoal(&state, method_name, var_name, arg, desired, *checked_depth).is_some(),
        VerifyKind::Multigoal {
            method_name,
            goal,
            depth: checked_depth,
        } => verify_multigoal(&state, method_name, goal, *checked_depth).is_some(),
    };
    if ok {
        seek_plan_recursive(planner, state, rest, plan, depth + 1)
    } else {
        Ok(None)
    }
}

// --- Iterative strategy -----------------------------------------------

struct Frame {
    state: State,
    todo: TodoList,
    plan: Plan,
    depth: usize,
}

pub fn seek_plan_iterative(planner: &Planner, state: State, todo_list: TodoList) -> Result<Option<Plan>> {
    let mut stack = vec![Frame {
        state,
        todo: todo_list,
        plan: vec![],
        depth: 0,
    }];

    while let Some(frame) = stack.pop() {
        if let Some(max) = planner.max_depth() {
            if frame.depth > max {
                continue;
            }
        }
        if frame.todo.is_empty() {
            return Ok(Some(frame.plan));
        }

        let Frame { state, mut todo, plan, depth } = frame;
        let item = todo.remove(0);
        let rest = todo;

        match item {
            PlanItem::Action(name, args) => push_action(planner, &mut stack, state, &name, &args, rest, plan, depth)?,
            PlanItem::Task(name, args) => {
                if planner.domain().has_action(&name) {
                    push_action(planner, &mut stack, state, &name, &args, rest, plan, depth)?;
                } else if planner.domain().has_task_methods(&name) {
                    push_task_alternatives(planner, &mut stack, &state, &name, &args, &rest, &plan, depth);
                } else {
                    return Err(PlannerError::uninterpretable_item(name, depth));
                }
            }
            PlanItem::Unigoal(var_name, arg, value) => {
                push_unigoal_alternatives(planner, &mut stack, &state, &var_name, &arg, &value, &rest, &plan, depth)?;
            }
            PlanItem::Multigoal(goal) => {
                push_multigoal_alternatives(planner, &mut stack, &state, &goal, &rest, &plan, depth);
            }
            PlanItem::Verify(kind) => push_verify(&mut stack, state, kind, rest, plan, depth),
        }
    }
    Ok(None)
}

fn push_action(
    planner: &Planner,
    stack: &mut Vec<Frame>,
    state: State,
    name: &str,
    args: &[StateValue],
    rest: TodoList,
    plan: Plan,
    depth: usize,
) -> Result<()> {
    let action = planner
        .domain()
        .get_action(name)
        .cloned()
        .ok_or_else(|| PlannerError::unknown_action(name))?;
    let mut working = state.clone();
    if let Some(new_state) = action(&mut working, args) {
        let mut new_plan = plan;
        new_plan.push(PlanItem::Action(name.to_string(), args.to_vec()));
        stack.push(Frame {
            state: new_state,
            todo: rest,
            plan: new_plan,
            depth: depth + 1,
        });
    }
    Ok(())
}

/// Alternatives are pushed in reverse declaration order so that the first
/// declared method ends up on top of the stack and is tried first,
/// matching the recursive strategy's try-in-declaration-order semantics.
fn push_task_alternatives(
    planner: &Planner,
    stack: &mut Vec<Frame>,
    state: &State,
    name: &str,
    args: &[StateValue],
    rest: &TodoList,
    plan: &Plan,
    depth: usize,
) {
    let Some(methods) = planner.domain().get_task_methods(name) else {
        return;
    };
    for method in methods.iter().rev() {
        if let Some(subtasks) = method.call(state, args) {
            let mut continuation = subtasks;
            continuation.extend(rest.iter().cloned());
            stack.push(Frame {
                state: state.clone(),
                todo: continuation,
                plan: plan.clone(),
                depth: depth + 1,
            });
        }
    }
}

fn push_unigoal_alternatives(
    planner: &Planner,
    stack: &mut Vec<Frame>,
    state: &State,
    var_name: &str,
    arg: &str,
    value: &StateValue,
    rest: &TodoList,
    plan: &Plan,
    depth: usize,
) -> Result<()> {
    if state.satisfies_unigoal(var_name, arg, value) {
        stack.push(Frame {
            state: state.clone(),
            todo: rest.clone(),
            plan: plan.clone(),
            depth: depth + 1,
        });
        return Ok(());
    }

    // No registered methods for this variable is an ordinary Failure: push
    // nothing, and the caller's stack simply has one fewer branch to try.
    let Some(methods) = planner.domain().get_unigoal_methods(var_name) else {
        return Ok(());
    };

    for method in methods.iter().rev() {
        if let Some(subgoals) = method.call(state, arg, value) {
            let mut continuation = subgoals;
            if planner.verify_goals() {
                continuation.push(PlanItem::Verify(VerifyKind::Unigoal {
                    method_name: method.name().to_string(),
                    var_name: var_name.to_string(),
                    arg: arg.to_string(),
                    desired: value.clone(),
                    depth,
                }));
            }
            continuation.extend(rest.iter().cloned());
            stack.push(Frame {
                state: state.clone(),
                todo: continuation,
                plan: plan.clone(),
                depth: depth + 1,
            });
        }
    }
    Ok(())
}

fn push_multigoal_alternatives(
    planner: &Planner,
    stack: &mut Vec<Frame>,
    state: &State,
    goal: &crate::core::Multigoal,
    rest: &TodoList,
    plan: &Plan,
    depth: usize,
) {
    for method in planner.domain().get_multigoal_methods().iter().rev() {
        if let Some(subitems) = method.call(state, goal) {
            let mut continuation = subitems;
            if planner.verify_goals() {
                continuation.push(PlanItem::Verify(VerifyKind::Multigoal {
                    method_name: method.name().to_string(),
                    goal: goal.clone(),
                    depth,
                }));
            }
            continuation.extend(rest.iter().cloned());
            stack.push(Frame {
                state: state.clone(),
                todo: continuation,
                plan: plan.clone(),
                depth: depth + 1,
            });
        }
    }
}

fn push_verify(stack: &mut Vec<Frame>, state: State, kind: VerifyKind, rest: TodoList, plan: Plan, depth: usize) {
    let ok = match &kind {
        VerifyKind::Unigoal {
            method_name,
            var_name,
            arg,
            desired,
            depth: checked_depth,
        } => verify_unigoal(&state, method_name, var_name, arg, desired, *checked_depth).is_some(),
        VerifyKind::Multigoal {
            method_name,
            goal,
            depth: checked_depth,
        } => verify_multigoal(&state, method_name, goal, *checked_depth).is_some(),
    };
    if ok {
        stack.push(Frame {
            state,
            todo: rest,
            plan,
            depth: depth + 1,
        });
    }
}
