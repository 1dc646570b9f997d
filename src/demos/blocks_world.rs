//! Blocks world (HGN): the Gupta-Nau near-optimal blocks-stacking algorithm,
//! expressed as a genuine multigoal method instead of passing goal-registry
//! IDs as task arguments (spec §9's documented workaround, no longer
//! needed now that `PlanItem::Multigoal` carries a `Multigoal` directly).
//!
//! N. Gupta and D. S. Nau. "On the complexity of blocks-world planning."
//! *Artificial Intelligence* 56(2-3):223-254, 1992.

use crate::core::{string_value, Domain, Multigoal, PlanItem, State, StateValue};
use crate::error::Result;

pub fn create_blocks_world_domain() -> Result<Domain> {
    let mut domain = Domain::new("blocks_world");

    domain.declare_action("pickup", |state: &mut State, args: &[StateValue]| {
        let block = args.first()?.as_str()?;
        let pos = state.get_var("pos", block)?;
        let clear = state.get_var("clear", block)?.as_bool()?;
        let holding = state.get_var("holding", "hand")?.as_bool()?;
        if pos.as_str() != Some("table") || !clear || holding {
            return None;
        }
        state.set_var("pos", block, string_value("hand"));
        state.set_var("clear", block, false.into());
        state.set_var("holding", "hand", string_value(block));
        Some(state.clone())
    })?;

    domain.declare_action("unstack", |state: &mut State, args: &[StateValue]| {
        let block1 = args.first()?.as_str()?;
        let block2 = args.get(1)?.as_str()?;
        let pos = state.get_var("pos", block1)?;
        let clear = state.get_var("clear", block1)?.as_bool()?;
        let holding = state.get_var("holding", "hand")?.as_bool()?;
        if pos.as_str() != Some(block2) || block2 == "table" || !clear || holding {
            return None;
        }
        state.set_var("pos", block1, string_value("hand"));
        state.set_var("clear", block1, false.into());
        state.set_var("holding", "hand", string_value(block1));
        state.set_var("clear", block2, true.into());
        Some(state.clone())
    })?;

    domain.declare_action("putdown", |state: &mut State, args: &[StateValue]| {
        let block = args.first()?.as_str()?;
        let pos = state.get_var("pos", block)?;
        if pos.as_str() != Some("hand") {
            return None;
        }
        state.set_var("pos", block, string_value("table"));
        state.set_var("clear", block, true.into());
        state.set_var("holding", "hand", false.into());
        Some(state.clone())
    })?;

    domain.declare_action("stack", |state: &mut State, args: &[StateValue]| {
        let block1 = args.first()?.as_str()?;
        let block2 = args.get(1)?.as_str()?;
        let pos1 = state.get_var("pos", block1)?;
        let clear2 = state.get_var("clear", block2)?.as_bool()?;
        if pos1.as_str() != Some("hand") || !clear2 {
            return None;
        }
        state.set_var("pos", block1, string_value(block2));
        state.set_var("clear", block1, true.into());
        state.set_var("holding", "hand", false.into());
        state.set_var("clear", block2, false.into());
        Some(state.clone())
    })?;

    domain.declare_task_method("take", "m_take", |state: &State, args: &[StateValue]| {
        let block = args.first()?.as_str()?;
        take(state, block)
    })?;

    domain.declare_task_method("put", "m_put", |state: &State, args: &[StateValue]| {
        let block = args.first()?.as_str()?;
        let dest = args.get(1)?.as_str()?;
        put(state, block, dest)
    })?;

    domain.declare_multigoal_method("m_moveblocks", move_blocks)?;

    Ok(domain)
}

/// A block never needs to move again once it and everything beneath it
/// are already at their goal positions.
fn is_done(block: &str, state: &State, goal: &Multigoal) -> bool {
    if block == "table" {
        return true;
    }
    if let (Some(goal_pos), Some(current_pos)) = (goal.get_goal("pos", block), state.get_var("pos", block)) {
        if goal_pos != current_pos {
            return false;
        }
    }
    match state.get_var("pos", block).and_then(StateValue::as_str) {
        Some("table") | None => true,
        Some(below) => is_done(below, state, goal),
    }
}

#[derive(PartialEq, Eq, Debug)]
enum BlockStatus {
    Done,
    Inaccessible,
    MoveToTable,
    MoveToBlock,
    Waiting,
}

fn status(block: &str, state: &State, goal: &Multigoal) -> BlockStatus {
    if is_done(block, state, goal) {
        return BlockStatus::Done;
    }
    if state.get_var("clear", block).and_then(StateValue::as_bool) != Some(true) {
        return BlockStatus::Inaccessible;
    }
    let Some(goal_pos) = goal.get_goal("pos", block).and_then(StateValue::as_str) else {
        return BlockStatus::MoveToTable;
    };
    if goal_pos == "table" {
        return BlockStatus::MoveToTable;
    }
    if is_done(goal_pos, state, goal) && state.get_var("clear", goal_pos).and_then(StateValue::as_bool) == Some(true) {
        BlockStatus::MoveToBlock
    } else {
        BlockStatus::Waiting
    }
}

fn all_clear_blocks(state: &State) -> Vec<String> {
    state
        .get_var_map("clear")
        .map(|clear| clear.iter().filter(|(_, v)| v.as_bool() == Some(true)).map(|(k, _)| k.clone()).collect())
        .unwrap_or_default()
}

/// The Gupta-Nau decomposition: prefer a block that can go straight to its
/// final position, otherwise clear a waiting block out of the way, else
/// the goal is already met.
fn move_blocks(state: &State, goal: &Multigoal) -> Option<Vec<PlanItem>> {
    for block in all_clear_blocks(state) {
        match status(&block, state, goal) {
            BlockStatus::MoveToBlock => {
                let target = goal.get_goal("pos", &block)?.clone();
                return Some(vec![
                    PlanItem::task("take", vec![string_value(&block)]),
                    PlanItem::task("put", vec![string_value(&block), target]),
                    PlanItem::multigoal(goal.clone()),
                ]);
            }
            BlockStatus::MoveToTable => {
                return Some(vec![
                    PlanItem::task("take", vec![string_value(&block)]),
                    PlanItem::task("put", vec![string_value(&block), string_value("table")]),
                    PlanItem::multigoal(goal.clone()),
                ]);
            }
            _ => {}
        }
    }

    for block in all_clear_blocks(state) {
        if status(&block, state, goal) == BlockStatus::Waiting && state.get_var("pos", &block).and_then(StateValue::as_str) != Some("table") {
            return Some(vec![
                PlanItem::task("take", vec![string_value(&block)]),
                PlanItem::task("put", vec![string_value(&block), string_value("table")]),
                PlanItem::multigoal(goal.clone()),
            ]);
        }
    }

    Some(vec![])
}

fn take(state: &State, block: &str) -> Option<Vec<PlanItem>> {
    match state.get_var("pos", block)?.as_str()? {
        "table" => Some(vec![PlanItem::action("pickup", vec![string_value(block)])]),
        under => Some(vec![PlanItem::action("unstack", vec![string_value(block), string_value(under)])]),
    }
}

fn put(state: &State, block: &str, dest: &str) -> Option<Vec<PlanItem>> {
    if state.get_var("pos", block)?.as_str()? != "hand" {
        return None;
    }
    if dest == "table" {
        Some(vec![PlanItem::action("putdown", vec![string_value(block)])])
    } else {
        Some(vec![PlanItem::action("stack", vec![string_value(block), string_value(dest)])])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::PlannerBuilder;

    fn state_abc_on_table() -> State {
        let mut state = State::new("s0");
        for block in ["a", "b", "c"] {
            state.set_var("pos", block, string_value("table"));
            state.set_var("clear", block, true.into());
        }
        state.set_var("holding", "hand", false.into());
        state
    }

    fn sussman_state() -> State {
        let mut state = State::new("sussman");
        state.set_var("pos", "a", string_value("table"));
        state.set_var("pos", "b", string_value("table"));
        state.set_var("pos", "c", string_value("a"));
        state.set_var("clear", "a", false.into());
        state.set_var("clear", "b", true.into());
        state.set_var("clear", "c", true.into());
        state.set_var("holding", "hand", false.into());
        state
    }

    fn sussman_goal() -> Multigoal {
        let mut goal = Multigoal::new("sussman_goal");
        goal.set_goal("pos", "a", string_value("b"));
        goal.set_goal("pos", "b", string_value("c"));
        goal
    }

    #[test]
    fn pickup_requires_the_block_to_be_on_the_table_and_clear() {
        let domain = create_blocks_world_domain().unwrap();
        let planner = PlannerBuilder::new().with_domain(domain).build().unwrap();

        let mut not_clear = State::new("s0");
        not_clear.set_var("pos", "a", string_value("table"));
        not_clear.set_var("pos", "c", string_value("a"));
        not_clear.set_var("clear", "a", false.into());
        not_clear.set_var("clear", "c", true.into());
        not_clear.set_var("holding", "hand", false.into());

        let plan = planner.find_plan(not_clear, vec![PlanItem::action("pickup", vec![string_value("a")])]).unwrap();
        assert_eq!(plan, None);
    }

    #[test]
    fn take_prefers_unstack_when_the_block_sits_on_another_block() {
        let domain = create_blocks_world_domain().unwrap();
        let planner = PlannerBuilder::new().with_domain(domain).build().unwrap();
        let plan = planner.find_plan(sussman_state(), vec![PlanItem::task("take", vec![string_value("c")])]).unwrap().unwrap();
        assert_eq!(plan, vec![PlanItem::action("unstack", vec![string_value("c"), string_value("a")])]);
    }

    #[test]
    fn sussman_anomaly_is_solved_by_the_multigoal_splitting_method() {
        let domain = create_blocks_world_domain().unwrap();
        let planner = PlannerBuilder::new().with_domain(domain).build().unwrap();
        let plan = planner
            .find_plan(sussman_state(), vec![PlanItem::multigoal(sussman_goal())])
            .unwrap()
            .unwrap();

        let mut state = sussman_state();
        for item in &plan {
            let PlanItem::Action(name, args) = item else { continue };
            state = planner.domain().get_action(name).unwrap()(&mut state.clone(), args).unwrap();
        }
        assert_eq!(state.get_var("pos", "a"), Some(&string_value("b")));
        assert_eq!(state.get_var("pos", "b"), Some(&string_value("c")));
    }

    #[test]
    fn already_satisfied_multigoal_needs_no_actions() {
        let domain = create_blocks_world_domain().unwrap();
        let planner = PlannerBuilder::new().with_domain(domain).build().unwrap();
        let mut goal = Multigoal::new("trivial");
        goal.set_goal("pos", "a", string_value("table"));
        let plan = planner.find_plan(state_abc_on_table(), vec![PlanItem::multigoal(goal)]).unwrap().unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn status_classifies_blocks_per_the_gupta_nau_algorithm() {
        let goal = sussman_goal();
        let state = sussman_state();
        assert_eq!(status("a", &state, &goal), BlockStatus::Inaccessible);
        assert_eq!(status("c", &state, &goal), BlockStatus::MoveToTable);
    }
}
