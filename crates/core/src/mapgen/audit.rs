//! Invariant checks applied to generated layouts by tests and the audit binary.

use crate::types::{GridCoordinate, GridSize, RandomCondition, Role};

use super::constrained::MAX_AGENT_DISTANCE_GAP;
use super::grid::manhattan;
use super::model::Layout;
use super::symmetric::SymmetricLayoutGenerator;

pub fn check_common(layout: &Layout, grid_size: GridSize) -> Result<(), String> {
    if let Some((role, coordinate)) =
        layout.roles().find(|&(_, coordinate)| !grid_size.contains(coordinate))
    {
        return Err(format!("{role} at {coordinate} lies outside the {grid_size} grid"));
    }
    if !layout.has_distinct_positions() {
        return Err(format!("roles share a cell: {:?}", layout.positions()));
    }
    Ok(())
}

pub fn check_constrained(layout: &Layout, condition: &RandomCondition) -> Result<(), String> {
    let [Some(player), Some(ai), Some(target1), Some(target2)] =
        Role::ALL.map(|role| layout.get(role))
    else {
        return Err("constrained layout is missing a role".to_string());
    };
    let separation = manhattan(target1, target2);
    if separation < condition.min_distance_between_targets {
        return Err(format!(
            "targets {target1} and {target2} are {separation} apart, need {}",
            condition.min_distance_between_targets
        ));
    }
    let gap = manhattan(player, target2).abs_diff(manhattan(ai, target2));
    if gap > MAX_AGENT_DISTANCE_GAP {
        return Err(format!("target2 {target2} favours one agent by {gap} steps"));
    }
    Ok(())
}

/// The first goal must sit one drawn height along the axis and half a drawn
/// spread across it from the first agent; a second goal must mirror it.
pub fn check_symmetric(
    layout: &Layout,
    generator: &SymmetricLayoutGenerator,
) -> Result<(), String> {
    let agents = layout.agents();
    let Some(&agent) = agents.first() else {
        return Err("symmetric layout has no agent".to_string());
    };
    let Some(target1) = layout.get(Role::Target1) else {
        return Err("symmetric layout has no target1".to_string());
    };
    let heights = drawn_heights(agent, target1, generator);
    if heights.is_empty() {
        return Err(format!(
            "target1 {target1} is not a height {:?} / spread {:?} offset from {agent}",
            generator.heights(),
            generator.spreads()
        ));
    }

    if let &[first, second] = agents.as_slice() {
        if first.row != second.row && first.col != second.col {
            return Err(format!("agents {first} and {second} do not share an axis"));
        }
        let distance = i64::from(manhattan(first, second));
        if !heights.iter().any(|&height| 2 * i64::from(height) == distance) {
            return Err(format!(
                "agents {first} and {second} are {distance} apart, not twice a drawn height"
            ));
        }
    }

    let Some(target2) = layout.get(Role::Target2) else {
        return Ok(());
    };
    let mirrored_across_rows = target1.col == target2.col
        && i64::from(target1.row) + i64::from(target2.row) == 2 * i64::from(agent.row);
    let mirrored_across_cols = target1.row == target2.row
        && i64::from(target1.col) + i64::from(target2.col) == 2 * i64::from(agent.col);
    if !(mirrored_across_rows || mirrored_across_cols) {
        return Err(format!("targets {target1} and {target2} are not mirrored about {agent}"));
    }
    if manhattan(agent, target1) != manhattan(agent, target2) {
        return Err(format!("targets {target1} and {target2} are not equidistant from {agent}"));
    }
    Ok(())
}

/// Heights that, paired with some half spread, move `agent` onto `target`.
fn drawn_heights(
    agent: GridCoordinate,
    target: GridCoordinate,
    generator: &SymmetricLayoutGenerator,
) -> Vec<i32> {
    let rows = agent.row.abs_diff(target.row);
    let cols = agent.col.abs_diff(target.col);
    [(rows, cols), (cols, rows)]
        .into_iter()
        .filter(|&(_, across)| {
            generator.spreads().iter().any(|&spread| spread.div_euclid(2).unsigned_abs() == across)
        })
        .flat_map(|(along, _)| {
            generator.heights().iter().copied().filter(move |height| height.unsigned_abs() == along)
        })
        .collect()
}
