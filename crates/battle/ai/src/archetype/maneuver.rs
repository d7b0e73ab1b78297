//! Movement planning shared by the archetype trees: approaches, retreats,
//! and firing positions.
//!
//! Everything here plans on anchor cells. Full footprints are enforced when
//! the executor actually relocates the body, and a plan the grid rejects is
//! a stall the controller already knows how to end.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use battle_core::{
    ActionIntent, BattleGrid, CombatantId, HexCoord, PathMap, reachable_set, sight_line,
    truncate_for_budget,
};

use crate::context::AiContext;

/// Cells the actor can reach with `budget` movement points.
pub(crate) fn travel_map(ctx: &AiContext<'_>, budget: u32) -> PathMap {
    reachable_set(
        &ctx.state.grid,
        ctx.anchor(),
        budget,
        ctx.actor,
        ctx.actor().passes_through(),
    )
}

/// Whether the actor may end a move on `at`. Cells held by the actor's own
/// footprint count as free.
pub(crate) fn stoppable(ctx: &AiContext<'_>, at: HexCoord) -> bool {
    ctx.state.grid.occupant(at).is_none_or(|by| by == ctx.actor)
}

/// In-bounds cells bordering the target's footprint, in coordinate order.
fn adjacent_goals(ctx: &AiContext<'_>, target: CombatantId) -> Vec<HexCoord> {
    let Some(cells) = ctx.state.combatant(target).and_then(|c| c.footprint()) else {
        return Vec::new();
    };
    let mut goals = BTreeSet::new();
    for &cell in &cells {
        for n in ctx.state.grid.neighbors(cell) {
            goals.insert(n);
        }
    }
    for &cell in &cells {
        goals.remove(&cell);
    }
    goals.into_iter().collect()
}

/// The grid as it will look once the actor has left its current cells.
/// Sight checks from prospective positions use this so the mover's own body
/// never counts as an obstacle.
fn ghost_grid(ctx: &AiContext<'_>) -> BattleGrid {
    let mut grid = ctx.state.grid.clone();
    if let Some(cells) = ctx.actor().footprint() {
        grid.vacate(ctx.actor, &cells);
    }
    grid
}

/// True when the actor can stand adjacent to `target` within this action's
/// movement, which is what makes a charge possible.
pub(crate) fn can_reach_adjacent(ctx: &AiContext<'_>, target: CombatantId) -> bool {
    let map = travel_map(ctx, ctx.actor().movement);
    adjacent_goals(ctx, target)
        .into_iter()
        .any(|goal| map.contains(goal) && stoppable(ctx, goal))
}

/// Walks toward the cheapest cell adjacent to the target, as far as this
/// action's movement allows. `None` when no route exists or no progress can
/// be made.
pub(crate) fn approach(ctx: &AiContext<'_>, target: CombatantId) -> Option<ActionIntent> {
    let unbounded = travel_map(ctx, u32::MAX);
    let mut best: Option<(u32, HexCoord)> = None;
    for goal in adjacent_goals(ctx, target) {
        if !stoppable(ctx, goal) {
            continue;
        }
        let Some(cost) = unbounded.cost_to(goal) else {
            continue;
        };
        if best.is_none_or(|(b, _)| cost < b) {
            best = Some((cost, goal));
        }
    }
    let (_, goal) = best?;

    let full = unbounded.path_to(goal);
    let mut path = truncate_for_budget(&ctx.state.grid, &full, ctx.actor().movement);
    // The turn may end mid-route; back off cells the actor cannot stop on.
    while path.len() > 1 {
        let Some(&tail) = path.last() else {
            break;
        };
        if stoppable(ctx, tail) {
            break;
        }
        path.pop();
    }
    (path.len() > 1).then_some(ActionIntent::Move { path })
}

/// Falls back from `threat`: picks a reachable cell strictly farther away,
/// preferring cells that keep a clear shot, then distance, then low cost.
/// `None` when nothing increases separation.
pub(crate) fn retreat_from(ctx: &AiContext<'_>, threat: CombatantId) -> Option<ActionIntent> {
    let here = ctx.anchor();
    let threat_body = ctx.state.combatant(threat)?;
    let threat_cells = threat_body.footprint()?;
    let threat_anchor = threat_body.anchor()?;
    let cur_sep = ctx.separation(threat)?;
    let shooter = ctx.actor().ranged.is_some();
    let limit = ctx.config.shot_obstruction_limit;
    let ghost = ghost_grid(ctx);

    let map = travel_map(ctx, ctx.actor().movement);
    let mut best: Option<(bool, u32, Reverse<u32>, HexCoord)> = None;
    for (cell, cost) in map.iter() {
        if cell == here || !stoppable(ctx, cell) {
            continue;
        }
        let Some(sep) = threat_cells.iter().map(|&t| cell.distance(t)).min() else {
            continue;
        };
        if sep <= cur_sep {
            continue;
        }
        let keeps_shot = shooter && sight_line(&ghost, cell, threat_anchor, limit).can_shoot;
        let key = (keeps_shot, sep, Reverse(cost));
        if best.is_none_or(|(s, d, c, _)| key > (s, d, c)) {
            best = Some((keeps_shot, sep, Reverse(cost), cell));
        }
    }
    let (_, _, _, cell) = best?;

    let path = map.path_to(cell);
    (path.len() > 1).then_some(ActionIntent::Move { path })
}

/// Moves to the nearest reachable cell with a clear shot at the target,
/// preferring elevated perches. `None` when no reachable cell can shoot.
pub(crate) fn seek_firing_position(
    ctx: &AiContext<'_>,
    target: CombatantId,
) -> Option<ActionIntent> {
    let here = ctx.anchor();
    let mark = ctx.state.combatant(target)?.anchor()?;
    let limit = ctx.config.shot_obstruction_limit;
    let ghost = ghost_grid(ctx);

    let map = travel_map(ctx, ctx.actor().movement);
    let mut best: Option<(bool, Reverse<u32>, HexCoord)> = None;
    for (cell, cost) in map.iter() {
        if cell == here || !stoppable(ctx, cell) {
            continue;
        }
        if !sight_line(&ghost, cell, mark, limit).can_shoot {
            continue;
        }
        let elevated = ctx
            .state
            .grid
            .cell(cell)
            .is_some_and(|c| c.furniture.is_some_and(|f| f.elevated));
        let key = (elevated, Reverse(cost));
        if best.is_none_or(|(e, c, _)| key > (e, c)) {
            best = Some((elevated, Reverse(cost), cell));
        }
    }
    let (_, _, cell) = best?;

    let path = map.path_to(cell);
    (path.len() > 1).then_some(ActionIntent::Move { path })
}
