//! Deterministic shortest paths and movement-range queries.
//!
//! Uniform-cost search over open cells with terrain multipliers. All
//! tie-breaks fall back to coordinate order, so the same query on the same
//! state always yields the same answer. "No route" is an empty path, never an
//! error: the decision layer treats blocked movement as something to route
//! around, not something to fail on.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use crate::combatant::CombatantId;
use crate::grid::{BattleGrid, HexCoord};

/// Search bookkeeping for one reached cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathNode {
    pub cost: u32,
    parent: Option<HexCoord>,
}

/// Every cell reachable from a start point, with costs and parent pointers.
#[derive(Clone, Debug, Default)]
pub struct PathMap {
    nodes: BTreeMap<HexCoord, PathNode>,
}

impl PathMap {
    pub fn cost_to(&self, at: HexCoord) -> Option<u32> {
        self.nodes.get(&at).map(|n| n.cost)
    }

    pub fn contains(&self, at: HexCoord) -> bool {
        self.nodes.contains_key(&at)
    }

    /// Reached cells with their costs, in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (HexCoord, u32)> {
        self.nodes.iter().map(|(&at, node)| (at, node.cost))
    }

    /// Reconstructs the path from the start to `goal`, inclusive of both.
    /// Returns an empty vec when `goal` was never reached.
    pub fn path_to(&self, goal: HexCoord) -> Vec<HexCoord> {
        if !self.nodes.contains_key(&goal) {
            return Vec::new();
        }
        let mut path = vec![goal];
        let mut cursor = goal;
        while let Some(parent) = self.nodes.get(&cursor).and_then(|n| n.parent) {
            path.push(parent);
            cursor = parent;
        }
        path.reverse();
        path
    }
}

/// Expands every cell reachable from `from` within `budget` movement points.
///
/// Cost to enter a cell is its terrain multiplier. Cells occupied by anyone
/// other than `mover` stop expansion unless `pass_through` is set (incorporeal
/// movers walk through bodies but still may not stop on them; callers filter
/// stop cells with occupancy checks).
pub fn reachable_set(
    grid: &BattleGrid,
    from: HexCoord,
    budget: u32,
    mover: CombatantId,
    pass_through: bool,
) -> PathMap {
    let mut nodes = BTreeMap::new();
    nodes.insert(
        from,
        PathNode {
            cost: 0,
            parent: None,
        },
    );
    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse((0u32, from)));

    while let Some(Reverse((cost, at))) = frontier.pop() {
        if nodes.get(&at).is_some_and(|n| n.cost < cost) {
            continue; // stale queue entry
        }
        for next in grid.neighbors(at) {
            let Some(step) = grid.move_cost(next) else {
                continue;
            };
            if let Some(by) = grid.occupant(next)
                && by != mover
                && !pass_through
            {
                continue;
            }
            let total = cost.saturating_add(step);
            if total > budget {
                continue;
            }
            if nodes.get(&next).is_none_or(|n| total < n.cost) {
                nodes.insert(
                    next,
                    PathNode {
                        cost: total,
                        parent: Some(at),
                    },
                );
                frontier.push(Reverse((total, next)));
            }
        }
    }
    PathMap { nodes }
}

/// Cheapest path from `from` to `to`, inclusive of both endpoints.
///
/// `from == to` yields the single-cell path. An unreachable goal yields an
/// empty vec.
pub fn shortest_path(
    grid: &BattleGrid,
    from: HexCoord,
    to: HexCoord,
    mover: CombatantId,
    pass_through: bool,
) -> Vec<HexCoord> {
    if from == to {
        return vec![from];
    }
    if !grid.contains(to) {
        return Vec::new();
    }
    reachable_set(grid, from, u32::MAX, mover, pass_through).path_to(to)
}

/// Trims a path to what `budget` movement points can pay for.
///
/// The first cell (the mover's own) is free; each later cell charges its
/// terrain cost. The prefix always keeps at least the starting cell.
pub fn truncate_for_budget(grid: &BattleGrid, path: &[HexCoord], budget: u32) -> Vec<HexCoord> {
    let mut out = Vec::with_capacity(path.len());
    let mut spent = 0u32;
    for (i, &at) in path.iter().enumerate() {
        if i == 0 {
            out.push(at);
            continue;
        }
        let Some(step) = grid.move_cost(at) else {
            break;
        };
        if spent + step > budget {
            break;
        }
        spent += step;
        out.push(at);
    }
    out
}
