//! Line-of-sight and line-of-fire resolution.
//!
//! Sight is traced along [`HexCoord::line_to`]. Walls (and the arena edge)
//! stop sight outright. Shot-blocking furniture and interposed bodies leave
//! sight intact but obstruct shots; how many obstructions a shooter tolerates
//! is the caller's policy.

use crate::grid::{BattleGrid, CellFlags, HexCoord};

/// Result of tracing a sight line between two cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SightLine {
    /// No wall interrupts the line.
    pub can_see: bool,
    /// Visible and within the tolerated obstruction count.
    pub can_shoot: bool,
    /// Shot-obstructing props and bodies crossed before the line ended.
    pub obstacles: u32,
}

impl SightLine {
    fn walled(obstacles: u32) -> Self {
        Self {
            can_see: false,
            can_shoot: false,
            obstacles,
        }
    }
}

/// Traces sight from `from` to `to`.
///
/// Both endpoints are exempt: a combatant never obstructs its own view or
/// screens itself. Cells held by the occupants of either endpoint are exempt
/// as well, so large bodies do not block their own lines.
pub fn sight_line(
    grid: &BattleGrid,
    from: HexCoord,
    to: HexCoord,
    obstruction_limit: u32,
) -> SightLine {
    let looker = grid.occupant(from);
    let mark = grid.occupant(to);
    let mut obstacles = 0u32;

    for at in from.line_to(to) {
        if at == from || at == to {
            continue;
        }
        let Some(cell) = grid.cell(at) else {
            return SightLine::walled(obstacles);
        };
        if cell.flags.contains(CellFlags::WALL) {
            return SightLine::walled(obstacles);
        }
        let body = cell.occupant.is_some() && cell.occupant != looker && cell.occupant != mark;
        let screen = cell.furniture.is_some_and(|f| f.blocks_shot);
        if body || screen {
            obstacles += 1;
        }
    }

    SightLine {
        can_see: true,
        can_shoot: obstacles <= obstruction_limit,
        obstacles,
    }
}
