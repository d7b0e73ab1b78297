//! The battlefield arena: cells, walls, furniture, and occupancy.
//!
//! [`BattleGrid`] owns every cell in a radius-R hexagon and is the single
//! authority on who stands where. Occupancy is only mutated through
//! [`BattleGrid::place`], [`BattleGrid::vacate`], and [`BattleGrid::relocate`]
//! so the occupant index can never drift from the roster.

pub mod coord;
pub mod los;
pub mod path;

pub use coord::{Facing, HexCoord};
pub use los::{SightLine, sight_line};
pub use path::{PathMap, PathNode, reachable_set, shortest_path, truncate_for_budget};

use crate::combatant::CombatantId;

bitflags::bitflags! {
    /// Terrain flags for a single cell.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CellFlags: u8 {
        /// Solid wall: blocks movement and sight.
        const WALL = 1;
        /// Impassable ground (rubble, pits): blocks movement, not sight.
        const BLOCKED = 1 << 1;
    }
}

/// A prop standing in a cell. Props never block movement on their own; pair
/// them with [`CellFlags::BLOCKED`] for barricades nobody can climb.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Furniture {
    /// Crossing shots are obstructed by this prop.
    pub blocks_shot: bool,
    /// Standing on this prop grants a height advantage.
    pub elevated: bool,
}

impl Furniture {
    /// Low cover that interferes with shots but can be stood on.
    pub const SCREEN: Self = Self {
        blocks_shot: true,
        elevated: false,
    };

    /// A climbable vantage point (crates, rocks, low walls).
    pub const PERCH: Self = Self {
        blocks_shot: false,
        elevated: true,
    };
}

/// One cell of the battlefield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub flags: CellFlags,
    /// Cost multiplier for entering this cell. Always at least 1.
    pub move_cost: u8,
    pub occupant: Option<CombatantId>,
    pub furniture: Option<Furniture>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            flags: CellFlags::empty(),
            move_cost: 1,
            occupant: None,
            furniture: None,
        }
    }
}

impl Cell {
    /// True when combatants can stand in this cell (ignoring occupancy).
    pub fn is_open(&self) -> bool {
        !self.flags.intersects(CellFlags::WALL | CellFlags::BLOCKED)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("cell {at} is out of bounds")]
    OutOfBounds { at: HexCoord },

    #[error("cell {at} is a wall")]
    Wall { at: HexCoord },

    #[error("cell {at} is impassable")]
    Impassable { at: HexCoord },

    #[error("cell {at} is occupied by {by}")]
    Occupied { at: HexCoord, by: CombatantId },

    #[error("combatant {id} is not in the battle")]
    Unknown { id: CombatantId },

    #[error("combatant {id} is not fielded")]
    NotFielded { id: CombatantId },

    #[error("combatant {id} is already fielded")]
    AlreadyFielded { id: CombatantId },
}

/// Dense hexagonal cell arena.
///
/// Cells are stored row by row (`r` from `-radius` to `radius`) in one `Vec`,
/// with a per-row offset table mapping coordinates to indices.
#[derive(Clone, Debug)]
pub struct BattleGrid {
    radius: i32,
    row_starts: Vec<usize>,
    cells: Vec<Cell>,
}

impl BattleGrid {
    /// Builds an empty hexagon-shaped arena of the given radius.
    pub fn hexagon(radius: u32) -> Self {
        let radius = radius as i32;
        let mut row_starts = Vec::with_capacity((2 * radius + 2) as usize);
        let mut total = 0usize;
        for r in -radius..=radius {
            row_starts.push(total);
            let lo = (-radius).max(-r - radius);
            let hi = radius.min(-r + radius);
            total += (hi - lo + 1) as usize;
        }
        Self {
            radius,
            row_starts,
            cells: vec![Cell::default(); total],
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius as u32
    }

    /// Number of cells in the arena.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, at: HexCoord) -> bool {
        at.q().abs() <= self.radius && at.r().abs() <= self.radius && at.s().abs() <= self.radius
    }

    fn index_of(&self, at: HexCoord) -> Option<usize> {
        if !self.contains(at) {
            return None;
        }
        let row = (at.r() + self.radius) as usize;
        let lo = (-self.radius).max(-at.r() - self.radius);
        Some(self.row_starts[row] + (at.q() - lo) as usize)
    }

    pub fn cell(&self, at: HexCoord) -> Option<&Cell> {
        self.index_of(at).map(|i| &self.cells[i])
    }

    fn cell_mut(&mut self, at: HexCoord) -> Option<&mut Cell> {
        self.index_of(at).map(move |i| &mut self.cells[i])
    }

    /// In-bounds neighbors of a cell, in facing order.
    pub fn neighbors(&self, at: HexCoord) -> impl Iterator<Item = HexCoord> {
        at.neighbors().into_iter().filter(|&n| self.contains(n))
    }

    /// Off-map cells count as walls: they block movement and sight alike.
    pub fn is_wall(&self, at: HexCoord) -> bool {
        self.cell(at)
            .is_none_or(|c| c.flags.contains(CellFlags::WALL))
    }

    /// Impassable terrain that is not a wall (rubble, pits). Blocks movement
    /// but never sight.
    pub fn is_blocked(&self, at: HexCoord) -> bool {
        self.cell(at)
            .is_some_and(|c| c.flags.contains(CellFlags::BLOCKED))
    }

    pub fn is_occupied(&self, at: HexCoord) -> bool {
        self.occupant(at).is_some()
    }

    pub fn occupant(&self, at: HexCoord) -> Option<CombatantId> {
        self.cell(at).and_then(|c| c.occupant)
    }

    /// Cost of entering a cell, or `None` when the terrain forbids it.
    ///
    /// Occupancy is deliberately not considered here; the pathfinder layers
    /// that on per mover.
    pub fn move_cost(&self, at: HexCoord) -> Option<u32> {
        let cell = self.cell(at)?;
        cell.is_open().then_some(cell.move_cost as u32)
    }

    // ========================================================================
    // Terrain shaping (battle setup)
    // ========================================================================

    pub fn raise_wall(&mut self, at: HexCoord) -> Result<(), PlacementError> {
        let cell = self.cell_mut(at).ok_or(PlacementError::OutOfBounds { at })?;
        cell.flags.insert(CellFlags::WALL);
        Ok(())
    }

    pub fn block(&mut self, at: HexCoord) -> Result<(), PlacementError> {
        let cell = self.cell_mut(at).ok_or(PlacementError::OutOfBounds { at })?;
        cell.flags.insert(CellFlags::BLOCKED);
        Ok(())
    }

    /// Sets the terrain cost multiplier for a cell (clamped to at least 1).
    pub fn set_move_cost(&mut self, at: HexCoord, cost: u8) -> Result<(), PlacementError> {
        let cell = self.cell_mut(at).ok_or(PlacementError::OutOfBounds { at })?;
        cell.move_cost = cost.max(1);
        Ok(())
    }

    pub fn put_furniture(
        &mut self,
        at: HexCoord,
        furniture: Furniture,
    ) -> Result<(), PlacementError> {
        let cell = self.cell_mut(at).ok_or(PlacementError::OutOfBounds { at })?;
        cell.furniture = Some(furniture);
        Ok(())
    }

    // ========================================================================
    // Occupancy
    // ========================================================================

    /// Checks whether a footprint could be placed, without committing it.
    ///
    /// Cells already held by `id` itself are considered free.
    pub fn can_place(&self, id: CombatantId, footprint: &[HexCoord]) -> Result<(), PlacementError> {
        for &at in footprint {
            let cell = self.cell(at).ok_or(PlacementError::OutOfBounds { at })?;
            if cell.flags.contains(CellFlags::WALL) {
                return Err(PlacementError::Wall { at });
            }
            if cell.flags.contains(CellFlags::BLOCKED) {
                return Err(PlacementError::Impassable { at });
            }
            if let Some(by) = cell.occupant
                && by != id
            {
                return Err(PlacementError::Occupied { at, by });
            }
        }
        Ok(())
    }

    /// Claims every footprint cell for `id`. Validates the whole footprint
    /// before committing, so a failure leaves the grid untouched.
    pub fn place(&mut self, id: CombatantId, footprint: &[HexCoord]) -> Result<(), PlacementError> {
        self.can_place(id, footprint)?;
        self.occupy_unchecked(id, footprint);
        Ok(())
    }

    /// Releases every footprint cell held by `id`.
    ///
    /// # Panics
    ///
    /// Panics if any cell is not actually held by `id`: that means occupancy
    /// and the roster have desynced, which is unrecoverable.
    pub fn vacate(&mut self, id: CombatantId, footprint: &[HexCoord]) {
        for &at in footprint {
            let held = self.cell(at).and_then(|c| c.occupant);
            match held {
                Some(by) if by == id => {}
                other => panic!("occupancy desync: expected {id} at {at}, found {other:?}"),
            }
        }
        for &at in footprint {
            if let Some(cell) = self.cell_mut(at) {
                cell.occupant = None;
            }
        }
    }

    /// Moves a footprint atomically. On failure the original cells are
    /// restored and the error is returned.
    pub fn relocate(
        &mut self,
        id: CombatantId,
        from: &[HexCoord],
        to: &[HexCoord],
    ) -> Result<(), PlacementError> {
        self.vacate(id, from);
        if let Err(err) = self.place(id, to) {
            // Roll back: the old cells were ours a moment ago.
            self.occupy_unchecked(id, from);
            return Err(err);
        }
        Ok(())
    }

    fn occupy_unchecked(&mut self, id: CombatantId, footprint: &[HexCoord]) {
        for &at in footprint {
            if let Some(cell) = self.cell_mut(at) {
                cell.occupant = Some(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hexagon_cell_count() {
        assert_eq!(BattleGrid::hexagon(0).len(), 1);
        assert_eq!(BattleGrid::hexagon(1).len(), 7);
        assert_eq!(BattleGrid::hexagon(2).len(), 19);
        assert_eq!(BattleGrid::hexagon(3).len(), 37);
    }

    #[test]
    fn every_coordinate_maps_to_a_distinct_cell() {
        let grid = BattleGrid::hexagon(3);
        let mut seen = std::collections::BTreeSet::new();
        for at in HexCoord::ORIGIN.ball(3) {
            assert!(grid.contains(at));
            assert!(seen.insert(grid.index_of(at).unwrap()));
        }
        assert_eq!(seen.len(), grid.len());
        assert!(!grid.contains(HexCoord::new(4, 0, -4)));
        assert!(grid.cell(HexCoord::new(4, 0, -4)).is_none());
    }

    #[test]
    fn place_rejects_walls_and_occupied_cells() {
        let mut grid = BattleGrid::hexagon(2);
        let wall = HexCoord::axial(1, 0);
        grid.raise_wall(wall).unwrap();

        assert_eq!(
            grid.place(CombatantId(1), &[wall]),
            Err(PlacementError::Wall { at: wall })
        );

        let open = HexCoord::axial(0, 1);
        grid.place(CombatantId(1), &[open]).unwrap();
        assert_eq!(
            grid.place(CombatantId(2), &[open]),
            Err(PlacementError::Occupied {
                at: open,
                by: CombatantId(1)
            })
        );
        // Re-placing on our own cell is fine.
        assert!(grid.can_place(CombatantId(1), &[open]).is_ok());
    }

    #[test]
    fn failed_multi_cell_place_commits_nothing() {
        let mut grid = BattleGrid::hexagon(2);
        let a = HexCoord::axial(0, 0);
        let b = HexCoord::axial(1, 0);
        grid.raise_wall(b).unwrap();

        assert!(grid.place(CombatantId(7), &[a, b]).is_err());
        assert!(!grid.is_occupied(a));
    }

    #[test]
    fn relocate_rolls_back_on_conflict() {
        let mut grid = BattleGrid::hexagon(2);
        let home = HexCoord::axial(0, 0);
        let other = HexCoord::axial(1, 1);
        grid.place(CombatantId(1), &[home]).unwrap();
        grid.place(CombatantId(2), &[other]).unwrap();

        let err = grid.relocate(CombatantId(1), &[home], &[other]);
        assert!(err.is_err());
        assert_eq!(grid.occupant(home), Some(CombatantId(1)));
        assert_eq!(grid.occupant(other), Some(CombatantId(2)));
    }

    #[test]
    #[should_panic(expected = "occupancy desync")]
    fn vacating_a_cell_we_do_not_hold_panics() {
        let mut grid = BattleGrid::hexagon(1);
        grid.vacate(CombatantId(9), &[HexCoord::ORIGIN]);
    }

    #[test]
    fn move_cost_respects_terrain() {
        let mut grid = BattleGrid::hexagon(2);
        let rough = HexCoord::axial(1, 0);
        let wall = HexCoord::axial(0, 1);
        let pit = HexCoord::axial(-1, 0);
        grid.set_move_cost(rough, 2).unwrap();
        grid.raise_wall(wall).unwrap();
        grid.block(pit).unwrap();

        assert_eq!(grid.move_cost(HexCoord::ORIGIN), Some(1));
        assert_eq!(grid.move_cost(rough), Some(2));
        assert_eq!(grid.move_cost(wall), None);
        assert_eq!(grid.move_cost(pit), None);
        assert_eq!(grid.move_cost(HexCoord::new(3, 0, -3)), None);

        // Blocked terrain stops feet, not eyes.
        assert!(grid.is_blocked(pit));
        assert!(!grid.is_wall(pit));
        assert!(grid.is_wall(HexCoord::new(3, 0, -3)));
        assert!(!grid.is_blocked(HexCoord::new(3, 0, -3)));
    }
}
