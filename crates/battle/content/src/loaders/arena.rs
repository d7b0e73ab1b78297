//! Arena terrain loader.
//!
//! Loads pure terrain data (walls, rough ground, props) from arena RON
//! files. Combatant placement is handled separately by the encounter setup.

use std::path::Path;

use battle_core::{BattleGrid, Furniture, HexCoord};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Terrain description of one battlefield, in axial `(q, r)` coordinates.
///
/// Every cell of the hexagon starts open with movement cost 1; the lists
/// below override individual cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaSpec {
    pub radius: u32,
    #[serde(default)]
    pub walls: Vec<(i32, i32)>,
    /// Impassable but see-through cells (chasms, braziers).
    #[serde(default)]
    pub blocked: Vec<(i32, i32)>,
    /// `(q, r, cost)` rough-ground overrides. Cost must be at least 1.
    #[serde(default)]
    pub rough: Vec<(i32, i32, u8)>,
    /// Low cover that obstructs shots.
    #[serde(default)]
    pub screens: Vec<(i32, i32)>,
    /// Climbable props granting a height advantage.
    #[serde(default)]
    pub perches: Vec<(i32, i32)>,
}

impl ArenaSpec {
    /// Builds the grid this spec describes.
    ///
    /// Off-map coordinates fail with the offending cell named; the engine
    /// treats off-map cells as walls, so a wall list entry outside the
    /// hexagon is a data error, not a harmless no-op.
    pub fn build(&self) -> LoadResult<BattleGrid> {
        let mut grid = BattleGrid::hexagon(self.radius);

        for &(q, r) in &self.walls {
            grid.raise_wall(HexCoord::axial(q, r))
                .map_err(|e| anyhow::anyhow!("Arena wall at ({}, {}): {}", q, r, e))?;
        }
        for &(q, r) in &self.blocked {
            grid.block(HexCoord::axial(q, r))
                .map_err(|e| anyhow::anyhow!("Arena blocker at ({}, {}): {}", q, r, e))?;
        }
        for &(q, r, cost) in &self.rough {
            if cost == 0 {
                return Err(anyhow::anyhow!(
                    "Arena rough ground at ({}, {}) has cost 0; the minimum is 1",
                    q,
                    r
                ));
            }
            grid.set_move_cost(HexCoord::axial(q, r), cost)
                .map_err(|e| anyhow::anyhow!("Arena rough ground at ({}, {}): {}", q, r, e))?;
        }
        for &(q, r) in &self.screens {
            grid.put_furniture(HexCoord::axial(q, r), Furniture::SCREEN)
                .map_err(|e| anyhow::anyhow!("Arena screen at ({}, {}): {}", q, r, e))?;
        }
        for &(q, r) in &self.perches {
            grid.put_furniture(HexCoord::axial(q, r), Furniture::PERCH)
                .map_err(|e| anyhow::anyhow!("Arena perch at ({}, {}): {}", q, r, e))?;
        }

        Ok(grid)
    }
}

/// Loader for arena terrain from RON files.
pub struct ArenaLoader;

impl ArenaLoader {
    /// Parse an arena spec from RON text without building the grid.
    pub fn parse(text: &str) -> LoadResult<ArenaSpec> {
        ron::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse arena RON: {}", e))
    }

    /// Load an arena from a RON file and build its grid.
    pub fn load(path: &Path) -> LoadResult<BattleGrid> {
        Self::parse(&read_file(path)?)?.build()
    }
}
