/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Hidden combatants farther than this many cells cannot be targeted.
    pub stealth_reveal_range: u32,
    /// How many shot obstructions (bodies, screens) a shooter tolerates
    /// before a visible target stops being shootable.
    pub shot_obstruction_limit: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Largest footprint any combatant can occupy.
    pub const MAX_FOOTPRINT: usize = 6;
    pub const MAX_STATUS_EFFECTS: usize = 8;
    pub const MAX_ABILITIES: usize = 6;
    pub const MAX_SPELLS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STEALTH_REVEAL_RANGE: u32 = 2;
    pub const DEFAULT_SHOT_OBSTRUCTION_LIMIT: u32 = 0;

    pub fn new() -> Self {
        Self {
            stealth_reveal_range: Self::DEFAULT_STEALTH_REVEAL_RANGE,
            shot_obstruction_limit: Self::DEFAULT_SHOT_OBSTRUCTION_LIMIT,
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
