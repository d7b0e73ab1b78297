//! Core battle model: hex arena, combatants, and action intents.
//!
//! Everything in this crate is synchronous and deterministic. Randomness
//! enters only through the [`dice::Dice`] trait, and nothing here performs
//! I/O; the decision and runtime layers build on top.

pub mod combatant;
pub mod config;
pub mod dice;
pub mod grid;
pub mod intent;
pub mod state;

pub use combatant::{
    AbilityKind, Archetype, CombatStats, Combatant, CombatantId, CombatantKind, MonsterTraits,
    Presence, RangedProfile, ResourceMeter, Side, Size, SpecialAbility, Spell, SpellClass,
    StatusEffect, StatusEffects, StatusKind, TargetingHint, UsabilityGate,
};
pub use config::BattleConfig;
pub use dice::{Dice, PcgDice, SequenceDice, choose, shuffle};
pub use grid::{
    BattleGrid, Cell, CellFlags, Facing, Furniture, HexCoord, PathMap, PlacementError, SightLine,
    reachable_set, shortest_path, sight_line, truncate_for_budget,
};
pub use intent::{ActionIntent, MeleeStyle, SpellTarget};
pub use state::BattleState;
