//! Combatants: identity, presence, stats, and battlefield kit.

pub mod ability;
pub mod spell;
pub mod status;

pub use ability::{AbilityKind, SpecialAbility, UsabilityGate};
pub use spell::{Spell, SpellClass, TargetingHint};
pub use status::{StatusEffect, StatusEffects, StatusKind};

use std::fmt;

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::grid::{Facing, HexCoord};

/// Unique identifier for a combatant in a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Integer resource meter (health, action points) tracked per combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }

    /// A meter filled to its maximum.
    pub fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub fn spend(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn deplete(&mut self) {
        self.current = 0;
    }

    pub fn is_empty(self) -> bool {
        self.current == 0
    }

    /// Percent of the meter that is missing (0..=100).
    pub fn missing_percent(self) -> u32 {
        if self.maximum == 0 {
            return 0;
        }
        (self.maximum - self.current.min(self.maximum)) * 100 / self.maximum
    }
}

/// Which team a combatant fights for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Side {
    Heroes,
    Monsters,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Heroes => Side::Monsters,
            Side::Monsters => Side::Heroes,
        }
    }
}

/// Whether a combatant currently stands on the battlefield.
///
/// A removed combatant (dead, banished, not yet deployed) has no position at
/// all rather than a stale one, so spatial code never reasons about ghosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    Fielded { anchor: HexCoord, facing: Facing },
    Removed,
}

/// Body size, which determines the footprint on the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Size {
    #[default]
    Normal,
    Large,
    Huge,
}

impl Size {
    /// Footprint cell offsets relative to the anchor.
    pub fn offsets(self) -> &'static [HexCoord] {
        const NORMAL: [HexCoord; 1] = [HexCoord::ORIGIN];
        const LARGE: [HexCoord; 3] = [
            HexCoord::ORIGIN,
            HexCoord::new(1, 0, -1),
            HexCoord::new(1, -1, 0),
        ];
        const HUGE: [HexCoord; 6] = [
            HexCoord::ORIGIN,
            HexCoord::new(1, 0, -1),
            HexCoord::new(1, -1, 0),
            HexCoord::new(0, -1, 1),
            HexCoord::new(-1, 0, 1),
            HexCoord::new(-1, 1, 0),
        ];
        match self {
            Size::Normal => &NORMAL,
            Size::Large => &LARGE,
            Size::Huge => &HUGE,
        }
    }

    /// The cells a body of this size occupies when anchored at `anchor`.
    pub fn footprint_at(self, anchor: HexCoord) -> ArrayVec<HexCoord, { BattleConfig::MAX_FOOTPRINT }> {
        self.offsets().iter().map(|&off| anchor + off).collect()
    }
}

/// Raw combat numbers backing hit estimation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub weapon_skill: u32,
    pub ranged_skill: u32,
    pub defense: u32,
}

/// Ranged weapon parameters for kiting archetypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangedProfile {
    pub max_range: u32,
    /// Opponents closer than this make the wielder fall back.
    pub min_safe_range: u32,
}

bitflags::bitflags! {
    /// Innate movement and mind traits.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MonsterTraits: u8 {
        /// Walks through occupied cells (but may not stop in them).
        const INCORPOREAL = 1;
        /// Immune to fear effects.
        const FEARLESS = 1 << 1;
    }
}

/// Behavioral archetype steering a monster's decisions.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Archetype {
    /// Closes and swings, every turn, no hesitation.
    AggressiveMelee,
    /// Trained melee: charges, parries, picks its moment.
    HumanoidMelee,
    /// Keeps distance and shoots; falls back when crowded.
    HumanoidRanged,
    /// Spellcaster juggling retreat, strikes, and support.
    MagicUser,
    /// Mindless shambler.
    LowerUndead,
    /// Disciplined undead with abilities worth using.
    HigherUndead,
}

/// Hero or monster. Only monsters carry a behavior archetype; heroes are
/// driven from outside the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatantKind {
    Hero,
    Monster(Archetype),
}

/// A creature in the battle: identity, presence, meters, and kit.
#[derive(Clone, Debug)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub kind: CombatantKind,
    pub presence: Presence,
    pub hp: ResourceMeter,
    /// Actions available this turn. Spending is the executor's job.
    pub ap: ResourceMeter,
    /// Movement points per action.
    pub movement: u32,
    pub stats: CombatStats,
    pub size: Size,
    pub traits: MonsterTraits,
    pub statuses: StatusEffects,
    pub abilities: ArrayVec<SpecialAbility, { BattleConfig::MAX_ABILITIES }>,
    pub spellbook: ArrayVec<Spell, { BattleConfig::MAX_SPELLS }>,
    pub ranged: Option<RangedProfile>,
    /// Set while the combatant holds an aimed shot.
    pub aiming: bool,
}

impl Combatant {
    pub fn new(id: CombatantId, name: impl Into<String>, side: Side, kind: CombatantKind) -> Self {
        Self {
            id,
            name: name.into(),
            side,
            kind,
            presence: Presence::Removed,
            hp: ResourceMeter::full(1),
            ap: ResourceMeter::full(1),
            movement: 3,
            stats: CombatStats::default(),
            size: Size::Normal,
            traits: MonsterTraits::empty(),
            statuses: StatusEffects::empty(),
            abilities: ArrayVec::new(),
            spellbook: ArrayVec::new(),
            ranged: None,
            aiming: false,
        }
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = ResourceMeter::full(hp);
        self
    }

    pub fn with_ap(mut self, ap: u32) -> Self {
        self.ap = ResourceMeter::full(ap);
        self
    }

    pub fn with_movement(mut self, movement: u32) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_stats(mut self, stats: CombatStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_traits(mut self, traits: MonsterTraits) -> Self {
        self.traits = traits;
        self
    }

    pub fn with_ranged(mut self, profile: RangedProfile) -> Self {
        self.ranged = Some(profile);
        self
    }

    pub fn with_spells(mut self, spells: impl IntoIterator<Item = Spell>) -> Self {
        self.spellbook = spells
            .into_iter()
            .take(BattleConfig::MAX_SPELLS)
            .collect();
        self
    }

    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = SpecialAbility>) -> Self {
        self.abilities = abilities
            .into_iter()
            .take(BattleConfig::MAX_ABILITIES)
            .collect();
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp.current > 0
    }

    pub fn is_fielded(&self) -> bool {
        matches!(self.presence, Presence::Fielded { .. })
    }

    /// Alive and standing on the battlefield.
    pub fn is_active(&self) -> bool {
        self.is_alive() && self.is_fielded()
    }

    pub fn anchor(&self) -> Option<HexCoord> {
        match self.presence {
            Presence::Fielded { anchor, .. } => Some(anchor),
            Presence::Removed => None,
        }
    }

    pub fn facing(&self) -> Option<Facing> {
        match self.presence {
            Presence::Fielded { facing, .. } => Some(facing),
            Presence::Removed => None,
        }
    }

    /// Cells this combatant occupies, when fielded.
    pub fn footprint(&self) -> Option<ArrayVec<HexCoord, { BattleConfig::MAX_FOOTPRINT }>> {
        self.anchor().map(|anchor| self.size.footprint_at(anchor))
    }

    pub fn archetype(&self) -> Option<Archetype> {
        match self.kind {
            CombatantKind::Monster(archetype) => Some(archetype),
            CombatantKind::Hero => None,
        }
    }

    pub fn is_monster(&self) -> bool {
        matches!(self.kind, CombatantKind::Monster(_))
    }

    pub fn is_hidden(&self) -> bool {
        self.statuses.has(StatusKind::Hidden)
    }

    /// The combatant this one is compelled to attack, if taunted.
    pub fn taunted_by(&self) -> Option<CombatantId> {
        self.statuses.taunted_by()
    }

    /// Knows at least one spell: targeted as an enemy caster.
    pub fn is_caster(&self) -> bool {
        !self.spellbook.is_empty()
    }

    pub fn passes_through(&self) -> bool {
        self.traits.contains(MonsterTraits::INCORPOREAL)
    }
}
