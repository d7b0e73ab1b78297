//! Spells and the hints the caster archetype scores them by.

/// Broad class a spell belongs to. Caster logic asks for a class first and
/// scores the matching spells second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SpellClass {
    CloseCombat,
    Ranged,
    Support,
}

/// How a spell wants to be aimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetingHint {
    /// Blast: pick the center that catches the most opponents.
    MaximizeTargetsHit,
    /// Pick the ally missing the largest share of health.
    HealLowestAlly,
    /// Pick an enemy spellcaster.
    DebuffEnemyCaster,
    /// Pick the closest visible opponent.
    SmiteClosest,
}

/// A spell as the decision layer sees it. Damage and resolution live in the
/// executor; the engine only needs shape and aim.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spell {
    pub name: String,
    pub class: SpellClass,
    pub hint: TargetingHint,
    /// Maximum cast distance from the caster's anchor. Zero means touch.
    pub range: u32,
    /// Blast radius around the chosen center. Zero means single target.
    pub radius: u32,
}

impl Spell {
    pub fn new(
        name: impl Into<String>,
        class: SpellClass,
        hint: TargetingHint,
        range: u32,
        radius: u32,
    ) -> Self {
        Self {
            name: name.into(),
            class,
            hint,
            range,
            radius,
        }
    }
}
