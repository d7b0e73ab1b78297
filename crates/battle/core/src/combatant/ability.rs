//! Special abilities and the conditions under which they fire.

use crate::combatant::status::StatusKind;

/// Named special ability a monster can use in place of a standard attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityKind {
    Bellow,
    Cleave,
    VenomSpit,
    BoneRattle,
    DreadGaze,
    ShieldSlam,
}

/// Situational gate that must hold for an ability to be worth using.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UsabilityGate {
    /// An opponent stands in an adjacent cell.
    AdjacentOpponent,
    /// An opponent stands within `range` cells.
    OpponentWithin { range: u32 },
    /// An opponent within `range` does not yet suffer `status`.
    TargetLacks { range: u32, status: StatusKind },
    /// The user's own health has dropped below `percent` of maximum.
    SelfHpBelow { percent: u32 },
}

/// An ability paired with its usability gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialAbility {
    pub kind: AbilityKind,
    pub gate: UsabilityGate,
}

impl SpecialAbility {
    pub fn new(kind: AbilityKind, gate: UsabilityGate) -> Self {
        Self { kind, gate }
    }
}
