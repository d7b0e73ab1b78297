//! Action intents: what a combatant has decided to do this action.
//!
//! The engine produces intents; an executor resolves them. Nothing here
//! mutates state.

use std::fmt;

use crate::combatant::CombatantId;
use crate::grid::HexCoord;

/// Flavor of a melee swing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum MeleeStyle {
    /// Plain attack.
    Standard,
    /// All-in swing, harder hit at the cost of openings.
    Power,
    /// Move and strike in one action.
    Charge,
}

/// Where a spell lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpellTarget {
    Combatant(CombatantId),
    Area(HexCoord),
}

/// One decided action. `Move` paths include the starting cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionIntent {
    Move {
        path: Vec<HexCoord>,
    },
    Melee {
        target: CombatantId,
        style: MeleeStyle,
    },
    /// Defensive stance until the next turn.
    Parry,
    /// Line up a shot; the next shot against this target counts as aimed.
    Aim {
        target: CombatantId,
    },
    Shoot {
        target: CombatantId,
        aimed: bool,
    },
    Cast {
        /// Index into the caster's spellbook.
        spell: usize,
        target: SpellTarget,
    },
    UseAbility {
        ability: crate::combatant::AbilityKind,
        target: Option<CombatantId>,
    },
    /// Deliberately do nothing with this action.
    Hesitate,
}

impl ActionIntent {
    /// A charge is the only intent that both moves and strikes.
    pub fn is_charge(&self) -> bool {
        matches!(
            self,
            ActionIntent::Melee {
                style: MeleeStyle::Charge,
                ..
            }
        )
    }
}

impl fmt::Display for ActionIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionIntent::Move { path } => {
                write!(f, "move {} cells", path.len().saturating_sub(1))
            }
            ActionIntent::Melee { target, style } => write!(f, "{style} melee vs {target}"),
            ActionIntent::Parry => write!(f, "parry"),
            ActionIntent::Aim { target } => write!(f, "aim at {target}"),
            ActionIntent::Shoot { target, aimed } => {
                if *aimed {
                    write!(f, "aimed shot at {target}")
                } else {
                    write!(f, "snap shot at {target}")
                }
            }
            ActionIntent::Cast { spell, target } => match target {
                SpellTarget::Combatant(id) => write!(f, "cast spell {spell} at {id}"),
                SpellTarget::Area(at) => {
                    write!(f, "cast spell {spell} at ({}, {})", at.q(), at.r())
                }
            },
            ActionIntent::UseAbility { ability, target } => match target {
                Some(id) => write!(f, "use {ability} on {id}"),
                None => write!(f, "use {ability}"),
            },
            ActionIntent::Hesitate => write!(f, "hesitate"),
        }
    }
}
