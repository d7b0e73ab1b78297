//! Errors surfaced by the turn machinery.

use battle_core::{CombatantId, PlacementError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("combatant {0} is not on the roster")]
    UnknownCombatant(CombatantId),

    #[error("combatant {0} is not fielded")]
    NotFielded(CombatantId),

    #[error("combatant {0} is not under engine control")]
    NotAiControlled(CombatantId),

    #[error("executor failed on `{intent}`: {reason}")]
    ExecutorFailure { intent: String, reason: String },

    #[error(transparent)]
    Placement(#[from] PlacementError),
}
