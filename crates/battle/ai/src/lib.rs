//! Decision logic for monster turns.
//!
//! Given a read-only [`battle_core::BattleState`], a tuning
//! [`battle_core::BattleConfig`], and a [`battle_core::Dice`] stream, this
//! crate answers one question: what does the acting monster do with its next
//! action? The answer is an [`battle_core::ActionIntent`]; applying it is the
//! runtime's business.
//!
//! Entry points:
//! - [`decide`] runs the actor's archetype tree for one action.
//! - [`choose_facing`] picks the direction to face once the turn is spent.
//! - [`select_target`], [`choose_spell`], [`ready_ability`], and
//!   [`best_blast_center`] are the individual evaluators the trees lean on,
//!   exposed for callers that want them piecemeal.

pub mod abilities;
pub mod aoe;
pub mod archetype;
pub mod context;
pub mod facing;
pub mod spells;
pub mod targeting;

#[cfg(test)]
mod fixtures;

pub use abilities::ready_ability;
pub use aoe::{AreaPick, best_blast_center};
pub use archetype::decide;
pub use context::{AiContext, TurnScratch};
pub use facing::{Sector, choose_facing};
pub use spells::{SpellPick, choose_spell};
pub use targeting::{hit_chance, select_target};
