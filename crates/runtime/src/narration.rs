//! One-line narration for the turn transcript.
//!
//! Presentation layers get a readable trace of the turn without digging
//! through intents. Kept deliberately plain; flavor belongs upstream.

use battle_core::{ActionIntent, BattleState, CombatantId, Facing};

fn name_of(state: &BattleState, id: CombatantId) -> String {
    state
        .combatant(id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// The actor chose to do nothing with this action.
pub fn hesitation(state: &BattleState, actor: CombatantId) -> String {
    format!("{} hesitates, finding nothing worth doing", name_of(state, actor))
}

/// The stall guard ended the turn after an action spent nothing.
pub fn stall(state: &BattleState, actor: CombatantId, intent: &ActionIntent) -> String {
    format!(
        "{} gives up on `{intent}` and stands down",
        name_of(state, actor)
    )
}

/// End-of-turn facing write-back.
pub fn faces(state: &BattleState, actor: CombatantId, facing: Facing) -> String {
    format!("{} turns to face {facing}", name_of(state, actor))
}
