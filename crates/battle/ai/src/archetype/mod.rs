//! Per-archetype decision trees and the dispatcher that picks one.

pub(crate) mod caster;
pub(crate) mod maneuver;
pub(crate) mod melee;
pub(crate) mod ranged;
pub(crate) mod undead;

use battle_core::{ActionIntent, Archetype, CombatantId};
use tracing::{debug, warn};

use crate::context::AiContext;
use crate::targeting;

/// Decides one action for the acting combatant.
///
/// Heroes are driven from outside the engine. Asking for a decision on one
/// is a caller mistake; it is logged and answered with a hesitation so the
/// turn machinery stays alive.
pub fn decide(ctx: &mut AiContext<'_>) -> ActionIntent {
    let Some(archetype) = ctx.actor().archetype() else {
        warn!(actor = %ctx.actor, "decision requested for a combatant without an archetype");
        return ActionIntent::Hesitate;
    };
    let intent = match archetype {
        Archetype::AggressiveMelee => melee::aggressive(ctx),
        Archetype::HumanoidMelee => melee::humanoid(ctx),
        Archetype::HumanoidRanged => ranged::skirmisher(ctx),
        Archetype::MagicUser => caster::magus(ctx),
        Archetype::LowerUndead => undead::shambler(ctx),
        Archetype::HigherUndead => undead::revenant(ctx),
    };
    debug!(actor = %ctx.actor, %archetype, %intent, "action decided");
    intent
}

/// The turn's locked target while it is still standing, otherwise a fresh
/// pick that becomes the new lock.
pub(crate) fn acquire_target(ctx: &mut AiContext<'_>) -> Option<CombatantId> {
    if let Some(id) = ctx.scratch.target
        && ctx.state.combatant(id).is_some_and(|c| c.is_active())
    {
        return Some(id);
    }
    let picked = targeting::select_target(ctx, None);
    ctx.scratch.target = picked;
    picked
}

#[cfg(test)]
mod tests {
    use battle_core::{ActionIntent, BattleConfig, MeleeStyle, SequenceDice};

    use super::*;
    use crate::context::TurnScratch;
    use crate::fixtures;

    #[test]
    fn heroes_get_no_decisions() {
        let mut state = fixtures::arena(3);
        let hero = fixtures::field_hero(&mut state, 1, 0, 0);
        let _foe = fixtures::field_monster(&mut state, 2, 2, 0);

        let config = BattleConfig::default();
        let mut dice = SequenceDice::new([]);
        let mut scratch = TurnScratch::new();
        let mut ctx = AiContext::new(hero, &state, &config, &mut dice, &mut scratch);

        assert_eq!(decide(&mut ctx), ActionIntent::Hesitate);
    }

    #[test]
    fn dispatch_reaches_the_archetype_tree() {
        let mut state = fixtures::arena(3);
        let actor = fixtures::field_monster(&mut state, 1, 0, 0);
        let prey = fixtures::field_hero(&mut state, 2, 1, 0);

        let config = BattleConfig::default();
        let mut dice = SequenceDice::new([2]);
        let mut scratch = TurnScratch::new();
        let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);

        assert_eq!(
            decide(&mut ctx),
            ActionIntent::Melee {
                target: prey,
                style: MeleeStyle::Standard,
            }
        );
    }

    #[test]
    fn a_locked_target_holds_until_it_drops() {
        let mut state = fixtures::arena(4);
        let actor = fixtures::field_monster(&mut state, 1, 0, 0);
        let near = fixtures::field_hero(&mut state, 2, 1, 0);
        let far = fixtures::field_hero(&mut state, 3, 3, 0);

        let config = BattleConfig::default();
        let mut dice = SequenceDice::new([]);
        let mut scratch = TurnScratch::new();
        scratch.target = Some(far);
        {
            let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);
            assert_eq!(acquire_target(&mut ctx), Some(far));
        }

        // The lock breaks when the victim goes down.
        state.combatant_mut(far).unwrap().hp.deplete();
        let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);
        assert_eq!(acquire_target(&mut ctx), Some(near));
        assert_eq!(scratch.target, Some(near));
    }
}
