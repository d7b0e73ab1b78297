//! Melee archetypes: the unthinking brawler and the drilled soldier.

use battle_core::{ActionIntent, CombatantId, MeleeStyle};

use crate::abilities;
use crate::context::AiContext;

use super::{acquire_target, maneuver};

/// A usable special ability beats a plain swing; otherwise swing anyway.
fn ability_or_standard(ctx: &mut AiContext<'_>, target: CombatantId) -> ActionIntent {
    match abilities::ready_ability(ctx) {
        Some((ability, victim)) => ActionIntent::UseAbility {
            ability,
            target: victim,
        },
        None => ActionIntent::Melee {
            target,
            style: MeleeStyle::Standard,
        },
    }
}

/// Closes and swings. Charges whenever the legs allow it, never holds back.
pub(crate) fn aggressive(ctx: &mut AiContext<'_>) -> ActionIntent {
    let Some(target) = acquire_target(ctx) else {
        return ActionIntent::Hesitate;
    };

    if ctx.separation(target) == Some(1) {
        return match ctx.dice.roll(6) {
            1..=3 => ActionIntent::Melee {
                target,
                style: MeleeStyle::Standard,
            },
            4..=5 => ActionIntent::Melee {
                target,
                style: MeleeStyle::Power,
            },
            _ => ability_or_standard(ctx, target),
        };
    }

    if maneuver::can_reach_adjacent(ctx, target) {
        return ActionIntent::Melee {
            target,
            style: MeleeStyle::Charge,
        };
    }
    maneuver::approach(ctx, target).unwrap_or(ActionIntent::Hesitate)
}

/// Trained melee. Mixes swings with parries up close, and at charge reach
/// sometimes advances carefully instead of committing.
pub(crate) fn humanoid(ctx: &mut AiContext<'_>) -> ActionIntent {
    let Some(target) = acquire_target(ctx) else {
        return ActionIntent::Hesitate;
    };

    if ctx.separation(target) == Some(1) {
        return match ctx.dice.roll(6) {
            1..=2 => ActionIntent::Melee {
                target,
                style: MeleeStyle::Standard,
            },
            3 => ActionIntent::Melee {
                target,
                style: MeleeStyle::Power,
            },
            4 => ActionIntent::Parry,
            _ => ability_or_standard(ctx, target),
        };
    }

    if maneuver::can_reach_adjacent(ctx, target) {
        return match ctx.dice.roll(6) {
            1..=3 => ActionIntent::Melee {
                target,
                style: MeleeStyle::Charge,
            },
            4..=5 => maneuver::approach(ctx, target).unwrap_or(ActionIntent::Melee {
                target,
                style: MeleeStyle::Charge,
            }),
            _ => ActionIntent::Parry,
        };
    }
    maneuver::approach(ctx, target).unwrap_or(ActionIntent::Hesitate)
}
