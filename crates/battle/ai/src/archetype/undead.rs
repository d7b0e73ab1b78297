//! Undead archetypes: the mindless shambler and the disciplined revenant.

use battle_core::{ActionIntent, CombatantId, MeleeStyle};

use crate::abilities;
use crate::context::AiContext;

use super::{acquire_target, maneuver};

fn ability_or(ctx: &mut AiContext<'_>, target: CombatantId, style: MeleeStyle) -> ActionIntent {
    match abilities::ready_ability(ctx) {
        Some((ability, victim)) => ActionIntent::UseAbility {
            ability,
            target: victim,
        },
        None => ActionIntent::Melee { target, style },
    }
}

/// Barely animate. One face of the die is spent standing still; the rest
/// lurch at whatever is closest.
pub(crate) fn shambler(ctx: &mut AiContext<'_>) -> ActionIntent {
    if ctx.dice.roll(6) == 1 {
        return ActionIntent::Hesitate;
    }
    let Some(target) = acquire_target(ctx) else {
        return ActionIntent::Hesitate;
    };
    if ctx.separation(target) == Some(1) {
        return ActionIntent::Melee {
            target,
            style: MeleeStyle::Standard,
        };
    }
    maneuver::approach(ctx, target).unwrap_or(ActionIntent::Hesitate)
}

/// Dead but drilled. Leans on power swings, commits to charges, and spends
/// its abilities even at range.
pub(crate) fn revenant(ctx: &mut AiContext<'_>) -> ActionIntent {
    let Some(target) = acquire_target(ctx) else {
        return ActionIntent::Hesitate;
    };

    if ctx.separation(target) == Some(1) {
        return match ctx.dice.roll(6) {
            1..=2 => ActionIntent::Melee {
                target,
                style: MeleeStyle::Standard,
            },
            3..=4 => ActionIntent::Melee {
                target,
                style: MeleeStyle::Power,
            },
            _ => ability_or(ctx, target, MeleeStyle::Power),
        };
    }

    if maneuver::can_reach_adjacent(ctx, target) {
        return match ctx.dice.roll(6) {
            1..=4 => ActionIntent::Melee {
                target,
                style: MeleeStyle::Charge,
            },
            5 => maneuver::approach(ctx, target).unwrap_or(ActionIntent::Melee {
                target,
                style: MeleeStyle::Charge,
            }),
            _ => ability_or(ctx, target, MeleeStyle::Charge),
        };
    }

    match abilities::ready_ability(ctx) {
        Some((ability, victim)) => ActionIntent::UseAbility {
            ability,
            target: victim,
        },
        None => maneuver::approach(ctx, target).unwrap_or(ActionIntent::Hesitate),
    }
}
