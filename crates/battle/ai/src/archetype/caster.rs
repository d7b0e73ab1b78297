//! The magic user: retreats, strikes, and mends, weighted by the dice and
//! whatever the spellbook can actually deliver right now.

use battle_core::{ActionIntent, MeleeStyle, SpellClass};

use crate::context::AiContext;
use crate::spells;

use super::{acquire_target, maneuver};

fn cast(ctx: &AiContext<'_>, class: SpellClass) -> Option<ActionIntent> {
    spells::choose_spell(ctx, class).map(|pick| ActionIntent::Cast {
        spell: pick.index,
        target: pick.target,
    })
}

/// Branches on how much trouble the caster is in: an opponent in arm's
/// reach, one merely in sight, or nobody visible at all. Every branch rolls,
/// and every roll falls through to whatever is still possible.
pub(crate) fn magus(ctx: &mut AiContext<'_>) -> ActionIntent {
    let Some(target) = acquire_target(ctx) else {
        return ActionIntent::Hesitate;
    };
    let melee_fallback = ActionIntent::Melee {
        target,
        style: MeleeStyle::Standard,
    };

    if ctx.separation(target) == Some(1) {
        return match ctx.dice.roll(6) {
            1..=2 => maneuver::retreat_from(ctx, target)
                .or_else(|| cast(ctx, SpellClass::CloseCombat))
                .unwrap_or(melee_fallback),
            3..=4 => cast(ctx, SpellClass::CloseCombat).unwrap_or(melee_fallback),
            5 => cast(ctx, SpellClass::Support)
                .or_else(|| cast(ctx, SpellClass::CloseCombat))
                .unwrap_or(melee_fallback),
            _ => melee_fallback,
        };
    }

    let seen = ctx.sight_to(target).is_some_and(|sight| sight.can_see);
    if seen {
        return match ctx.dice.roll(6) {
            1..=3 => cast(ctx, SpellClass::Ranged)
                .or_else(|| maneuver::approach(ctx, target))
                .unwrap_or(ActionIntent::Hesitate),
            4 => cast(ctx, SpellClass::Support)
                .or_else(|| cast(ctx, SpellClass::Ranged))
                .or_else(|| maneuver::approach(ctx, target))
                .unwrap_or(ActionIntent::Hesitate),
            5 => maneuver::retreat_from(ctx, target)
                .or_else(|| cast(ctx, SpellClass::Ranged))
                .unwrap_or(ActionIntent::Hesitate),
            _ => maneuver::approach(ctx, target)
                .or_else(|| cast(ctx, SpellClass::Ranged))
                .unwrap_or(ActionIntent::Hesitate),
        };
    }

    // Nobody in sight: find a sightline, close the distance, or regroup.
    match ctx.dice.roll(6) {
        1..=4 => maneuver::seek_firing_position(ctx, target)
            .or_else(|| maneuver::approach(ctx, target))
            .unwrap_or(ActionIntent::Hesitate),
        _ => cast(ctx, SpellClass::Support)
            .or_else(|| maneuver::approach(ctx, target))
            .unwrap_or(ActionIntent::Hesitate),
    }
}
