//! The skirmisher: keeps its distance, lines up shots, gives ground when
//! crowded.

use battle_core::{ActionIntent, MeleeStyle};

use crate::context::AiContext;

use super::{acquire_target, maneuver, melee};

pub(crate) fn skirmisher(ctx: &mut AiContext<'_>) -> ActionIntent {
    let Some(profile) = ctx.actor().ranged else {
        // Lost or never had a weapon worth the name; fight like a soldier.
        return melee::humanoid(ctx);
    };
    let Some(target) = acquire_target(ctx) else {
        return ActionIntent::Hesitate;
    };
    let Some(sep) = ctx.separation(target) else {
        return ActionIntent::Hesitate;
    };

    if sep < profile.min_safe_range {
        if let Some(retreat) = maneuver::retreat_from(ctx, target) {
            return retreat;
        }
        // Cornered. Swing if the threat is in arm's reach, else keep shooting.
        if sep == 1 {
            return ActionIntent::Melee {
                target,
                style: MeleeStyle::Standard,
            };
        }
    }

    let clear = ctx.sight_to(target).is_some_and(|sight| sight.can_shoot);
    if !clear {
        return maneuver::seek_firing_position(ctx, target)
            .or_else(|| maneuver::approach(ctx, target))
            .unwrap_or(ActionIntent::Hesitate);
    }
    if sep > profile.max_range {
        return maneuver::approach(ctx, target).unwrap_or(ActionIntent::Hesitate);
    }

    if ctx.actor().aiming {
        ActionIntent::Shoot {
            target,
            aimed: true,
        }
    } else {
        ActionIntent::Aim { target }
    }
}
