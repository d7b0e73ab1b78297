//! Special-ability selection: the first usable ability in dice order.
//!
//! Abilities are tried in a shuffled order so a monster with several usable
//! tricks varies its openings. A gate that passes also names the victim, and
//! a monster whose gates all fail falls back to whatever mundane action the
//! archetype had in mind.

use battle_core::{AbilityKind, CombatantId, UsabilityGate, shuffle};

use crate::context::AiContext;
use crate::targeting::visible_candidates;

/// Picks a usable ability and its target, if any gate passes.
pub fn ready_ability(ctx: &mut AiContext<'_>) -> Option<(AbilityKind, Option<CombatantId>)> {
    let actor = ctx.actor();
    if actor.abilities.is_empty() {
        return None;
    }
    let mut order: Vec<usize> = (0..actor.abilities.len()).collect();
    shuffle(ctx.dice, &mut order);

    let candidates = visible_candidates(ctx);
    for idx in order {
        let ability = actor.abilities[idx];
        if let Some(target) = gate_target(ctx, &candidates, ability.gate) {
            return Some((ability.kind, target));
        }
    }
    None
}

/// `None` when the gate fails; `Some(target)` when it passes. A passing gate
/// with no particular victim (self-triggered abilities) yields `Some(None)`.
fn gate_target(
    ctx: &AiContext<'_>,
    candidates: &[CombatantId],
    gate: UsabilityGate,
) -> Option<Option<CombatantId>> {
    match gate {
        UsabilityGate::AdjacentOpponent => closest_within(ctx, candidates, 1).map(Some),
        UsabilityGate::OpponentWithin { range } => {
            closest_within(ctx, candidates, range).map(Some)
        }
        UsabilityGate::TargetLacks { range, status } => {
            let lacking: Vec<CombatantId> = candidates
                .iter()
                .copied()
                .filter(|&id| {
                    ctx.state
                        .combatant(id)
                        .is_some_and(|c| !c.statuses.has(status))
                })
                .collect();
            closest_within(ctx, &lacking, range).map(Some)
        }
        UsabilityGate::SelfHpBelow { percent } => {
            let hp = ctx.actor().hp;
            let below = hp.maximum > 0 && hp.current * 100 / hp.maximum < percent;
            below.then_some(None)
        }
    }
}

fn closest_within(
    ctx: &AiContext<'_>,
    candidates: &[CombatantId],
    range: u32,
) -> Option<CombatantId> {
    let mut best: Option<(u32, CombatantId)> = None;
    for &id in candidates {
        let Some(sep) = ctx.separation(id) else {
            continue;
        };
        if sep > range {
            continue;
        }
        if best.is_none_or(|(b, _)| sep < b) {
            best = Some((sep, id));
        }
    }
    best.map(|(_, id)| id)
}
