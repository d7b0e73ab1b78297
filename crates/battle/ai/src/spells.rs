//! Spell selection: which spell of a class to cast, and at what.
//!
//! Each spell's targeting hint turns the board into a score. The best-scoring
//! castable spell of the requested class wins; a spell with nothing worth
//! hitting simply drops out, and a class with no castable spells yields
//! `None` so the archetype can fall through to mundane options.

use battle_core::{CombatantId, Spell, SpellClass, SpellTarget, TargetingHint};

use crate::aoe::best_blast_center;
use crate::context::AiContext;
use crate::targeting::visible_candidates;

/// A castable spell, its aim point, and the score that won it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpellPick {
    /// Index into the caster's spellbook.
    pub index: usize,
    pub target: SpellTarget,
    pub score: u32,
}

/// Scores every spell of `class` in the actor's book and picks the best.
/// Earlier spellbook entries win ties.
pub fn choose_spell(ctx: &AiContext<'_>, class: SpellClass) -> Option<SpellPick> {
    let actor = ctx.actor();
    let mut best: Option<SpellPick> = None;
    for (index, spell) in actor.spellbook.iter().enumerate() {
        if spell.class != class {
            continue;
        }
        let Some((target, score)) = score_spell(ctx, spell) else {
            continue;
        };
        if best.is_none_or(|b| score > b.score) {
            best = Some(SpellPick {
                index,
                target,
                score,
            });
        }
    }
    best
}

fn score_spell(ctx: &AiContext<'_>, spell: &Spell) -> Option<(SpellTarget, u32)> {
    match spell.hint {
        TargetingHint::MaximizeTargetsHit => {
            // A blast with no radius catches nobody worth the slot.
            if spell.radius == 0 {
                return None;
            }
            let pick = best_blast_center(ctx.state, ctx.actor, spell.radius, Some(spell.range))?;
            Some((SpellTarget::Area(pick.center), pick.hits * 25))
        }
        TargetingHint::HealLowestAlly => {
            let actor = ctx.actor();
            let mut worst: Option<(u32, CombatantId)> = None;
            for ally in ctx
                .state
                .combatants()
                .iter()
                .filter(|c| c.side == actor.side && c.is_active())
            {
                let Some(sep) = ctx.state.separation(ctx.actor, ally.id) else {
                    continue;
                };
                if sep > spell.range {
                    continue;
                }
                let missing = ally.hp.missing_percent();
                if worst.is_none_or(|(m, _)| missing > m) {
                    worst = Some((missing, ally.id));
                }
            }
            let (missing, id) = worst?;
            // Nobody hurt, nothing to heal.
            (missing > 0).then_some((SpellTarget::Combatant(id), missing))
        }
        TargetingHint::DebuffEnemyCaster => {
            let mut best: Option<(u32, CombatantId)> = None;
            for id in visible_candidates(ctx) {
                let Some(mark) = ctx.state.combatant(id) else {
                    continue;
                };
                if !mark.is_caster() {
                    continue;
                }
                let Some(sep) = ctx.separation(id) else {
                    continue;
                };
                if sep > spell.range || !ctx.sight_to(id).is_some_and(|s| s.can_see) {
                    continue;
                }
                if best.is_none_or(|(b, _)| sep < b) {
                    best = Some((sep, id));
                }
            }
            best.map(|(_, id)| (SpellTarget::Combatant(id), 80))
        }
        TargetingHint::SmiteClosest => {
            let mut best: Option<(u32, CombatantId)> = None;
            for id in visible_candidates(ctx) {
                let Some(sep) = ctx.separation(id) else {
                    continue;
                };
                if sep > spell.range || !ctx.sight_to(id).is_some_and(|s| s.can_see) {
                    continue;
                }
                if best.is_none_or(|(b, _)| sep < b) {
                    best = Some((sep, id));
                }
            }
            best.map(|(sep, id)| (SpellTarget::Combatant(id), 40 + 20u32.saturating_sub(sep)))
        }
    }
}
