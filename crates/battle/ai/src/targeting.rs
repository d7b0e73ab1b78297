//! Target selection: who a monster decides to go after.
//!
//! Selection runs as a chain of filters. Taunts short-circuit everything.
//! Stealth then prunes the candidate pool, an optional exact-range filter
//! narrows it further (and is terminal when it matches nothing), freshly
//! untouched adjacent victims get priority, and only then does the
//! archetype's own taste decide.

use battle_core::{Archetype, Combatant, CombatantId, choose};

use crate::context::AiContext;

/// Flat hit estimate for a ranged attack, in percent.
///
/// Skill helps, the target's defense and every cell of separation hurt, and
/// the result never leaves `5..=95`: there is always a sliver of luck both
/// ways.
pub fn hit_chance(attacker: &Combatant, target: &Combatant, separation: u32) -> u32 {
    const BASE: i64 = 60;
    let raw = BASE + attacker.stats.ranged_skill as i64
        - target.stats.defense as i64
        - separation as i64;
    raw.clamp(5, 95) as u32
}

/// Picks a target for the acting monster.
///
/// With `range_filter` set, only opponents at exactly that separation
/// qualify; no match means no target, with no fallback to nearer or farther
/// ones. Spells that burn on touch want exactly-adjacent victims, not
/// whoever happens to be closest.
pub fn select_target(ctx: &mut AiContext<'_>, range_filter: Option<u32>) -> Option<CombatantId> {
    let actor = ctx.actor();

    // A taunt overrides judgment entirely, stealth and range included.
    if let Some(by) = actor.taunted_by()
        && ctx
            .state
            .combatant(by)
            .is_some_and(|c| c.is_active() && c.side == actor.side.opponent())
    {
        return Some(by);
    }

    let candidates = visible_candidates(ctx);
    if candidates.is_empty() {
        return None;
    }

    if let Some(range) = range_filter {
        let in_range: Vec<CombatantId> = candidates
            .iter()
            .copied()
            .filter(|&id| ctx.separation(id) == Some(range))
            .collect();
        return choose(ctx.dice, &in_range).copied();
    }

    // Adjacent opponents nobody has singled out yet this round get priority.
    let fresh: Vec<CombatantId> = candidates
        .iter()
        .copied()
        .filter(|&id| ctx.separation(id) == Some(1) && !ctx.state.was_targeted(id))
        .collect();
    if !fresh.is_empty() {
        return choose(ctx.dice, &fresh).copied();
    }

    match actor.archetype() {
        Some(Archetype::HumanoidRanged) => marksman_pick(ctx, &candidates),
        Some(Archetype::MagicUser) => magus_pick(ctx, &candidates),
        _ => closest(ctx, &candidates),
    }
}

/// Opponents the actor is allowed to target, stealth applied, in id order.
pub(crate) fn visible_candidates(ctx: &AiContext<'_>) -> Vec<CombatantId> {
    let reveal = ctx.config.stealth_reveal_range;
    let opponents = ctx.opponents();
    let unhidden_adjacent = opponents
        .iter()
        .any(|c| !c.is_hidden() && ctx.separation(c.id) == Some(1));

    let mut ids: Vec<CombatantId> = opponents
        .iter()
        .filter(|c| {
            if !c.is_hidden() {
                return true;
            }
            let Some(sep) = ctx.separation(c.id) else {
                return false;
            };
            if sep > reveal {
                return false;
            }
            // A hidden skulker within arm's reach is passed over as long as
            // a plainly visible victim stands just as close.
            !(sep == 1 && unhidden_adjacent)
        })
        .map(|c| c.id)
        .collect();
    // Roster order is recruit order; ties must not depend on it.
    ids.sort_unstable();
    ids
}

/// Smallest separation wins; candidate order (id order) breaks ties.
fn closest(ctx: &AiContext<'_>, candidates: &[CombatantId]) -> Option<CombatantId> {
    let mut best: Option<(u32, CombatantId)> = None;
    for &id in candidates {
        let Some(sep) = ctx.separation(id) else {
            continue;
        };
        if best.is_none_or(|(b, _)| sep < b) {
            best = Some((sep, id));
        }
    }
    best.map(|(_, id)| id)
}

fn lowest_hp(ctx: &AiContext<'_>, candidates: &[CombatantId]) -> Option<CombatantId> {
    let mut best: Option<(u32, CombatantId)> = None;
    for &id in candidates {
        let Some(hp) = ctx.state.combatant(id).map(|c| c.hp.current) else {
            continue;
        };
        if best.is_none_or(|(b, _)| hp < b) {
            best = Some((hp, id));
        }
    }
    best.map(|(_, id)| id)
}

/// Marksman taste: usually the closest threat, sometimes the cleanest shot.
fn marksman_pick(ctx: &mut AiContext<'_>, candidates: &[CombatantId]) -> Option<CombatantId> {
    if ctx.dice.roll(6) <= 4 {
        return closest(ctx, candidates);
    }
    let attacker = ctx.actor();
    let mut best: Option<(u32, u32, CombatantId)> = None;
    for &id in candidates {
        let Some(target) = ctx.state.combatant(id) else {
            continue;
        };
        let Some(sep) = ctx.separation(id) else {
            continue;
        };
        let chance = hit_chance(attacker, target, sep);
        let hp = target.hp.current;
        let better = match best {
            None => true,
            // Wounded targets break hit-chance ties.
            Some((bc, bhp, _)) => chance > bc || (chance == bc && hp < bhp),
        };
        if better {
            best = Some((chance, hp, id));
        }
    }
    best.map(|(_, _, id)| id)
}

/// Caster taste: closest, or the weakest, or an enemy caster to silence.
fn magus_pick(ctx: &mut AiContext<'_>, candidates: &[CombatantId]) -> Option<CombatantId> {
    match ctx.dice.roll(6) {
        1..=3 => closest(ctx, candidates),
        4..=5 => lowest_hp(ctx, candidates),
        _ => {
            let casters: Vec<CombatantId> = candidates
                .iter()
                .copied()
                .filter(|&id| ctx.state.combatant(id).is_some_and(Combatant::is_caster))
                .collect();
            if casters.is_empty() {
                closest(ctx, candidates)
            } else {
                closest(ctx, &casters)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use battle_core::{
        Archetype, BattleConfig, CombatStats, SequenceDice, Spell, SpellClass, StatusEffect,
        StatusKind, TargetingHint,
    };

    use super::*;
    use crate::context::TurnScratch;
    use crate::fixtures;

    fn stats(ranged_skill: u32, defense: u32) -> CombatStats {
        CombatStats {
            weapon_skill: 0,
            ranged_skill,
            defense,
        }
    }

    #[test]
    fn taunt_overrides_stealth_and_range() {
        let mut state = fixtures::arena(5);
        let actor = fixtures::field_monster(&mut state, 1, 0, 0);
        let near = fixtures::field_hero(&mut state, 2, 1, 0);
        let taunter = fixtures::field_hero(&mut state, 3, 4, 0);
        state
            .combatant_mut(taunter)
            .unwrap()
            .statuses
            .add(StatusEffect::new(StatusKind::Hidden, 3));
        state
            .combatant_mut(actor)
            .unwrap()
            .statuses
            .add(StatusEffect::new(StatusKind::Taunted { by: taunter }, 2));

        let config = BattleConfig::default();
        let mut dice = SequenceDice::new([]);
        let mut scratch = TurnScratch::new();
        let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);

        // Hidden at separation 4 and outside the exact-range filter, yet the
        // taunt still wins.
        assert_eq!(select_target(&mut ctx, Some(1)), Some(taunter));
        let _ = near;
    }

    #[test]
    fn expired_taunter_is_ignored() {
        let mut state = fixtures::arena(4);
        let actor = fixtures::field_monster(&mut state, 1, 0, 0);
        let near = fixtures::field_hero(&mut state, 2, 2, 0);
        let taunter = fixtures::field_hero(&mut state, 3, 3, 0);
        state
            .combatant_mut(actor)
            .unwrap()
            .statuses
            .add(StatusEffect::new(StatusKind::Taunted { by: taunter }, 2));
        state.combatant_mut(taunter).unwrap().hp.deplete();

        let config = BattleConfig::default();
        let mut dice = SequenceDice::new([]);
        let mut scratch = TurnScratch::new();
        let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);

        assert_eq!(select_target(&mut ctx, None), Some(near));
    }

    #[test]
    fn hidden_beyond_reveal_range_is_untargetable() {
        let mut state = fixtures::arena(5);
        let actor = fixtures::field_monster(&mut state, 1, 0, 0);
        let sneak = fixtures::field_hero(&mut state, 2, 3, 0);
        state
            .combatant_mut(sneak)
            .unwrap()
            .statuses
            .add(StatusEffect::new(StatusKind::Hidden, 3));

        let config = BattleConfig::default();
        let mut dice = SequenceDice::new([]);
        let mut scratch = TurnScratch::new();
        let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);
        assert_eq!(select_target(&mut ctx, None), None);

        // At the reveal boundary the cover no longer holds.
        state.relocate(sneak, battle_core::HexCoord::axial(2, 0)).unwrap();
        let mut dice = SequenceDice::new([]);
        let mut scratch = TurnScratch::new();
        let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);
        assert_eq!(select_target(&mut ctx, None), Some(sneak));
    }

    #[test]
    fn adjacent_sneak_is_skipped_only_with_open_company() {
        let mut state = fixtures::arena(4);
        let actor = fixtures::field_monster(&mut state, 1, 0, 0);
        let sneak = fixtures::field_hero(&mut state, 2, 1, 0);
        let open = fixtures::field_hero(&mut state, 3, -1, 0);
        state
            .combatant_mut(sneak)
            .unwrap()
            .statuses
            .add(StatusEffect::new(StatusKind::Hidden, 3));

        let config = BattleConfig::default();
        let mut dice = SequenceDice::new([0]);
        let mut scratch = TurnScratch::new();
        let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);
        // Both are adjacent, but the hidden one is passed over.
        assert_eq!(select_target(&mut ctx, None), Some(open));

        // Alone in reach, even a hidden victim gets picked.
        state.withdraw(open).unwrap();
        let mut dice = SequenceDice::new([0]);
        let mut scratch = TurnScratch::new();
        let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);
        assert_eq!(select_target(&mut ctx, None), Some(sneak));
    }

    #[test]
    fn exact_range_filter_matches_or_fails() {
        let mut state = fixtures::arena(5);
        let actor = fixtures::field_monster(&mut state, 1, 0, 0);
        let near = fixtures::field_hero(&mut state, 2, 2, 0);
        let far = fixtures::field_hero(&mut state, 3, 3, 0);

        let config = BattleConfig::default();
        let mut dice = SequenceDice::new([0, 0]);
        let mut scratch = TurnScratch::new();
        let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);

        assert_eq!(select_target(&mut ctx, Some(3)), Some(far));
        // Nobody at separation 4: no target, no fallback to 2 or 3.
        assert_eq!(select_target(&mut ctx, Some(4)), None);
        let _ = near;
    }

    #[test]
    fn fresh_adjacent_victims_take_priority() {
        let mut state = fixtures::arena(4);
        let actor = fixtures::field_monster(&mut state, 1, 0, 0);
        let stale = fixtures::field_hero(&mut state, 2, 1, 0);
        let fresh = fixtures::field_hero(&mut state, 3, 0, 1);
        state.note_targeted(stale);

        let config = BattleConfig::default();
        let mut dice = SequenceDice::new([0]);
        let mut scratch = TurnScratch::new();
        let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);

        assert_eq!(select_target(&mut ctx, None), Some(fresh));
    }

    #[test]
    fn dice_break_fresh_adjacent_ties() {
        let mut state = fixtures::arena(4);
        let actor = fixtures::field_monster(&mut state, 1, 0, 0);
        let a = fixtures::field_hero(&mut state, 2, 1, 0);
        let b = fixtures::field_hero(&mut state, 3, 0, 1);

        let config = BattleConfig::default();
        let mut dice = SequenceDice::new([1]);
        let mut scratch = TurnScratch::new();
        let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);
        assert_eq!(select_target(&mut ctx, None), Some(b));

        let mut dice = SequenceDice::new([0]);
        let mut scratch = TurnScratch::new();
        let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);
        assert_eq!(select_target(&mut ctx, None), Some(a));
    }

    #[test]
    fn default_taste_is_closest() {
        let mut state = fixtures::arena(5);
        let actor = fixtures::field_monster(&mut state, 1, 0, 0);
        let far = fixtures::field_hero(&mut state, 2, 4, 0);
        let near = fixtures::field_hero(&mut state, 3, 2, 0);

        let config = BattleConfig::default();
        let mut dice = SequenceDice::new([]);
        let mut scratch = TurnScratch::new();
        let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);

        assert_eq!(select_target(&mut ctx, None), Some(near));
        let _ = far;
    }

    #[test]
    fn marksman_sometimes_hunts_the_cleanest_shot() {
        let mut state = fixtures::arena(6);
        let actor =
            fixtures::field_monster_of(&mut state, 1, Archetype::HumanoidRanged, 0, 0);
        let armored = fixtures::field_hero(&mut state, 2, 2, 0);
        let exposed = fixtures::field_hero(&mut state, 3, 4, 0);
        state.combatant_mut(armored).unwrap().stats = stats(0, 6);
        state.combatant_mut(exposed).unwrap().stats = stats(0, 0);

        let config = BattleConfig::default();

        // 5 on the d6: hit-chance mode. 60-6-2=52 vs 60-0-4=56.
        let mut dice = SequenceDice::new([5]);
        let mut scratch = TurnScratch::new();
        let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);
        assert_eq!(select_target(&mut ctx, None), Some(exposed));

        // 1 to 4: plain closest.
        let mut dice = SequenceDice::new([2]);
        let mut scratch = TurnScratch::new();
        let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);
        assert_eq!(select_target(&mut ctx, None), Some(armored));
    }

    #[test]
    fn magus_sixth_face_hunts_enemy_casters() {
        let mut state = fixtures::arena(6);
        let actor = fixtures::field_monster_of(&mut state, 1, Archetype::MagicUser, 0, 0);
        let near = fixtures::field_hero(&mut state, 2, 2, 0);
        let caster = fixtures::field_hero(&mut state, 3, 4, 0);
        state.combatant_mut(caster).unwrap().spellbook.push(Spell::new(
            "firebolt",
            SpellClass::Ranged,
            TargetingHint::SmiteClosest,
            6,
            0,
        ));

        let config = BattleConfig::default();

        let mut dice = SequenceDice::new([6]);
        let mut scratch = TurnScratch::new();
        let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);
        assert_eq!(select_target(&mut ctx, None), Some(caster));

        // Low faces fall back to the closest threat.
        let mut dice = SequenceDice::new([1]);
        let mut scratch = TurnScratch::new();
        let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);
        assert_eq!(select_target(&mut ctx, None), Some(near));
    }

    #[test]
    fn magus_middle_faces_prey_on_the_weak() {
        let mut state = fixtures::arena(6);
        let actor = fixtures::field_monster_of(&mut state, 1, Archetype::MagicUser, 0, 0);
        let healthy = fixtures::field_hero(&mut state, 2, 2, 0);
        let wounded = fixtures::field_hero(&mut state, 3, 4, 0);
        state.combatant_mut(wounded).unwrap().hp.spend(9);

        let config = BattleConfig::default();
        let mut dice = SequenceDice::new([4]);
        let mut scratch = TurnScratch::new();
        let mut ctx = AiContext::new(actor, &state, &config, &mut dice, &mut scratch);

        assert_eq!(select_target(&mut ctx, None), Some(wounded));
        let _ = healthy;
    }

    #[test]
    fn hit_chance_clamps_at_both_ends() {
        let a = fixtures::monster(1, Archetype::HumanoidRanged);
        let mut b = fixtures::hero(2);

        assert_eq!(hit_chance(&a, &b, 2), 58);

        b.stats.defense = 90;
        assert_eq!(hit_chance(&a, &b, 10), 5);

        let mut sniper = fixtures::monster(3, Archetype::HumanoidRanged);
        sniper.stats.ranged_skill = 80;
        b.stats.defense = 0;
        assert_eq!(hit_chance(&sniper, &b, 1), 95);
    }
}
