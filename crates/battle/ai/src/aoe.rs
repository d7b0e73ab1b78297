//! Blast placement: where to center an area spell for the most victims.

use std::collections::BTreeSet;

use battle_core::{BattleState, Combatant, CombatantId, HexCoord};

/// A chosen blast center and how many opponents it catches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AreaPick {
    pub center: HexCoord,
    pub hits: u32,
}

/// Finds the in-range cell whose blast of `radius` catches the most
/// opponents. Returns `None` when no center catches anyone.
///
/// Only cells in and around opponent footprints are examined; a blast
/// centered anywhere else could always be slid one cell toward a victim
/// without losing anybody. Ties keep the first candidate in coordinate
/// order, so equal boards pick equal centers.
pub fn best_blast_center(
    state: &BattleState,
    caster: CombatantId,
    radius: u32,
    range: Option<u32>,
) -> Option<AreaPick> {
    let origin = state.combatant(caster)?.anchor()?;
    let mut opponents: Vec<&Combatant> = state.opponents_of(caster).collect();
    opponents.sort_by_key(|c| c.id);

    let mut candidates: BTreeSet<HexCoord> = BTreeSet::new();
    for opp in &opponents {
        let Some(cells) = opp.footprint() else {
            continue;
        };
        for &cell in &cells {
            candidates.insert(cell);
            for n in cell.neighbors() {
                candidates.insert(n);
            }
        }
    }

    let mut best: Option<AreaPick> = None;
    for &center in &candidates {
        if !state.grid.contains(center) {
            continue;
        }
        if let Some(limit) = range
            && origin.distance(center) > limit
        {
            continue;
        }
        let mut hits = 0u32;
        for opp in &opponents {
            let Some(cells) = opp.footprint() else {
                continue;
            };
            if cells.iter().any(|&c| c.distance(center) <= radius) {
                hits += 1;
            }
        }
        if hits > 0 && best.is_none_or(|b| hits > b.hits) {
            best = Some(AreaPick { center, hits });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use battle_core::Size;

    use super::*;
    use crate::fixtures;

    #[test]
    fn blast_lands_between_clustered_victims() {
        let mut state = fixtures::arena(5);
        let caster = fixtures::field_monster(&mut state, 1, -4, 0);
        fixtures::field_hero(&mut state, 2, 2, 0);
        fixtures::field_hero(&mut state, 3, 3, 0);
        fixtures::field_hero(&mut state, 4, 2, 1);

        let pick = best_blast_center(&state, caster, 1, None).unwrap();
        assert_eq!(pick.hits, 3);
        // Every victim sits within the blast of the chosen center.
        for hero in [2, 3, 4] {
            let at = state
                .combatant(CombatantId(hero))
                .unwrap()
                .anchor()
                .unwrap();
            assert!(pick.center.distance(at) <= 1);
        }
    }

    #[test]
    fn range_limit_rules_out_the_far_cluster() {
        let mut state = fixtures::arena(6);
        let caster = fixtures::field_monster(&mut state, 1, -5, 0);
        // Pair near the caster, trio far away.
        fixtures::field_hero(&mut state, 2, -3, 0);
        fixtures::field_hero(&mut state, 3, -2, 0);
        fixtures::field_hero(&mut state, 4, 4, 0);
        fixtures::field_hero(&mut state, 5, 5, 0);
        fixtures::field_hero(&mut state, 6, 4, 1);

        let free = best_blast_center(&state, caster, 1, None).unwrap();
        assert_eq!(free.hits, 3);

        let leashed = best_blast_center(&state, caster, 1, Some(4)).unwrap();
        assert_eq!(leashed.hits, 2);
        assert!(caster_distance(&state, caster, leashed.center) <= 4);
    }

    #[test]
    fn no_catch_means_no_pick() {
        let mut state = fixtures::arena(6);
        let caster = fixtures::field_monster(&mut state, 1, -5, 0);
        fixtures::field_hero(&mut state, 2, 5, 0);

        // Range 2 cannot reach anywhere near the lone hero.
        assert_eq!(best_blast_center(&state, caster, 1, Some(2)), None);
    }

    #[test]
    fn large_bodies_count_once_but_catch_wide() {
        let mut state = fixtures::arena(5);
        let caster = fixtures::field_monster(&mut state, 1, -4, 0);
        let big = state.recruit(fixtures::hero(2).with_size(Size::Large));
        state
            .field(big, HexCoord::axial(2, 0), battle_core::Facing::West)
            .unwrap();

        let pick = best_blast_center(&state, caster, 0, None).unwrap();
        // Radius 0 on a three-cell body: one victim, one hit.
        assert_eq!(pick.hits, 1);
        let cells = state.combatant(big).unwrap().footprint().unwrap();
        assert!(cells.contains(&pick.center));
    }

    fn caster_distance(state: &BattleState, caster: CombatantId, to: HexCoord) -> u32 {
        state
            .combatant(caster)
            .unwrap()
            .anchor()
            .unwrap()
            .distance(to)
    }
}
