//! End-of-turn facing: which way a monster turns once its actions are spent.
//!
//! Each of the six facings is scored by how much opponent threat it covers.
//! Adjacent enemies dominate the math; distant ones merely lean it. A facing
//! that leaves an enemy squarely behind covers none of that enemy's threat.

use battle_core::{BattleConfig, BattleState, CombatantId, Dice, Facing, HexCoord, choose};

/// Where an opponent sits relative to a body's facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sector {
    Front,
    FrontFlank,
    Side,
    Rear,
}

impl Sector {
    /// Sector of `target` as seen from `anchor` while facing `facing`.
    ///
    /// Targets sitting exactly between two directions count toward the more
    /// frontal one.
    pub fn of(anchor: HexCoord, facing: Facing, target: HexCoord) -> Self {
        let toward = anchor.facing_toward(target, facing);
        match facing.arc_to(toward) {
            0 => Sector::Front,
            1 => Sector::FrontFlank,
            2 => Sector::Side,
            _ => Sector::Rear,
        }
    }

    /// Threat covered by keeping an opponent in this sector.
    fn covered_threat(self, adjacent: bool) -> u32 {
        match (self, adjacent) {
            (Sector::Front, true) => 100,
            (Sector::FrontFlank, true) => 50,
            (Sector::Side, true) => 20,
            (Sector::Front, false) => 10,
            (Sector::FrontFlank, false) => 5,
            (Sector::Side, false) => 2,
            (Sector::Rear, _) => 0,
        }
    }
}

/// Picks the facing that covers the most opponent threat, or `None` when
/// there is nobody to face (keep whatever facing the combatant has).
///
/// When exactly two facings tie for best and point opposite ways, the
/// combatant is being pulled from both sides; it turns to the best of the
/// remaining four facings instead of arbitrarily showing one threat its back.
/// Any other tie is settled by dice.
pub fn choose_facing(
    state: &BattleState,
    config: &BattleConfig,
    actor: CombatantId,
    dice: &mut dyn Dice,
) -> Option<Facing> {
    let anchor = state.combatant(actor)?.anchor()?;
    let reveal = config.stealth_reveal_range;

    let threats: Vec<(HexCoord, bool)> = state
        .opponents_of(actor)
        .filter(|c| {
            !c.is_hidden()
                || state
                    .separation(actor, c.id)
                    .is_some_and(|sep| sep <= reveal)
        })
        .filter_map(|c| {
            let at = c.anchor()?;
            Some((at, state.separation(actor, c.id) == Some(1)))
        })
        .collect();
    if threats.is_empty() {
        return None;
    }

    let mut scored: [(Facing, u32); 6] = Facing::ALL.map(|f| (f, 0));
    for (facing, score) in &mut scored {
        *score = threats
            .iter()
            .map(|&(at, adjacent)| Sector::of(anchor, *facing, at).covered_threat(adjacent))
            .sum();
    }

    let top = scored.iter().map(|&(_, s)| s).max().unwrap_or(0);
    let best: Vec<Facing> = scored
        .iter()
        .filter(|&&(_, s)| s == top)
        .map(|&(f, _)| f)
        .collect();

    if let [a, b] = best[..]
        && a.opposite() == b
    {
        let mut side_top = 0;
        for &(f, s) in &scored {
            if f != a && f != b && s > side_top {
                side_top = s;
            }
        }
        let pool: Vec<Facing> = scored
            .iter()
            .filter(|&&(f, s)| f != a && f != b && s == side_top)
            .map(|&(f, _)| f)
            .collect();
        return choose(dice, &pool).copied();
    }

    choose(dice, &best).copied()
}
