//! Timed status effects and the per-combatant set that holds them.

use arrayvec::ArrayVec;

use crate::combatant::CombatantId;
use crate::config::BattleConfig;

/// What a status effect does to its bearer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatusKind {
    /// Compelled to attack the taunting combatant.
    Taunted { by: CombatantId },
    /// Concealed; hard or impossible to target from afar.
    Hidden,
    Frightened,
    Weakened,
    Shielded,
    Rooted,
}

impl StatusKind {
    /// Same effect, ignoring payload. Taunts from different sources refresh
    /// each other rather than stacking.
    fn same_slot(self, other: StatusKind) -> bool {
        matches!(
            (self, other),
            (StatusKind::Taunted { .. }, StatusKind::Taunted { .. })
                | (StatusKind::Hidden, StatusKind::Hidden)
                | (StatusKind::Frightened, StatusKind::Frightened)
                | (StatusKind::Weakened, StatusKind::Weakened)
                | (StatusKind::Shielded, StatusKind::Shielded)
                | (StatusKind::Rooted, StatusKind::Rooted)
        )
    }
}

/// A status effect with a remaining duration in rounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub remaining_rounds: u32,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, remaining_rounds: u32) -> Self {
        Self {
            kind,
            remaining_rounds,
        }
    }
}

/// The set of status effects on one combatant. At most one effect per kind;
/// re-applying refreshes the duration to the longer of the two.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind.same_slot(kind))
    }

    /// Apply an effect. An existing effect of the same kind is replaced,
    /// keeping the longer duration. New effects past the cap are dropped.
    pub fn add(&mut self, effect: StatusEffect) {
        if let Some(existing) = self
            .effects
            .iter_mut()
            .find(|e| e.kind.same_slot(effect.kind))
        {
            existing.kind = effect.kind;
            existing.remaining_rounds = existing.remaining_rounds.max(effect.remaining_rounds);
            return;
        }
        let _ = self.effects.try_push(effect);
    }

    pub fn remove(&mut self, kind: StatusKind) {
        self.effects.retain(|e| !e.kind.same_slot(kind));
    }

    /// Count down one round; effects that reach zero expire.
    pub fn tick_round(&mut self) {
        for effect in &mut self.effects {
            effect.remaining_rounds = effect.remaining_rounds.saturating_sub(1);
        }
        self.effects.retain(|e| e.remaining_rounds > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    /// Source of an active taunt, if any.
    pub fn taunted_by(&self) -> Option<CombatantId> {
        self.effects.iter().find_map(|e| match e.kind {
            StatusKind::Taunted { by } => Some(by),
            _ => None,
        })
    }
}
