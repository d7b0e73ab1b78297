//! The boundary between deciding an action and making it happen.
//!
//! The engine emits [`battle_core::ActionIntent`] values; an
//! [`ActionExecutor`] resolves them against the battle state. Real embedders
//! bring their own executor (combat math, animation, a human confirming
//! outcomes over the wire). [`RehearsalExecutor`] is the built-in one: it
//! applies movement and bookkeeping but no damage, which is enough to drive
//! full turns in tests and demos.

use std::collections::BTreeSet;

use async_trait::async_trait;
use battle_core::{ActionIntent, BattleState, CombatantId, HexCoord, MeleeStyle};
use tracing::trace;

use crate::error::{Result, RuntimeError};

/// What an executed action came to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionOutcome {
    /// False when the intent could not be carried out at all.
    pub succeeded: bool,
    /// Action points the attempt consumed. Zero for a refused action.
    pub ap_spent: u32,
    /// Narration line for the transcript, if the executor has one.
    pub message: Option<String>,
}

impl ActionOutcome {
    pub fn success(ap_spent: u32) -> Self {
        Self {
            succeeded: true,
            ap_spent,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            ap_spent: 0,
            message: Some(message.into()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Applies one decided action to the battle.
///
/// Implementations may suspend (asking a server, a human, an animation
/// queue); the turn controller awaits them one at a time.
#[async_trait]
pub trait ActionExecutor: Send {
    async fn perform(
        &mut self,
        state: &mut BattleState,
        actor: CombatantId,
        intent: &ActionIntent,
    ) -> Result<ActionOutcome>;
}

/// Executor that walks through the motions without resolving combat.
///
/// Movement relocates bodies on the grid, aim stances toggle, targets get
/// marked as singled out. Attacks, casts, and abilities succeed without
/// dealing damage. Each action costs one action point.
#[derive(Debug, Default)]
pub struct RehearsalExecutor;

impl RehearsalExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Free cells next to the target's footprint, nearest-first.
    fn charge_landings(
        state: &BattleState,
        actor: CombatantId,
        target: CombatantId,
    ) -> Vec<HexCoord> {
        let Some(anchor) = state.combatant(actor).and_then(|c| c.anchor()) else {
            return Vec::new();
        };
        let Some(cells) = state.combatant(target).and_then(|c| c.footprint()) else {
            return Vec::new();
        };
        let mut ring = BTreeSet::new();
        for &cell in &cells {
            for n in state.grid.neighbors(cell) {
                ring.insert(n);
            }
        }
        for &cell in &cells {
            ring.remove(&cell);
        }
        let mut landings: Vec<HexCoord> = ring
            .into_iter()
            .filter(|&at| state.grid.occupant(at).is_none_or(|by| by == actor))
            .collect();
        landings.sort_by_key(|&at| (anchor.distance(at), at));
        landings
    }
}

#[async_trait]
impl ActionExecutor for RehearsalExecutor {
    async fn perform(
        &mut self,
        state: &mut BattleState,
        actor: CombatantId,
        intent: &ActionIntent,
    ) -> Result<ActionOutcome> {
        let name = state
            .combatant(actor)
            .ok_or(RuntimeError::UnknownCombatant(actor))?
            .name
            .clone();
        trace!(%actor, %intent, "rehearsing action");

        let outcome = match intent {
            ActionIntent::Move { path } => {
                let Some(&landing) = path.last() else {
                    return Ok(ActionOutcome::failure(format!(
                        "{name} plans a move that goes nowhere"
                    )));
                };
                match state.relocate(actor, landing) {
                    Ok(()) => ActionOutcome::success(1)
                        .with_message(format!("{name}: {intent}")),
                    Err(err) => ActionOutcome::failure(format!(
                        "{name} cannot complete the move: {err}"
                    )),
                }
            }
            ActionIntent::Melee { target, style } => {
                if *style == MeleeStyle::Charge && state.separation(actor, *target) != Some(1) {
                    // Close the distance first; try each landing in turn.
                    let landings = Self::charge_landings(state, actor, *target);
                    let landed = landings
                        .into_iter()
                        .any(|at| state.relocate(actor, at).is_ok());
                    if !landed {
                        return Ok(ActionOutcome::failure(format!(
                            "{name} finds no room to charge {target}"
                        )));
                    }
                }
                state.note_targeted(*target);
                ActionOutcome::success(1).with_message(format!("{name}: {intent}"))
            }
            ActionIntent::Parry => ActionOutcome::success(1)
                .with_message(format!("{name} sets a guard")),
            ActionIntent::Aim { target } => {
                if let Some(c) = state.combatant_mut(actor) {
                    c.aiming = true;
                }
                state.note_targeted(*target);
                ActionOutcome::success(1).with_message(format!("{name}: {intent}"))
            }
            ActionIntent::Shoot { target, .. } => {
                if let Some(c) = state.combatant_mut(actor) {
                    c.aiming = false;
                }
                state.note_targeted(*target);
                ActionOutcome::success(1).with_message(format!("{name}: {intent}"))
            }
            ActionIntent::Cast { spell, target } => {
                let known = state
                    .combatant(actor)
                    .is_some_and(|c| *spell < c.spellbook.len());
                if !known {
                    return Ok(ActionOutcome::failure(format!(
                        "{name} reaches for a spell it does not know"
                    )));
                }
                if let battle_core::SpellTarget::Combatant(id) = target {
                    state.note_targeted(*id);
                }
                ActionOutcome::success(1).with_message(format!("{name}: {intent}"))
            }
            ActionIntent::UseAbility { target, .. } => {
                if let Some(id) = target {
                    state.note_targeted(*id);
                }
                ActionOutcome::success(1).with_message(format!("{name}: {intent}"))
            }
            // Dithering is still an action spent.
            ActionIntent::Hesitate => ActionOutcome::success(1),
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use battle_core::{
        Archetype, BattleState, BattleGrid, Combatant, CombatantKind, Facing, Side,
    };

    use super::*;

    fn setup() -> (BattleState, CombatantId, CombatantId) {
        let mut state = BattleState::new(BattleGrid::hexagon(4));
        let wolf = state.recruit(
            Combatant::new(
                CombatantId(1),
                "wolf",
                Side::Monsters,
                CombatantKind::Monster(Archetype::AggressiveMelee),
            )
            .with_hp(8)
            .with_ap(2),
        );
        let hero = state.recruit(
            Combatant::new(CombatantId(2), "hero", Side::Heroes, CombatantKind::Hero)
                .with_hp(10)
                .with_ap(2),
        );
        state.field(wolf, HexCoord::ORIGIN, Facing::East).unwrap();
        state
            .field(hero, HexCoord::axial(3, 0), Facing::West)
            .unwrap();
        (state, wolf, hero)
    }

    #[tokio::test]
    async fn moves_relocate_the_body() {
        let (mut state, wolf, _) = setup();
        let path = vec![HexCoord::ORIGIN, HexCoord::axial(1, 0)];
        let outcome = RehearsalExecutor::new()
            .perform(&mut state, wolf, &ActionIntent::Move { path })
            .await
            .unwrap();

        assert!(outcome.succeeded);
        assert_eq!(outcome.ap_spent, 1);
        assert_eq!(
            state.combatant(wolf).unwrap().anchor(),
            Some(HexCoord::axial(1, 0))
        );
    }

    #[tokio::test]
    async fn charges_land_adjacent_and_mark_the_victim() {
        let (mut state, wolf, hero) = setup();
        let intent = ActionIntent::Melee {
            target: hero,
            style: MeleeStyle::Charge,
        };
        let outcome = RehearsalExecutor::new()
            .perform(&mut state, wolf, &intent)
            .await
            .unwrap();

        assert!(outcome.succeeded);
        assert_eq!(state.separation(wolf, hero), Some(1));
        assert!(state.was_targeted(hero));
    }

    #[tokio::test]
    async fn aim_then_shoot_toggles_the_stance() {
        let (mut state, wolf, hero) = setup();
        let mut executor = RehearsalExecutor::new();

        executor
            .perform(&mut state, wolf, &ActionIntent::Aim { target: hero })
            .await
            .unwrap();
        assert!(state.combatant(wolf).unwrap().aiming);

        executor
            .perform(
                &mut state,
                wolf,
                &ActionIntent::Shoot {
                    target: hero,
                    aimed: true,
                },
            )
            .await
            .unwrap();
        assert!(!state.combatant(wolf).unwrap().aiming);
    }

    #[tokio::test]
    async fn unknown_spells_are_refused() {
        let (mut state, wolf, hero) = setup();
        let intent = ActionIntent::Cast {
            spell: 0,
            target: battle_core::SpellTarget::Combatant(hero),
        };
        let outcome = RehearsalExecutor::new()
            .perform(&mut state, wolf, &intent)
            .await
            .unwrap();

        assert!(!outcome.succeeded);
        assert_eq!(outcome.ap_spent, 0);
    }
}
