//! Decision context handed to the archetype logic.

use battle_core::{
    BattleConfig, BattleState, Combatant, CombatantId, Dice, HexCoord, SightLine, sight_line,
};

/// Scratch the decision layer carries across the actions of one turn.
#[derive(Debug, Default)]
pub struct TurnScratch {
    /// Victim locked in by an earlier action this turn. Kept while valid so
    /// a monster does not flip between targets mid-turn.
    pub target: Option<CombatantId>,
}

impl TurnScratch {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Everything one decision gets to look at: the acting combatant, a read-only
/// view of the battle, tuning knobs, and the dice.
///
/// The context never mutates battle state. Decisions come out as
/// [`battle_core::ActionIntent`] values and are applied elsewhere.
pub struct AiContext<'a> {
    pub actor: CombatantId,
    pub state: &'a BattleState,
    pub config: &'a BattleConfig,
    pub dice: &'a mut dyn Dice,
    pub scratch: &'a mut TurnScratch,
}

impl<'a> AiContext<'a> {
    pub fn new(
        actor: CombatantId,
        state: &'a BattleState,
        config: &'a BattleConfig,
        dice: &'a mut dyn Dice,
        scratch: &'a mut TurnScratch,
    ) -> Self {
        Self {
            actor,
            state,
            config,
            dice,
            scratch,
        }
    }

    /// The acting combatant. Borrows from the battle state, not the context,
    /// so callers can hold it while rolling dice.
    ///
    /// # Panics
    ///
    /// Panics if the actor is not on the roster. Contexts are built by the
    /// turn controller for combatants it just looked up, so this is a bug.
    pub fn actor(&self) -> &'a Combatant {
        self.state
            .combatant(self.actor)
            .expect("acting combatant missing from roster")
    }

    /// The actor's anchor cell.
    ///
    /// # Panics
    ///
    /// Panics if the actor is not fielded.
    pub fn anchor(&self) -> HexCoord {
        self.actor()
            .anchor()
            .expect("acting combatant is not fielded")
    }

    /// Closest footprint distance between the actor and another combatant.
    pub fn separation(&self, other: CombatantId) -> Option<u32> {
        self.state.separation(self.actor, other)
    }

    /// Sight from the actor's anchor to another combatant's anchor.
    pub fn sight_to(&self, other: CombatantId) -> Option<SightLine> {
        let to = self.state.combatant(other)?.anchor()?;
        Some(sight_line(
            &self.state.grid,
            self.anchor(),
            to,
            self.config.shot_obstruction_limit,
        ))
    }

    /// Living, fielded opponents in id order. Id order keeps every
    /// first-match scan in the decision layer deterministic across roster
    /// orderings.
    pub fn opponents(&self) -> Vec<&'a Combatant> {
        let mut out: Vec<&Combatant> = self.state.opponents_of(self.actor).collect();
        out.sort_by_key(|c| c.id);
        out
    }

    /// Lowest-id opponent standing adjacent to the actor.
    pub fn adjacent_opponent(&self) -> Option<&'a Combatant> {
        self.opponents()
            .into_iter()
            .find(|c| self.separation(c.id) == Some(1))
    }
}
