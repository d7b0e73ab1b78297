//! The turn loop: decide, execute, account, repeat until the actor is out
//! of action points or the battle is over.

use battle_ai::{AiContext, TurnScratch, choose_facing, decide};
use battle_core::{ActionIntent, BattleConfig, BattleState, CombatantId, Dice, Facing, PcgDice};
use tracing::{debug, warn};

use crate::error::{Result, RuntimeError};
use crate::executor::ActionExecutor;
use crate::narration;

/// Everything one turn produced, for logs and presentation.
#[derive(Debug)]
pub struct TurnReport {
    pub actor: CombatantId,
    /// Every intent the actor committed to, in order.
    pub intents: Vec<ActionIntent>,
    /// Narration lines, one per noteworthy moment. Hesitations and stalls
    /// always narrate; a facing change closes the turn.
    pub transcript: Vec<String>,
    /// True when the stall guard had to end the turn.
    pub stalled: bool,
    /// Facing applied at the end of the turn, if any opponent drew one.
    pub facing: Option<Facing>,
}

impl TurnReport {
    fn new(actor: CombatantId) -> Self {
        Self {
            actor,
            intents: Vec::new(),
            transcript: Vec::new(),
            stalled: false,
            facing: None,
        }
    }
}

/// Drives whole monster turns against an [`ActionExecutor`].
///
/// The controller owns the dice so every decision in a battle draws from one
/// stream; feed it a seeded die to replay a battle move for move.
pub struct TurnController {
    config: BattleConfig,
    dice: Box<dyn Dice>,
}

impl TurnController {
    pub fn new(config: BattleConfig, dice: Box<dyn Dice>) -> Self {
        Self { config, dice }
    }

    /// Controller with a deterministic dice stream.
    pub fn seeded(config: BattleConfig, seed: u64) -> Self {
        Self::new(config, Box::new(PcgDice::seeded(seed)))
    }

    /// Runs one combatant's full turn.
    ///
    /// Each iteration decides one action and has the executor perform it.
    /// The loop ends when the battle is decided, the actor runs out of
    /// action points, or an iteration spends nothing (the stall guard then
    /// zeroes the actor's AP so a broken executor cannot wedge the battle).
    /// Afterwards the end-of-turn facing rule is applied and narrated.
    pub async fn run_turn(
        &mut self,
        state: &mut BattleState,
        executor: &mut dyn ActionExecutor,
        actor: CombatantId,
    ) -> Result<TurnReport> {
        let combatant = state
            .combatant(actor)
            .ok_or(RuntimeError::UnknownCombatant(actor))?;
        if combatant.archetype().is_none() {
            return Err(RuntimeError::NotAiControlled(actor));
        }
        if !combatant.is_fielded() {
            return Err(RuntimeError::NotFielded(actor));
        }

        let mut report = TurnReport::new(actor);
        let mut scratch = TurnScratch::new();

        loop {
            if state.battle_over() {
                debug!(%actor, "battle decided, ending turn early");
                break;
            }
            let Some(before) = state.combatant(actor).map(|c| c.ap.current) else {
                break;
            };
            if before == 0 {
                break;
            }

            let intent = {
                let mut ctx =
                    AiContext::new(actor, state, &self.config, self.dice.as_mut(), &mut scratch);
                decide(&mut ctx)
            };
            if matches!(intent, ActionIntent::Hesitate) {
                report.transcript.push(narration::hesitation(state, actor));
            }
            report.intents.push(intent.clone());

            let outcome = executor.perform(state, actor, &intent).await?;
            if outcome.ap_spent > 0
                && let Some(c) = state.combatant_mut(actor)
            {
                c.ap.spend(outcome.ap_spent);
            }
            if let Some(line) = outcome.message {
                report.transcript.push(line);
            }

            let after = state.combatant(actor).map_or(0, |c| c.ap.current);
            if after >= before {
                // Nothing was paid for. End the turn before it loops forever.
                warn!(%actor, %intent, "action spent no points, ending turn");
                if let Some(c) = state.combatant_mut(actor) {
                    c.ap.deplete();
                }
                report.transcript.push(narration::stall(state, actor, &intent));
                report.stalled = true;
                break;
            }
        }

        // Spend or stalled, the survivor still picks a direction to guard.
        if state.combatant(actor).is_some_and(|c| c.is_active())
            && let Some(facing) = choose_facing(state, &self.config, actor, self.dice.as_mut())
            && state.combatant(actor).and_then(|c| c.facing()) != Some(facing)
        {
            state.turn_to(actor, facing)?;
            report
                .transcript
                .push(narration::faces(state, actor, facing));
            report.facing = Some(facing);
        }

        debug!(
            %actor,
            actions = report.intents.len(),
            stalled = report.stalled,
            "turn complete"
        );
        Ok(report)
    }
}
