//! Whole-turn scenarios against the rehearsal executor and mocks.

use async_trait::async_trait;
use battle_core::{
    ActionIntent, Archetype, BattleConfig, BattleGrid, BattleState, Combatant, CombatantId,
    CombatantKind, Facing, HexCoord, RangedProfile, Side,
};
use battle_runtime::{
    ActionExecutor, ActionOutcome, RehearsalExecutor, Result, RuntimeError, TurnController,
};

fn monster(id: u32, archetype: Archetype) -> Combatant {
    Combatant::new(
        CombatantId(id),
        format!("monster-{id}"),
        Side::Monsters,
        CombatantKind::Monster(archetype),
    )
    .with_hp(10)
    .with_ap(2)
    .with_movement(4)
}

fn hero(id: u32) -> Combatant {
    Combatant::new(
        CombatantId(id),
        format!("hero-{id}"),
        Side::Heroes,
        CombatantKind::Hero,
    )
    .with_hp(12)
    .with_ap(2)
}

fn controller() -> TurnController {
    TurnController::seeded(BattleConfig::default(), 42)
}

/// Executor that refuses everything, spending nothing.
struct RefusingExecutor {
    calls: u32,
}

#[async_trait]
impl ActionExecutor for RefusingExecutor {
    async fn perform(
        &mut self,
        _state: &mut BattleState,
        _actor: CombatantId,
        _intent: &ActionIntent,
    ) -> Result<ActionOutcome> {
        self.calls += 1;
        Ok(ActionOutcome::failure("nothing happens"))
    }
}

#[tokio::test]
async fn stall_guard_ends_a_wedged_turn_in_one_iteration() {
    let mut state = BattleState::new(BattleGrid::hexagon(3));
    let wolf = state.recruit(monster(1, Archetype::AggressiveMelee));
    let mark = state.recruit(hero(2));
    state.field(wolf, HexCoord::ORIGIN, Facing::East).unwrap();
    state.field(mark, HexCoord::axial(2, 0), Facing::West).unwrap();

    let mut executor = RefusingExecutor { calls: 0 };
    let report = controller()
        .run_turn(&mut state, &mut executor, wolf)
        .await
        .unwrap();

    assert_eq!(executor.calls, 1);
    assert!(report.stalled);
    assert_eq!(state.combatant(wolf).unwrap().ap.current, 0);
    assert!(report.transcript.iter().any(|line| line.contains("gives up")));
}

#[tokio::test]
async fn a_reachable_hero_draws_a_charge_not_a_walk() {
    let mut state = BattleState::new(BattleGrid::hexagon(2));
    let wolf = state.recruit(monster(1, Archetype::AggressiveMelee));
    let mark = state.recruit(hero(2));
    state.field(wolf, HexCoord::ORIGIN, Facing::East).unwrap();
    state.field(mark, HexCoord::axial(2, 0), Facing::West).unwrap();

    let mut executor = RehearsalExecutor::new();
    let report = controller()
        .run_turn(&mut state, &mut executor, wolf)
        .await
        .unwrap();

    assert!(report.intents[0].is_charge());
    assert!(!matches!(report.intents[0], ActionIntent::Move { .. }));
    assert_eq!(state.separation(wolf, mark), Some(1));
}

#[tokio::test]
async fn crowded_shooters_open_the_distance_within_their_legs() {
    let mut state = BattleState::new(BattleGrid::hexagon(5));
    let archer = state.recruit(
        monster(1, Archetype::HumanoidRanged)
            .with_ap(1)
            .with_ranged(RangedProfile {
                max_range: 6,
                min_safe_range: 3,
            }),
    );
    let mark = state.recruit(hero(2));
    state.field(archer, HexCoord::ORIGIN, Facing::East).unwrap();
    state.field(mark, HexCoord::axial(1, 0), Facing::West).unwrap();

    let mut executor = RehearsalExecutor::new();
    let report = controller()
        .run_turn(&mut state, &mut executor, archer)
        .await
        .unwrap();

    let ActionIntent::Move { path } = &report.intents[0] else {
        panic!("expected a retreat, got {}", report.intents[0]);
    };
    let landing = *path.last().unwrap();
    assert!(landing.distance(HexCoord::axial(1, 0)) > 1);
    assert!(path.len() - 1 <= 4);
    assert_eq!(
        state.combatant(archer).unwrap().anchor(),
        Some(landing)
    );
}

#[tokio::test]
async fn a_decided_battle_ends_the_turn_before_any_decision() {
    let mut state = BattleState::new(BattleGrid::hexagon(3));
    let wolf = state.recruit(monster(1, Archetype::AggressiveMelee));
    state.field(wolf, HexCoord::ORIGIN, Facing::East).unwrap();

    let mut executor = RehearsalExecutor::new();
    let report = controller()
        .run_turn(&mut state, &mut executor, wolf)
        .await
        .unwrap();

    assert!(report.intents.is_empty());
    assert!(report.transcript.is_empty());
    assert_eq!(state.combatant(wolf).unwrap().ap.current, 2);
}

#[tokio::test]
async fn heroes_are_refused_outright() {
    let mut state = BattleState::new(BattleGrid::hexagon(3));
    let mark = state.recruit(hero(1));
    let wolf = state.recruit(monster(2, Archetype::AggressiveMelee));
    state.field(mark, HexCoord::ORIGIN, Facing::East).unwrap();
    state.field(wolf, HexCoord::axial(2, 0), Facing::West).unwrap();

    let mut executor = RehearsalExecutor::new();
    let refusal = controller().run_turn(&mut state, &mut executor, mark).await;

    assert!(matches!(refusal, Err(RuntimeError::NotAiControlled(id)) if id == mark));
}

#[tokio::test]
async fn unfielded_monsters_are_refused() {
    let mut state = BattleState::new(BattleGrid::hexagon(3));
    let wolf = state.recruit(monster(1, Archetype::AggressiveMelee));
    let mark = state.recruit(hero(2));
    state.field(mark, HexCoord::ORIGIN, Facing::East).unwrap();

    let mut executor = RehearsalExecutor::new();
    let refusal = controller().run_turn(&mut state, &mut executor, wolf).await;

    assert!(matches!(refusal, Err(RuntimeError::NotFielded(id)) if id == wolf));
}

#[tokio::test]
async fn a_full_turn_drains_ap_and_closes_with_a_facing_line() {
    let mut state = BattleState::new(BattleGrid::hexagon(4));
    let wolf = state.recruit(monster(1, Archetype::AggressiveMelee));
    let mark = state.recruit(hero(2));
    // The hero stands west; the wolf starts facing east and must turn.
    state.field(wolf, HexCoord::ORIGIN, Facing::East).unwrap();
    state
        .field(mark, HexCoord::axial(-2, 0), Facing::East)
        .unwrap();

    let mut executor = RehearsalExecutor::new();
    let report = controller()
        .run_turn(&mut state, &mut executor, wolf)
        .await
        .unwrap();

    assert_eq!(state.combatant(wolf).unwrap().ap.current, 0);
    assert!(!report.intents.is_empty());
    assert_eq!(report.facing, Some(Facing::West));
    let closing = report.transcript.last().unwrap();
    assert!(closing.contains("turns to face west"), "got: {closing}");
    assert_eq!(state.combatant(wolf).unwrap().facing(), Some(Facing::West));
}

#[tokio::test]
async fn boxed_in_monsters_hesitate_their_turn_away() {
    let mut state = BattleState::new(BattleGrid::hexagon(4));
    for n in HexCoord::ORIGIN.neighbors() {
        state.grid.raise_wall(n).unwrap();
    }
    let wolf = state.recruit(monster(1, Archetype::AggressiveMelee));
    let mark = state.recruit(hero(2));
    state.field(wolf, HexCoord::ORIGIN, Facing::East).unwrap();
    state.field(mark, HexCoord::axial(3, 0), Facing::West).unwrap();

    let mut executor = RehearsalExecutor::new();
    let report = controller()
        .run_turn(&mut state, &mut executor, wolf)
        .await
        .unwrap();

    // Two action points, two narrated hesitations, no stall.
    assert_eq!(
        report.intents,
        vec![ActionIntent::Hesitate, ActionIntent::Hesitate]
    );
    assert!(!report.stalled);
    assert_eq!(
        report
            .transcript
            .iter()
            .filter(|line| line.contains("hesitates"))
            .count(),
        2
    );
    assert_eq!(state.combatant(wolf).unwrap().ap.current, 0);
}
