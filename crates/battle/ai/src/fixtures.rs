//! Shared battle setups for the decision-layer tests.

use battle_core::{
    Archetype, BattleGrid, BattleState, Combatant, CombatantId, CombatantKind, Facing, HexCoord,
    Side,
};

pub(crate) fn arena(radius: u32) -> BattleState {
    BattleState::new(BattleGrid::hexagon(radius))
}

pub(crate) fn monster(id: u32, archetype: Archetype) -> Combatant {
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

pub(crate) fn hero(id: u32) -> Combatant {
    Combatant::new(
        CombatantId(id),
        format!("hero-{id}"),
        Side::Heroes,
        CombatantKind::Hero,
    )
    .with_hp(12)
    .with_ap(2)
}

pub(crate) fn field_monster_of(
    state: &mut BattleState,
    id: u32,
    archetype: Archetype,
    q: i32,
    r: i32,
) -> CombatantId {
    let cid = state.recruit(monster(id, archetype));
    state
        .field(cid, HexCoord::axial(q, r), Facing::East)
        .unwrap();
    cid
}

pub(crate) fn field_monster(state: &mut BattleState, id: u32, q: i32, r: i32) -> CombatantId {
    field_monster_of(state, id, Archetype::AggressiveMelee, q, r)
}

pub(crate) fn field_hero(state: &mut BattleState, id: u32, q: i32, r: i32) -> CombatantId {
    let cid = state.recruit(hero(id));
    state
        .field(cid, HexCoord::axial(q, r), Facing::West)
        .unwrap();
    cid
}
