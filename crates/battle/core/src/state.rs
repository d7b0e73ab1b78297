//! Authoritative battle state: the arena plus everyone fighting in it.
//!
//! [`BattleState`] keeps the roster and the grid's occupant index in lockstep.
//! All presence changes go through [`field`](BattleState::field),
//! [`withdraw`](BattleState::withdraw), and
//! [`relocate`](BattleState::relocate); poking a combatant's presence by hand
//! would desync the two.

use std::collections::BTreeSet;

use crate::combatant::{Combatant, CombatantId, Presence, Side};
use crate::grid::{BattleGrid, Facing, HexCoord, PlacementError};

#[derive(Clone, Debug)]
pub struct BattleState {
    pub grid: BattleGrid,
    combatants: Vec<Combatant>,
    /// Combatants someone has already singled out this round. Cleared by
    /// [`begin_round`](Self::begin_round).
    targeted: BTreeSet<CombatantId>,
}

impl BattleState {
    pub fn new(grid: BattleGrid) -> Self {
        Self {
            grid,
            combatants: Vec::new(),
            targeted: BTreeSet::new(),
        }
    }

    /// Adds a combatant to the roster (not yet on the battlefield).
    ///
    /// # Panics
    ///
    /// Panics if the id is already taken. Ids come from the scenario setup,
    /// so a collision is a bug, not a runtime condition.
    pub fn recruit(&mut self, combatant: Combatant) -> CombatantId {
        let id = combatant.id;
        assert!(
            self.index_of(id).is_none(),
            "combatant id {id} recruited twice"
        );
        self.combatants.push(combatant);
        id
    }

    fn index_of(&self, id: CombatantId) -> Option<usize> {
        self.combatants.iter().position(|c| c.id == id)
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    /// Alive, fielded members of one side.
    pub fn living_on(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.combatants
            .iter()
            .filter(move |c| c.side == side && c.is_active())
    }

    /// Alive, fielded enemies of the given combatant.
    pub fn opponents_of(&self, id: CombatantId) -> impl Iterator<Item = &Combatant> {
        let side = self.combatant(id).map(|c| c.side);
        self.combatants
            .iter()
            .filter(move |c| side.is_some_and(|s| c.side == s.opponent()) && c.is_active())
    }

    // ========================================================================
    // Presence
    // ========================================================================

    /// Puts a recruited combatant onto the battlefield.
    pub fn field(
        &mut self,
        id: CombatantId,
        anchor: HexCoord,
        facing: Facing,
    ) -> Result<(), PlacementError> {
        let idx = self.index_of(id).ok_or(PlacementError::Unknown { id })?;
        if self.combatants[idx].is_fielded() {
            return Err(PlacementError::AlreadyFielded { id });
        }
        let footprint = self.combatants[idx].size.footprint_at(anchor);
        self.grid.place(id, &footprint)?;
        self.combatants[idx].presence = Presence::Fielded { anchor, facing };
        Ok(())
    }

    /// Takes a combatant off the battlefield (death, banishment, flight).
    pub fn withdraw(&mut self, id: CombatantId) -> Result<(), PlacementError> {
        let idx = self.index_of(id).ok_or(PlacementError::Unknown { id })?;
        let Presence::Fielded { anchor, .. } = self.combatants[idx].presence else {
            return Err(PlacementError::NotFielded { id });
        };
        let footprint = self.combatants[idx].size.footprint_at(anchor);
        self.grid.vacate(id, &footprint);
        self.combatants[idx].presence = Presence::Removed;
        Ok(())
    }

    /// Moves a fielded combatant's anchor, footprint and all. Facing is kept.
    pub fn relocate(&mut self, id: CombatantId, to: HexCoord) -> Result<(), PlacementError> {
        let idx = self.index_of(id).ok_or(PlacementError::Unknown { id })?;
        let Presence::Fielded { anchor, facing } = self.combatants[idx].presence else {
            return Err(PlacementError::NotFielded { id });
        };
        let size = self.combatants[idx].size;
        self.grid
            .relocate(id, &size.footprint_at(anchor), &size.footprint_at(to))?;
        self.combatants[idx].presence = Presence::Fielded { anchor: to, facing };
        Ok(())
    }

    /// Rotates a fielded combatant in place.
    pub fn turn_to(&mut self, id: CombatantId, facing: Facing) -> Result<(), PlacementError> {
        let idx = self.index_of(id).ok_or(PlacementError::Unknown { id })?;
        let Presence::Fielded { anchor, .. } = self.combatants[idx].presence else {
            return Err(PlacementError::NotFielded { id });
        };
        self.combatants[idx].presence = Presence::Fielded { anchor, facing };
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Closest distance between two combatants' footprints. `None` unless
    /// both are fielded. Adjacent means a separation of 1.
    pub fn separation(&self, a: CombatantId, b: CombatantId) -> Option<u32> {
        let fa = self.combatant(a)?.footprint()?;
        let fb = self.combatant(b)?.footprint()?;
        let mut best: Option<u32> = None;
        for &ca in &fa {
            for &cb in &fb {
                let d = ca.distance(cb);
                if best.is_none_or(|cur| d < cur) {
                    best = Some(d);
                }
            }
        }
        best
    }

    /// The battle ends when either side has no one left standing.
    pub fn battle_over(&self) -> bool {
        self.living_on(Side::Heroes).next().is_none()
            || self.living_on(Side::Monsters).next().is_none()
    }

    // ========================================================================
    // Round bookkeeping
    // ========================================================================

    /// Records that someone has singled out `id` this round.
    pub fn note_targeted(&mut self, id: CombatantId) {
        self.targeted.insert(id);
    }

    pub fn was_targeted(&self, id: CombatantId) -> bool {
        self.targeted.contains(&id)
    }

    /// Starts a new round: fresh action points, status clocks tick down, and
    /// the targeted set resets.
    pub fn begin_round(&mut self) {
        self.targeted.clear();
        for c in &mut self.combatants {
            if c.is_alive() {
                c.ap.current = c.ap.maximum;
                c.statuses.tick_round();
            }
        }
    }
}
