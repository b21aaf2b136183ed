//! Turn resolution
//!
//! Each unit may queue one action per turn. `resolve_turn` drains the
//! queue, orders it by action speed (fastest first, queue order on ties)
//! and executes the actions one after another, so every action sees the
//! world exactly as the previous one left it.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use super::{Action, TurnReport};
use crate::dungeon::Position;
use crate::grid::{Occupancy, Step, line_of_sight_clear};
use crate::rng::GameRng;
use crate::state::GameState;
use crate::unit::{Capabilities, UnitId};
use crate::world::{ActionError, GameEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    Idle,
    Resolving,
}

/// Registration, occupancy and the pending action queue
#[derive(Debug, Default)]
pub struct TurnEngine {
    registered: Vec<UnitId>,
    occupancy: Occupancy,
    pending: Vec<(UnitId, Action)>,
    turn: u32,
    phase: TurnPhase,
    deaths: Vec<UnitId>,
}

impl TurnEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed turns
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_registered(&self, id: UnitId) -> bool {
        self.registered.contains(&id)
    }

    /// Registered units in registration order
    pub fn registered(&self) -> &[UnitId] {
        &self.registered
    }

    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    pub fn pending_action(&self, id: UnitId) -> Option<&Action> {
        self.pending.iter().find(|(u, _)| *u == id).map(|(_, a)| a)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn record_death(&mut self, id: UnitId) {
        self.deaths.push(id);
    }
}

impl GameState {
    /// Put a live unit into play on its current tile.
    ///
    /// Returns false if the unit is dead or its tile is taken.
    pub fn register_unit(&mut self, id: UnitId) -> bool {
        if self.turns.is_registered(id) {
            return true;
        }
        let Some(unit) = self.living(id) else {
            return false;
        };
        let (pos, allowance) = (unit.position(), unit.move_allowance());
        if !self.turns.occupancy.place(id, pos) {
            return false;
        }
        self.turns.registered.push(id);
        self.movement.register(id, allowance);
        true
    }

    /// Take a unit out of play; its tile and queued action are released
    pub fn unregister_unit(&mut self, id: UnitId) {
        self.turns.registered.retain(|&u| u != id);
        self.turns.pending.retain(|(u, _)| *u != id);
        self.turns.occupancy.remove(id);
        self.movement.unregister(id);
    }

    /// Queue an action for this turn.
    ///
    /// A second call for the same unit replaces the first but keeps its
    /// place in the queue. Unregistered units are ignored.
    pub fn queue_action(&mut self, id: UnitId, action: Action) -> bool {
        if !self.turns.is_registered(id) {
            return false;
        }
        if let Some(slot) = self.turns.pending.iter_mut().find(|(u, _)| *u == id) {
            slot.1 = action;
        } else {
            self.turns.pending.push((id, action));
        }
        true
    }

    /// Resolve every queued action, then run end-of-turn upkeep.
    ///
    /// Returns `None` without doing anything when already resolving or
    /// when nothing is queued.
    pub fn resolve_turn(&mut self, rng: &mut GameRng) -> Option<TurnReport> {
        if self.turns.phase == TurnPhase::Resolving || self.turns.pending.is_empty() {
            return None;
        }
        self.turns.phase = TurnPhase::Resolving;
        self.log.end_turn();

        let mut queue = std::mem::take(&mut self.turns.pending);
        queue.sort_by_key(|(id, _)| {
            Reverse(self.unit(*id).map_or(i32::MIN, |u| u.stats.action_speed))
        });

        for id in self.turns.registered.clone() {
            if let Some(unit) = self.living(id) {
                let allowance = unit.move_allowance();
                self.movement.reset(id, allowance);
            }
        }

        let mut report = TurnReport::default();
        for (id, action) in queue {
            if self.living(id).is_none() || !self.turns.is_registered(id) {
                report.skipped.push(id);
                continue;
            }
            match self.execute_action(id, action, rng) {
                Ok(()) => report.resolved.push(id),
                Err(err) => {
                    if let Some(unit) = self.unit(id) {
                        let msg = format!("{}: {err}", unit.name);
                        self.log.push(msg);
                    }
                    report.failed.push((id, err));
                }
            }
        }

        self.turns.turn += 1;
        self.advance_turn_counters();

        report.turn = self.turns.turn;
        report.deaths = std::mem::take(&mut self.turns.deaths);
        self.turns.phase = TurnPhase::Idle;
        log::debug!(
            "turn {} resolved: {} ok, {} failed, {} deaths",
            report.turn,
            report.resolved.len(),
            report.failed.len(),
            report.deaths.len()
        );
        Some(report)
    }

    /// Advance the clock with nothing queued: counters still tick
    pub fn pass_turn(&mut self) {
        if self.turns.phase == TurnPhase::Resolving {
            return;
        }
        self.log.end_turn();
        self.turns.turn += 1;
        self.advance_turn_counters();
    }

    fn execute_action(
        &mut self,
        id: UnitId,
        action: Action,
        rng: &mut GameRng,
    ) -> Result<(), ActionError> {
        match action {
            Action::Move { dx, dy } => self.handle_move_action(id, &[Step::new(dx, dy)]).map(drop),
            Action::Path(steps) => self.handle_move_action(id, &steps).map(drop),
            Action::Skill { skill, target } => self.resolve_skill(id, skill, target, rng),
            Action::Attack { target } => self.attack(id, target),
        }
    }

    fn attack(&mut self, id: UnitId, target: UnitId) -> Result<(), ActionError> {
        let attacker = self.living(id).ok_or(ActionError::UnitDead(id))?;
        if !attacker.can(Capabilities::COMBATANT) {
            return Err(ActionError::NoTarget);
        }
        let defender = self.unit(target).ok_or(ActionError::UnknownUnit(target))?;
        if !defender.is_alive() {
            return Err(ActionError::TargetDead(target));
        }
        if !attacker.is_hostile_to(defender) {
            return Err(ActionError::NoTarget);
        }
        self.check_engagement(id, target)?;
        self.resolve_engagement(id, target);
        Ok(())
    }

    /// Attack range and line of sight from `attacker` to `defender`
    pub fn check_engagement(&self, attacker: UnitId, defender: UnitId) -> Result<(), ActionError> {
        let a = self.living(attacker).ok_or(ActionError::UnitDead(attacker))?;
        let d = self.living(defender).ok_or(ActionError::TargetDead(defender))?;
        let distance = a.position().manhattan(d.position());
        if distance > a.stats.attack_range {
            return Err(ActionError::OutOfRange {
                distance,
                min: 1,
                max: a.stats.attack_range,
            });
        }
        if !line_of_sight_clear(&self.dungeon, a.position(), d.position()) {
            return Err(ActionError::NoLineOfSight);
        }
        Ok(())
    }

    /// Validate and run an exchange of blows. Returns false when the
    /// attacker cannot reach the defender.
    pub fn engage_units(&mut self, attacker: UnitId, defender: UnitId) -> bool {
        if self.check_engagement(attacker, defender).is_err() {
            return false;
        }
        self.resolve_engagement(attacker, defender);
        true
    }

    /// Move a unit to a free tile, keeping occupancy in step
    pub fn update_unit_position(&mut self, id: UnitId, to: Position) -> bool {
        if !self.turns.is_registered(id) || !self.turns.occupancy.place(id, to) {
            return false;
        }
        if let Some(unit) = self.unit_mut(id) {
            unit.position = to;
        }
        true
    }

    /// Exchange two registered units' tiles and publish both moves
    pub fn swap_unit_positions(&mut self, a: UnitId, b: UnitId) -> bool {
        if !self.turns.occupancy.swap(a, b) {
            return false;
        }
        for id in [a, b] {
            let Some(pos) = self.turns.occupancy.position_of(id) else {
                continue;
            };
            if let Some(unit) = self.unit_mut(id) {
                unit.position = pos;
            }
            self.events.emit(GameEvent::UnitMoved { unit: id, tile: pos });
        }
        true
    }
}
