//! Step-by-step movement with a per-turn tile allowance

use hashbrown::HashMap;

use crate::grid::Step;
use crate::state::GameState;
use crate::unit::{Capabilities, UnitId};
use crate::world::{ActionError, GameEvent};

/// Remaining tiles each unit may walk this turn
#[derive(Debug, Clone, Default)]
pub struct MovementManager {
    allowance: HashMap<UnitId, u32>,
}

impl MovementManager {
    pub fn register(&mut self, id: UnitId, allowance: u32) {
        self.allowance.insert(id, allowance);
    }

    pub fn unregister(&mut self, id: UnitId) {
        self.allowance.remove(&id);
    }

    pub fn reset(&mut self, id: UnitId, allowance: u32) {
        self.allowance.insert(id, allowance);
    }

    pub fn remaining(&self, id: UnitId) -> u32 {
        self.allowance.get(&id).copied().unwrap_or(0)
    }

    pub fn consume(&mut self, id: UnitId, steps: u32) {
        if let Some(left) = self.allowance.get_mut(&id) {
            *left = left.saturating_sub(steps);
        }
    }
}

/// How a walk ended before running out of steps
enum Interrupt {
    Engage(UnitId),
    Swap(UnitId),
}

impl GameState {
    /// Walk up to the remaining allowance of `steps`.
    ///
    /// Returns the number of steps spent (a swap counts as one).
    pub fn handle_move_action(&mut self, id: UnitId, steps: &[Step]) -> Result<usize, ActionError> {
        let unit = self.living(id).ok_or(ActionError::UnitDead(id))?;
        if !unit.can(Capabilities::MOVER) {
            return Err(ActionError::Blocked);
        }
        let remaining = self.movement.remaining(id) as usize;
        if remaining == 0 {
            return Err(ActionError::NoMoveAllowance);
        }
        if steps.is_empty() {
            return Err(ActionError::NoPath);
        }
        let bounded = &steps[..steps.len().min(remaining)];
        let taken = self.attempt_path(id, bounded)?;
        self.movement.consume(id, taken as u32);
        Ok(taken)
    }

    /// Walk `steps` one tile at a time, ignoring the allowance.
    ///
    /// Stops at the first wall. An enemy in the way is engaged, a party
    /// member in the player's way is swapped with, and any other occupant
    /// just stops the walk. `UnitMoved` is published once for the final
    /// tile reached. Fails with `Blocked` if nothing at all happened, and
    /// with `InvalidStep` before moving if any step is not a single
    /// orthogonal tile.
    pub fn attempt_path(&mut self, id: UnitId, steps: &[Step]) -> Result<usize, ActionError> {
        if let Some(bad) = steps.iter().find(|s| !s.is_single_tile()) {
            return Err(ActionError::InvalidStep {
                dx: bad.dx,
                dy: bad.dy,
            });
        }
        let mut pos = self
            .living(id)
            .ok_or(ActionError::UnitDead(id))?
            .position();
        let mut traversed = 0usize;
        let mut interrupt = None;

        for step in steps {
            let next = pos.offset(step.dx, step.dy);
            if !self.dungeon.is_walkable(next) {
                break;
            }
            if let Some(other) = self.occupancy().unit_at(next)
                && other != id
            {
                if self.is_hostile_pair(id, other) {
                    interrupt = Some(Interrupt::Engage(other));
                } else if self.can_swap(id, other) {
                    interrupt = Some(Interrupt::Swap(other));
                }
                break;
            }
            if !self.update_unit_position(id, next) {
                break;
            }
            pos = next;
            traversed += 1;
        }

        if traversed > 0 {
            self.events.emit(GameEvent::UnitMoved { unit: id, tile: pos });
        }

        match interrupt {
            Some(Interrupt::Engage(enemy)) => {
                let engaged = self.engage_units(id, enemy);
                if traversed == 0 && !engaged {
                    return Err(ActionError::Blocked);
                }
                Ok(traversed)
            }
            Some(Interrupt::Swap(ally)) => {
                let swapped = self.swap_unit_positions(id, ally);
                Ok(traversed + usize::from(swapped))
            }
            None if traversed == 0 => Err(ActionError::Blocked),
            None => Ok(traversed),
        }
    }

    fn is_hostile_pair(&self, a: UnitId, b: UnitId) -> bool {
        match (self.unit(a), self.unit(b)) {
            (Some(a), Some(b)) => a.is_hostile_to(b),
            _ => false,
        }
    }

    /// The player may trade places with their own mercenaries
    fn can_swap(&self, mover: UnitId, other: UnitId) -> bool {
        self.player == Some(mover) && self.party.contains(&other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Position;
    use crate::state::test_support::*;
    use crate::unit::UnitKind;
    use crate::world::Topic;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn east(n: usize) -> Vec<Step> {
        vec![Step::new(1, 0); n]
    }

    #[test]
    fn test_allowance_bounds_path() {
        let mut state = arena(12, 5);
        let id = spawn(&mut state, UnitKind::Player, 1, 2);
        assert_eq!(state.handle_move_action(id, &east(8)), Ok(4));
        assert_eq!(state.unit(id).unwrap().position(), Position::new(5, 2));
        assert_eq!(
            state.handle_move_action(id, &east(1)),
            Err(ActionError::NoMoveAllowance)
        );
    }

    #[test]
    fn test_move_points_floor_of_one() {
        let mut state = arena(8, 5);
        let id = spawn(&mut state, UnitKind::Zombie, 1, 2);
        state.unit_mut(id).unwrap().stats.move_points = 0;
        let allowance = state.unit(id).unwrap().move_allowance();
        state.movement.reset(id, allowance);
        assert_eq!(state.handle_move_action(id, &east(3)), Ok(1));
    }

    #[test]
    fn test_wall_stops_walk() {
        let mut state = arena(5, 5);
        let id = spawn(&mut state, UnitKind::Player, 2, 2);
        assert_eq!(state.handle_move_action(id, &east(3)), Ok(1));
        assert_eq!(state.unit(id).unwrap().position(), Position::new(3, 2));
    }

    #[test]
    fn test_single_moved_event_per_path() {
        let mut state = arena(10, 5);
        let id = spawn(&mut state, UnitKind::Player, 1, 2);
        let moves = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&moves);
        state
            .events
            .subscribe(Topic::UnitMoved, move |e| sink.borrow_mut().push(e.clone()));
        state.handle_move_action(id, &east(3)).unwrap();
        assert_eq!(
            moves.borrow().as_slice(),
            &[GameEvent::UnitMoved {
                unit: id,
                tile: Position::new(4, 2)
            }]
        );
    }

    #[test]
    fn test_hostile_in_path_is_engaged() {
        let mut state = arena(10, 5);
        let player = spawn(&mut state, UnitKind::Player, 1, 2);
        let orc = spawn(&mut state, UnitKind::OrcWarrior, 4, 2);
        assert_eq!(state.handle_move_action(player, &east(4)), Ok(2));
        assert_eq!(state.unit(player).unwrap().position(), Position::new(3, 2));
        assert!(state.unit(orc).unwrap().health() < 180);
    }

    #[test]
    fn test_player_swaps_with_party_member() {
        let mut state = arena(10, 5);
        let player = spawn(&mut state, UnitKind::Player, 1, 2);
        let medic = spawn(&mut state, UnitKind::Medic, 2, 2);
        state.player = Some(player);
        state.party.push(medic);
        assert_eq!(state.handle_move_action(player, &east(3)), Ok(1));
        assert_eq!(state.unit(player).unwrap().position(), Position::new(2, 2));
        assert_eq!(state.unit(medic).unwrap().position(), Position::new(1, 2));
    }

    #[test]
    fn test_long_step_cannot_jump_walls() {
        let mut state = GameState::new(
            crate::dungeon::Dungeon::from_ascii(&["#####", "#.#.#", "#####"]),
            1,
        );
        let id = spawn(&mut state, UnitKind::Player, 1, 1);
        let allowance = state.movement.remaining(id);
        assert_eq!(
            state.handle_move_action(id, &[Step::new(2, 0)]),
            Err(ActionError::InvalidStep { dx: 2, dy: 0 })
        );
        assert_eq!(state.unit(id).unwrap().position(), Position::new(1, 1));
        assert_eq!(state.movement.remaining(id), allowance);
    }

    #[test]
    fn test_zero_and_diagonal_steps_rejected() {
        let mut state = arena(8, 8);
        let id = spawn(&mut state, UnitKind::Player, 3, 3);
        let moves = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&moves);
        state
            .events
            .subscribe(Topic::UnitMoved, move |_| *sink.borrow_mut() += 1);
        assert_eq!(
            state.handle_move_action(id, &[Step::new(1, 0), Step::new(0, 0)]),
            Err(ActionError::InvalidStep { dx: 0, dy: 0 })
        );
        assert_eq!(
            state.attempt_path(id, &[Step::new(1, 1)]),
            Err(ActionError::InvalidStep { dx: 1, dy: 1 })
        );
        assert_eq!(state.unit(id).unwrap().position(), Position::new(3, 3));
        assert_eq!(*moves.borrow(), 0);
    }

    #[test]
    fn test_ally_blocks_without_swap() {
        let mut state = arena(10, 5);
        let medic = spawn(&mut state, UnitKind::Medic, 1, 2);
        let _gunner = spawn(&mut state, UnitKind::Gunner, 2, 2);
        assert_eq!(
            state.handle_move_action(medic, &east(2)),
            Err(ActionError::Blocked)
        );
    }
}
