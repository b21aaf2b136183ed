//! AI planning for the party and for monsters
//!
//! Planners only read the state to pick actions, then queue them into
//! the turn engine. Nothing here mutates units directly except waking
//! dormant monsters.

mod monster;
mod party;
mod skill_ai;

pub use monster::{decide_monster, plan_monster_turn};
pub use party::{decide_party_member, escort_tile, plan_party_turn};
pub use skill_ai::{
    AvoidDuplicateTarget, ChargeNode, HealNode, SkillAiManager, SkillAiNode, SnipeNode,
    TargetReservation,
};

use crate::dungeon::Position;
use crate::grid::{can_see, find_path, path_to_steps};
use crate::state::GameState;
use crate::turn::Action;
use crate::unit::{Unit, UnitId};

/// Live hostiles `id` can see, nearest first
pub fn visible_hostiles(state: &GameState, id: UnitId) -> Vec<&Unit> {
    let Some(me) = state.living(id) else {
        return Vec::new();
    };
    let from = me.position();
    let mut seen: Vec<&Unit> = state
        .hostile_units(id)
        .into_iter()
        .filter(|u| can_see(&state.dungeon, from, u.position(), me.stats.sight_range))
        .collect();
    seen.sort_by_key(|u| u.position().manhattan(from));
    seen
}

/// Path toward `goal`, cut to the unit's move allowance.
///
/// `None` when already there or unreachable.
pub fn approach(state: &GameState, id: UnitId, goal: Position) -> Option<Action> {
    let unit = state.living(id)?;
    let path = find_path(&state.dungeon, state.occupancy(), unit.position(), goal);
    if path.len() <= 1 {
        return None;
    }
    let steps = path_to_steps(&path, unit.move_allowance() as usize);
    Some(Action::path(steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Step;
    use crate::state::test_support::*;
    use crate::unit::UnitKind;

    #[test]
    fn test_approach_is_bounded_by_move_points() {
        let mut state = arena(14, 5);
        let zombie = spawn(&mut state, UnitKind::Zombie, 1, 2);
        let action = approach(&state, zombie, Position::new(10, 2)).unwrap();
        assert_eq!(action, Action::path(vec![Step::new(1, 0); 3]));
        assert_eq!(approach(&state, zombie, Position::new(1, 2)), None);
    }

    #[test]
    fn test_visible_hostiles_sorted_and_filtered() {
        let mut state = arena(16, 5);
        let player = spawn(&mut state, UnitKind::Player, 1, 2);
        let far = spawn(&mut state, UnitKind::Zombie, 8, 2);
        let near = spawn(&mut state, UnitKind::Zombie, 3, 3);
        spawn(&mut state, UnitKind::Sentinel, 2, 2);
        spawn(&mut state, UnitKind::Zombie, 14, 3);
        let ids: Vec<UnitId> = visible_hostiles(&state, player).iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![near, far]);
    }
}
