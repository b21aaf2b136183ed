//! Party member planning
//!
//! Priorities, highest first: strike a visible enemy in range, regroup
//! when too far from the leader, engage enemies near the leader, follow
//! the leader, hold.

use super::{SkillAiManager, approach, visible_hostiles};
use crate::consts::{
    PARTY_AGGRO_RANGE, PARTY_FOLLOW_DEADZONE, PARTY_LEASH_DISTANCE, PARTY_REGROUP_MAX,
    PARTY_REGROUP_MIN,
};
use crate::dungeon::Position;
use crate::state::GameState;
use crate::turn::Action;
use crate::unit::{Unit, UnitId};

/// Free floor tile at Manhattan distance `min..=max` from `leader`,
/// closest to `member`. The member's own tile counts as free.
pub fn escort_tile(
    state: &GameState,
    leader: Position,
    member: UnitId,
    min: i32,
    max: i32,
) -> Option<Position> {
    let from = state.unit(member)?.position();
    let mut best: Option<(i32, Position)> = None;
    for d in min.max(0)..=max {
        for dx in -d..=d {
            let rest = d - dx.abs();
            let dys: &[i32] = if rest == 0 { &[0] } else { &[-rest, rest] };
            for &dy in dys {
                let tile = leader.offset(dx, dy);
                if !state.dungeon.is_walkable(tile) {
                    continue;
                }
                if state
                    .occupancy()
                    .unit_at(tile)
                    .is_some_and(|occupant| occupant != member)
                {
                    continue;
                }
                let cost = tile.manhattan(from);
                if best.is_none_or(|(c, _)| cost < c) {
                    best = Some((cost, tile));
                }
            }
        }
    }
    best.map(|(_, tile)| tile)
}

/// Movement or attack plan for one party member following the player
pub fn decide_party_member(state: &GameState, member: UnitId) -> Option<Action> {
    let me = state.living(member)?;
    let leader = state.player_unit().filter(|p| p.is_alive())?;
    let here = me.position();
    let home = leader.position();

    let seen = visible_hostiles(state, member);
    if let Some(target) = seen
        .iter()
        .find(|u| u.position().manhattan(here) <= me.stats.attack_range)
    {
        return Some(Action::Attack { target: target.id });
    }

    let to_leader = here.manhattan(home);
    if to_leader > PARTY_LEASH_DISTANCE {
        let rally = escort_tile(state, home, member, PARTY_REGROUP_MIN, PARTY_REGROUP_MAX)?;
        return approach(state, member, rally);
    }

    let threat: Option<&&Unit> = seen
        .iter()
        .find(|u| u.position().manhattan(home) <= PARTY_AGGRO_RANGE);
    if let Some(threat) = threat {
        return approach(state, member, threat.position());
    }

    if to_leader > PARTY_FOLLOW_DEADZONE {
        let spot = escort_tile(state, home, member, 1, 1)?;
        return approach(state, member, spot);
    }
    None
}

/// Queue an action for every living party member: a skill if the skill
/// AI finds one, else the follow/engage plan
pub fn plan_party_turn(state: &mut GameState, skill_ai: &mut SkillAiManager) {
    let mut planned = Vec::new();
    {
        let state_ref: &GameState = state;
        let allies: Vec<&Unit> = state_ref
            .player
            .iter()
            .chain(&state_ref.party)
            .filter_map(|&id| state_ref.living(id))
            .collect();
        let enemies: Vec<&Unit> = state_ref
            .monsters
            .iter()
            .filter_map(|&id| state_ref.living(id))
            .collect();

        for &member in &state_ref.party {
            if state_ref.living(member).is_none() {
                continue;
            }
            let action = skill_ai
                .decide_action(state_ref, member, &allies, &enemies)
                .or_else(|| decide_party_member(state_ref, member));
            if let Some(action) = action {
                planned.push((member, action));
            }
        }
    }
    for (member, action) in planned {
        state.queue_action(member, action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;
    use crate::skill::SkillId;
    use crate::state::test_support::*;
    use crate::unit::UnitKind;

    fn with_leader(state: &mut GameState, x: i32, y: i32) -> UnitId {
        let player = spawn(state, UnitKind::Player, x, y);
        state.player = Some(player);
        player
    }

    #[test]
    fn test_attacks_enemy_in_range() {
        let mut state = arena(12, 6);
        with_leader(&mut state, 1, 1);
        let gunner = spawn(&mut state, UnitKind::Gunner, 2, 2);
        let zombie = spawn(&mut state, UnitKind::Zombie, 6, 2);
        assert_eq!(
            decide_party_member(&state, gunner),
            Some(Action::Attack { target: zombie })
        );
    }

    #[test]
    fn test_regroups_when_leashed() {
        let mut state = arena(20, 5);
        with_leader(&mut state, 1, 2);
        let sentinel = spawn(&mut state, UnitKind::Sentinel, 12, 2);
        let Some(Action::Path(steps)) = decide_party_member(&state, sentinel) else {
            panic!("expected a path");
        };
        assert_eq!(steps.len(), 4);
        assert!(steps.iter().all(|s| s.dx == -1 && s.dy == 0));
    }

    #[test]
    fn test_holds_inside_deadzone() {
        let mut state = arena(10, 6);
        with_leader(&mut state, 3, 3);
        let medic = spawn(&mut state, UnitKind::Medic, 4, 4);
        assert_eq!(decide_party_member(&state, medic), None);
    }

    #[test]
    fn test_follows_outside_deadzone() {
        let mut state = arena(10, 6);
        with_leader(&mut state, 2, 2);
        let medic = spawn(&mut state, UnitKind::Medic, 6, 2);
        assert_eq!(
            decide_party_member(&state, medic),
            Some(Action::path(vec![crate::grid::Step::new(-1, 0); 3]))
        );
    }

    #[test]
    fn test_escort_tile_skips_occupied() {
        let mut state = arena(10, 6);
        let player = with_leader(&mut state, 3, 3);
        let medic = spawn(&mut state, UnitKind::Medic, 7, 3);
        spawn(&mut state, UnitKind::Zombie, 4, 3);
        let home = state.unit(player).unwrap().position();
        let tile = escort_tile(&state, home, medic, 1, 1).unwrap();
        assert_eq!(tile.manhattan(home), 1);
        assert_ne!(tile, Position::new(4, 3));
    }

    #[test]
    fn test_plan_prefers_skills() {
        let mut state = arena(12, 6);
        let player = with_leader(&mut state, 2, 2);
        let medic = spawn(&mut state, UnitKind::Medic, 4, 2);
        state.party.push(medic);
        state.set_health(player, 40);
        let mut skill_ai = SkillAiManager::new();
        skill_ai.begin_pass();
        plan_party_turn(&mut state, &mut skill_ai);
        assert_eq!(
            state.turns.pending_action(medic),
            Some(&Action::skill(SkillId::Heal, Some(player)))
        );
        let mut rng = GameRng::new(4);
        state.resolve_turn(&mut rng);
        // 40 + 17 heal + 4 regen
        assert_eq!(state.unit(player).unwrap().health(), 61);
    }
}
