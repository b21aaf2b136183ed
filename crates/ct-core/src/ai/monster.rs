//! Monster behaviour profiles
//!
//! A profile maps to one strategy function. Every strategy falls back to
//! wandering near the spawn anchor when no enemy is in sight.

use super::{approach, visible_hostiles};
use crate::consts::{SKIRMISHER_MIN_RANGE, WANDER_RADIUS};
use crate::dungeon::Position;
use crate::grid::Step;
use crate::rng::GameRng;
use crate::skill::SkillId;
use crate::state::GameState;
use crate::turn::Action;
use crate::unit::{BehaviorProfile, Unit, UnitId};

type Strategy = fn(&GameState, &Unit, &[&Unit], &mut GameRng) -> Option<Action>;

fn strategy(profile: BehaviorProfile) -> Strategy {
    match profile {
        BehaviorProfile::Shambler => shambler,
        BehaviorProfile::Melee => melee,
        BehaviorProfile::Skirmisher => skirmisher,
        BehaviorProfile::Caster => caster,
        BehaviorProfile::Warden => warden,
    }
}

/// Pick this turn's action for one monster.
///
/// `visible` is what the monster can see, nearest first.
pub fn decide_monster(state: &GameState, id: UnitId, rng: &mut GameRng) -> Option<Action> {
    let me = state.living(id)?;
    let profile = me.behavior?;
    let visible = visible_hostiles(state, id);
    (strategy(profile))(state, me, &visible, rng)
}

/// Wake dormant monsters that see an enemy, then queue every living
/// monster's action
pub fn plan_monster_turn(state: &mut GameState, rng: &mut GameRng) {
    let monsters: Vec<UnitId> = state.monsters.clone();

    for &id in &monsters {
        let dormant = state.living(id).is_some_and(|u| !u.awake);
        if dormant && !visible_hostiles(state, id).is_empty() {
            if let Some(unit) = state.unit_mut(id) {
                unit.awake = true;
                let msg = format!("{} stirs.", unit.name);
                state.log.push(msg);
            }
        }
    }

    for id in monsters {
        if let Some(action) = decide_monster(state, id, rng) {
            state.queue_action(id, action);
        }
    }
}

fn shambler(state: &GameState, me: &Unit, visible: &[&Unit], rng: &mut GameRng) -> Option<Action> {
    match visible.first() {
        Some(primary) if me.awake => approach(state, me.id, primary.position()),
        Some(_) => None,
        None if me.awake => wander(state, me, rng),
        None => None,
    }
}

fn melee(state: &GameState, me: &Unit, visible: &[&Unit], rng: &mut GameRng) -> Option<Action> {
    let Some(primary) = visible.first() else {
        return wander(state, me, rng);
    };
    try_skill(state, me, SkillId::RendingStrike, visible)
        .or_else(|| approach(state, me.id, primary.position()))
}

/// Shoot when possible, otherwise keep the nearest enemy between the
/// minimum distance and attack range
fn skirmisher(state: &GameState, me: &Unit, visible: &[&Unit], rng: &mut GameRng) -> Option<Action> {
    let Some(primary) = visible.first() else {
        return wander(state, me, rng);
    };
    if let Some(action) = try_skill(state, me, SkillId::Snipe, visible) {
        return Some(action);
    }
    let distance = me.position().manhattan(primary.position());
    if distance < SKIRMISHER_MIN_RANGE
        && let Some(action) = retreat(state, me, primary.position(), rng)
    {
        return Some(action);
    }
    if distance > me.stats.attack_range {
        return approach(state, me.id, primary.position());
    }
    None
}

fn caster(state: &GameState, me: &Unit, visible: &[&Unit], rng: &mut GameRng) -> Option<Action> {
    let Some(primary) = visible.first() else {
        return wander(state, me, rng);
    };
    try_skill(state, me, SkillId::Fireball, visible)
        .or_else(|| approach(state, me.id, primary.position()))
}

fn warden(state: &GameState, me: &Unit, visible: &[&Unit], rng: &mut GameRng) -> Option<Action> {
    let Some(primary) = visible.first() else {
        return wander(state, me, rng);
    };
    if state.can_use_skill(me.id, SkillId::BattleCry) {
        return Some(Action::skill(SkillId::BattleCry, None));
    }
    approach(state, me.id, primary.position())
}

/// Skill action on the skill's own pick, or the nearest visible enemy,
/// if usable and in range
fn try_skill(state: &GameState, me: &Unit, skill: SkillId, visible: &[&Unit]) -> Option<Action> {
    if !state.can_use_skill(me.id, skill) {
        return None;
    }
    let def = state.skills.skill(skill)?;
    let target = state
        .select_skill_target(me.id, skill, visible)
        .or_else(|| visible.first().map(|u| u.id))?;
    let distance = me.position().manhattan(state.living(target)?.position());
    def.range
        .contains(distance)
        .then(|| Action::skill(skill, Some(target)))
}

/// Orthogonal neighbours of `me` that are free floor, in random order
fn open_neighbors(state: &GameState, me: &Unit, rng: &mut GameRng) -> Vec<Position> {
    let mut tiles: Vec<Position> = me
        .position()
        .neighbors()
        .filter(|&tile| state.dungeon.is_walkable(tile) && !state.occupancy().is_occupied(tile))
        .collect();
    rng.shuffle(&mut tiles);
    tiles
}

fn step_to(me: &Unit, tile: Position) -> Action {
    let here = me.position();
    Action::path(vec![Step::new(tile.x - here.x, tile.y - here.y)])
}

/// One random step that stays within the wander radius of the anchor
fn wander(state: &GameState, me: &Unit, rng: &mut GameRng) -> Option<Action> {
    open_neighbors(state, me, rng)
        .into_iter()
        .find(|tile| tile.manhattan(me.spawn_anchor) <= WANDER_RADIUS)
        .map(|tile| step_to(me, tile))
}

/// One random step that increases the distance to `threat`
fn retreat(state: &GameState, me: &Unit, threat: Position, rng: &mut GameRng) -> Option<Action> {
    let current = me.position().manhattan(threat);
    open_neighbors(state, me, rng)
        .into_iter()
        .find(|tile| tile.manhattan(threat) > current)
        .map(|tile| step_to(me, tile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::*;
    use crate::unit::UnitKind;

    #[test]
    fn test_dormant_shambler_waits() {
        let mut state = arena(20, 6);
        let zombie = spawn(&mut state, UnitKind::Zombie, 2, 2);
        spawn(&mut state, UnitKind::Player, 18, 4);
        let mut rng = GameRng::new(1);
        assert!(!state.unit(zombie).unwrap().awake);
        assert_eq!(decide_monster(&state, zombie, &mut rng), None);
    }

    #[test]
    fn test_shambler_wakes_and_chases() {
        let mut state = arena(12, 5);
        let zombie = spawn(&mut state, UnitKind::Zombie, 2, 2);
        state.monsters.push(zombie);
        spawn(&mut state, UnitKind::Player, 8, 2);
        let mut rng = GameRng::new(1);
        plan_monster_turn(&mut state, &mut rng);
        assert!(state.unit(zombie).unwrap().awake);
        assert_eq!(
            state.turns.pending_action(zombie),
            Some(&Action::path(vec![Step::new(1, 0); 3]))
        );
    }

    #[test]
    fn test_awake_wander_stays_near_anchor() {
        let mut state = arena(20, 12);
        let orc = spawn(&mut state, UnitKind::OrcWarrior, 10, 6);
        let mut rng = GameRng::new(7);
        let anchor = state.unit(orc).unwrap().spawn_anchor;
        for _ in 0..30 {
            let Some(Action::Path(steps)) = decide_monster(&state, orc, &mut rng) else {
                panic!("wander should always find a tile in an open arena");
            };
            assert_eq!(steps.len(), 1);
            let next = state.unit(orc).unwrap().position().offset(steps[0].dx, steps[0].dy);
            assert!(next.manhattan(anchor) <= WANDER_RADIUS);
            state.queue_action(orc, Action::path(steps));
            state.resolve_turn(&mut rng);
        }
    }

    #[test]
    fn test_melee_strikes_adjacent() {
        let mut state = arena(10, 5);
        let orc = spawn(&mut state, UnitKind::OrcWarrior, 2, 2);
        let player = spawn(&mut state, UnitKind::Player, 3, 2);
        let mut rng = GameRng::new(1);
        assert_eq!(
            decide_monster(&state, orc, &mut rng),
            Some(Action::skill(SkillId::RendingStrike, Some(player)))
        );
    }

    #[test]
    fn test_skirmisher_retreats_without_mana() {
        let mut state = arena(12, 5);
        let archer = spawn(&mut state, UnitKind::OrcArcher, 5, 2);
        spawn(&mut state, UnitKind::Player, 4, 2);
        state.set_mana(archer, 0);
        let mut rng = GameRng::new(3);
        let Some(Action::Path(steps)) = decide_monster(&state, archer, &mut rng) else {
            panic!("expected a retreat step");
        };
        let next = Position::new(5 + steps[0].dx, 2 + steps[0].dy);
        assert!(next.manhattan(Position::new(4, 2)) > 1);
    }

    #[test]
    fn test_skirmisher_holds_inside_band() {
        let mut state = arena(12, 5);
        let archer = spawn(&mut state, UnitKind::OrcArcher, 7, 2);
        spawn(&mut state, UnitKind::Player, 2, 2);
        state.set_mana(archer, 0);
        let mut rng = GameRng::new(3);
        assert_eq!(decide_monster(&state, archer, &mut rng), None);
    }

    #[test]
    fn test_caster_prefers_fireball() {
        let mut state = arena(12, 5);
        let wizard = spawn(&mut state, UnitKind::OrcWizard, 1, 2);
        let player = spawn(&mut state, UnitKind::Player, 5, 2);
        let mut rng = GameRng::new(3);
        assert_eq!(
            decide_monster(&state, wizard, &mut rng),
            Some(Action::skill(SkillId::Fireball, Some(player)))
        );
        state.set_mana(wizard, 0);
        assert!(matches!(decide_monster(&state, wizard, &mut rng), Some(Action::Path(_))));
    }

    #[test]
    fn test_warden_cries_then_chases() {
        let mut state = arena(12, 5);
        let minotaur = spawn(&mut state, UnitKind::MinotaurWarrior, 1, 2);
        spawn(&mut state, UnitKind::Player, 8, 2);
        let mut rng = GameRng::new(3);
        assert_eq!(
            decide_monster(&state, minotaur, &mut rng),
            Some(Action::skill(SkillId::BattleCry, None))
        );
        state.set_mana(minotaur, 0);
        assert!(matches!(decide_monster(&state, minotaur, &mut rng), Some(Action::Path(_))));
    }
}
