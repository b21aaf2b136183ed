use super::{
    AiHint, SkillDefinition, SkillKind, SkillRange, TargetQuery, TargetSide, check_reach,
    hostile_target, log_hit, scan_by_distance, strike,
};
use crate::combat::calculate_damage;
use crate::grid::{find_path, path_to_steps};
use crate::rng::GameRng;
use crate::skill::SkillId;
use crate::state::GameState;
use crate::unit::UnitId;
use crate::world::ActionError;

/// Dash to a tile next to a distant enemy and hit it hard
pub static CHARGE: SkillDefinition = SkillDefinition {
    id: SkillId::Charge,
    name: "Charge",
    kind: SkillKind::Active,
    mana_cost: 10,
    cooldown: 3,
    range: SkillRange::new(4, 6),
    multiplier: 1.35,
    attribute: None,
    targets: TargetSide::Hostile,
    description: "Rush an enemy 4 to 6 tiles away and deal 135% physical damage.",
    ai_hint: AiHint {
        role: "gapclose",
        priority: "burst",
    },
    select_target: Some(select),
    execute,
};

fn select(def: &SkillDefinition, query: &TargetQuery<'_>) -> Option<UnitId> {
    scan_by_distance(def, query, false)
}

fn execute(
    def: &SkillDefinition,
    state: &mut GameState,
    _rng: &mut GameRng,
    user: UnitId,
    target: Option<UnitId>,
) -> Result<(), ActionError> {
    let target = hostile_target(def, state, user, target)?;
    check_reach(def, state, user, target)?;
    let landing = state
        .find_adjacent_landing(user, target)
        .ok_or(ActionError::NoLanding)?;

    let start = state
        .living(user)
        .ok_or(ActionError::UnitDead(user))?
        .position();
    let path = find_path(&state.dungeon, state.occupancy(), start, landing);
    if path.len() <= 1 {
        return Err(ActionError::NoPath);
    }
    let steps = path_to_steps(&path, path.len());
    let traversed = state.attempt_path(user, &steps)?;
    if traversed == 0 {
        return Err(ActionError::Blocked);
    }
    // the walk may have ended in an engagement that killed either side
    let (Some(attacker), Some(defender)) = (state.living(user), state.living(target)) else {
        return Ok(());
    };

    let base = calculate_damage(&attacker.stats, &defender.stats);
    let damage = strike(def, state, user, target, base);
    log_hit(state, def, user, target, damage);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::dungeon::Position;
    use crate::rng::GameRng;
    use crate::skill::SkillId;
    use crate::state::test_support::*;
    use crate::unit::UnitKind;
    use crate::world::ActionError;

    #[test]
    fn test_charge_lands_next_to_target() {
        let mut state = arena(12, 5);
        let sentinel = spawn(&mut state, UnitKind::Sentinel, 1, 2);
        let orc = spawn(&mut state, UnitKind::OrcWarrior, 6, 2);
        let mut rng = GameRng::new(1);
        state
            .resolve_skill(sentinel, SkillId::Charge, Some(orc), &mut rng)
            .unwrap();
        assert_eq!(state.unit(sentinel).unwrap().position(), Position::new(5, 2));
        // floor((14 - 11/2) * 1.35) = 12
        assert_eq!(state.unit(orc).unwrap().health(), 180 - 12);
    }

    #[test]
    fn test_charge_picks_nearest_in_band() {
        let mut state = arena(14, 5);
        let sentinel = spawn(&mut state, UnitKind::Sentinel, 1, 2);
        spawn(&mut state, UnitKind::Zombie, 3, 2);
        let mid = spawn(&mut state, UnitKind::Zombie, 6, 1);
        spawn(&mut state, UnitKind::Zombie, 7, 3);
        let hostiles = state.hostile_units(sentinel);
        assert_eq!(
            state.select_skill_target(sentinel, SkillId::Charge, &hostiles),
            Some(mid)
        );
    }

    #[test]
    fn test_charge_without_target_fails() {
        let mut state = arena(12, 5);
        let sentinel = spawn(&mut state, UnitKind::Sentinel, 1, 2);
        let mut rng = GameRng::new(1);
        assert_eq!(
            state.resolve_skill(sentinel, SkillId::Charge, None, &mut rng),
            Err(ActionError::NoTarget)
        );
    }
}
