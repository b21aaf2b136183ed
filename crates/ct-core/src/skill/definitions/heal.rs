use super::{
    AiHint, SkillDefinition, SkillKind, SkillRange, TargetQuery, TargetSide, check_reach,
    in_range_and_sight,
};
use crate::rng::GameRng;
use crate::skill::SkillId;
use crate::state::GameState;
use crate::unit::{Unit, UnitId};
use crate::world::ActionError;

pub static HEAL: SkillDefinition = SkillDefinition {
    id: SkillId::Heal,
    name: "Heal",
    kind: SkillKind::Active,
    mana_cost: 18,
    cooldown: 3,
    range: SkillRange::new(1, 5),
    multiplier: 1.1,
    attribute: None,
    targets: TargetSide::Allied,
    description: "Restore health to one ally in range, scaling with magic attack.",
    ai_hint: AiHint {
        role: "support",
        priority: "sustain",
    },
    select_target: Some(select),
    execute,
};

/// Most wounded ally in range and sight, nearest first on ties.
///
/// The healer only counts itself when injured.
fn select(def: &SkillDefinition, query: &TargetQuery<'_>) -> Option<UnitId> {
    let origin = query.user.position();
    let mut candidates: Vec<&Unit> = query
        .candidates
        .iter()
        .copied()
        .filter(|u| u.is_alive() && (u.id != query.user.id || u.is_injured()))
        .collect();
    candidates.sort_by(|a, b| {
        a.health_ratio()
            .total_cmp(&b.health_ratio())
            .then_with(|| a.position().manhattan(origin).cmp(&b.position().manhattan(origin)))
    });
    candidates
        .into_iter()
        .find(|u| in_range_and_sight(def, query, u))
        .map(|u| u.id)
}

fn heal_amount(def: &SkillDefinition, user: &Unit) -> i32 {
    ((f64::from(user.stats.magic_attack) * def.multiplier).floor() as i32).max(1)
}

fn execute(
    def: &SkillDefinition,
    state: &mut GameState,
    _rng: &mut GameRng,
    user: UnitId,
    target: Option<UnitId>,
) -> Result<(), ActionError> {
    let faction = state.faction_of(user).ok_or(ActionError::UnknownUnit(user))?;
    let explicit = target
        .filter(|&t| state.living(t).is_some_and(|u| u.faction == faction));
    let target = match explicit {
        Some(t) => t,
        None => {
            let allies = state.allied_units(user);
            state
                .select_skill_target(user, def.id, &allies)
                .ok_or(ActionError::NoTarget)?
        }
    };
    check_reach(def, state, user, target)?;

    let amount = state
        .living(user)
        .map_or(1, |u| heal_amount(def, u));
    let healed = state.heal(target, amount);
    let (Some(healer), Some(patient)) = (state.unit(user), state.unit(target)) else {
        return Ok(());
    };
    let msg = format!("{} heals {} for {healed}.", healer.name, patient.name);
    state.log.push(msg);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::rng::GameRng;
    use crate::skill::SkillId;
    use crate::state::test_support::*;
    use crate::unit::UnitKind;
    use crate::world::ActionError;

    #[test]
    fn test_heal_prefers_lowest_ratio() {
        let mut state = arena(10, 6);
        let medic = spawn(&mut state, UnitKind::Medic, 1, 1);
        let player = spawn(&mut state, UnitKind::Player, 3, 1);
        let gunner = spawn(&mut state, UnitKind::Gunner, 4, 1);
        state.set_health(player, 120);
        state.set_health(gunner, 70);
        let allies = state.allied_units(medic);
        assert_eq!(
            state.select_skill_target(medic, SkillId::Heal, &allies),
            Some(gunner)
        );
    }

    #[test]
    fn test_healthy_allies_remain_candidates() {
        let mut state = arena(10, 6);
        let medic = spawn(&mut state, UnitKind::Medic, 1, 1);
        let player = spawn(&mut state, UnitKind::Player, 3, 1);
        state.set_health(medic, 10);
        let allies = state.allied_units(medic);
        // the wounded medic is at distance 0, below the minimum range
        assert_eq!(
            state.select_skill_target(medic, SkillId::Heal, &allies),
            Some(player)
        );
    }

    #[test]
    fn test_healthy_healer_alone_has_no_target() {
        let mut state = arena(10, 6);
        let medic = spawn(&mut state, UnitKind::Medic, 1, 1);
        let allies = state.allied_units(medic);
        assert_eq!(state.select_skill_target(medic, SkillId::Heal, &allies), None);
    }

    #[test]
    fn test_heal_amount_and_cap() {
        let mut state = arena(10, 6);
        let medic = spawn(&mut state, UnitKind::Medic, 1, 1);
        let player = spawn(&mut state, UnitKind::Player, 2, 1);
        state.set_health(player, 100);
        let mut rng = GameRng::new(3);
        state
            .resolve_skill(medic, SkillId::Heal, Some(player), &mut rng)
            .unwrap();
        // floor(16 * 1.1)
        assert_eq!(state.unit(player).unwrap().health(), 117);
        assert_eq!(state.unit(medic).unwrap().mana(), 80 - 18);
    }

    #[test]
    fn test_heal_out_of_range() {
        let mut state = arena(12, 4);
        let medic = spawn(&mut state, UnitKind::Medic, 1, 1);
        let player = spawn(&mut state, UnitKind::Player, 9, 1);
        state.set_health(player, 100);
        let mut rng = GameRng::new(3);
        assert!(matches!(
            state.resolve_skill(medic, SkillId::Heal, Some(player), &mut rng),
            Err(ActionError::OutOfRange { distance: 8, .. })
        ));
    }
}
