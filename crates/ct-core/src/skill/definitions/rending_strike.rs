use super::{
    AiHint, SkillDefinition, SkillKind, SkillRange, TargetSide, check_reach, log_hit, strike,
};
use crate::combat::calculate_damage;
use crate::rng::GameRng;
use crate::skill::{SkillId, StatusEffect, StatusKind, StatusTick};
use crate::state::GameState;
use crate::unit::UnitId;
use crate::world::ActionError;

const BLEED_CHANCE_PERCENT: u32 = 45;
const BLEED_TURNS: u32 = 3;

/// Melee slash that may leave the target bleeding. Needs an explicit
/// target.
pub static RENDING_STRIKE: SkillDefinition = SkillDefinition {
    id: SkillId::RendingStrike,
    name: "Rending Strike",
    kind: SkillKind::Active,
    mana_cost: 7,
    cooldown: 2,
    range: SkillRange::new(1, 1),
    multiplier: 1.1,
    attribute: None,
    targets: TargetSide::Hostile,
    description: "Slash an adjacent enemy for extra damage with a chance to cause bleeding.",
    ai_hint: AiHint {
        role: "burst",
        priority: "sustain",
    },
    select_target: None,
    execute,
};

fn execute(
    def: &SkillDefinition,
    state: &mut GameState,
    rng: &mut GameRng,
    user: UnitId,
    target: Option<UnitId>,
) -> Result<(), ActionError> {
    let target = target
        .filter(|&t| state.living(t).is_some())
        .ok_or(ActionError::NoTarget)?;
    check_reach(def, state, user, target)?;
    let (Some(attacker), Some(defender)) = (state.living(user), state.living(target)) else {
        return Err(ActionError::TargetDead(target));
    };
    let base = calculate_damage(&attacker.stats, &defender.stats);
    let power = (attacker.stats.attack / 4).max(1);

    let damage = strike(def, state, user, target, base);
    log_hit(state, def, user, target, damage);

    if rng.percent(BLEED_CHANCE_PERCENT) && state.living(target).is_some() {
        let bleed = StatusEffect::new("bleed", "Bleed", StatusKind::Debuff, BLEED_TURNS)
            .with_tick(StatusTick::Bleed { power });
        state.apply_status(target, bleed);
        if let Some(unit) = state.unit(target) {
            let msg = format!("{} is bleeding.", unit.name);
            state.log.push(msg);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::rng::GameRng;
    use crate::skill::{SkillId, StatusTick};
    use crate::state::test_support::*;
    use crate::unit::UnitKind;
    use crate::world::ActionError;

    #[test]
    fn test_requires_explicit_adjacent_target() {
        let mut state = arena(8, 5);
        let orc = spawn(&mut state, UnitKind::OrcWarrior, 1, 2);
        let player = spawn(&mut state, UnitKind::Player, 3, 2);
        let mut rng = GameRng::new(2);
        assert_eq!(
            state.resolve_skill(orc, SkillId::RendingStrike, None, &mut rng),
            Err(ActionError::NoTarget)
        );
        assert!(matches!(
            state.resolve_skill(orc, SkillId::RendingStrike, Some(player), &mut rng),
            Err(ActionError::OutOfRange { distance: 2, .. })
        ));
    }

    #[test]
    fn test_bleed_is_applied_some_of_the_time() {
        let mut bled = 0;
        for seed in 0..40 {
            let mut state = arena(8, 5);
            let orc = spawn(&mut state, UnitKind::OrcWarrior, 1, 2);
            let player = spawn(&mut state, UnitKind::Player, 2, 2);
            let mut rng = GameRng::new(seed);
            state
                .resolve_skill(orc, SkillId::RendingStrike, Some(player), &mut rng)
                .unwrap();
            // floor((18 - 12/2) * 1.1) = 13
            assert_eq!(state.unit(player).unwrap().health(), 160 - 13);
            if let Some(effect) = state.statuses.get(player, "bleed") {
                assert_eq!(effect.tick, Some(StatusTick::Bleed { power: 4 }));
                assert_eq!(effect.remaining, 3);
                bled += 1;
            }
        }
        assert!(bled > 0 && bled < 40);
    }
}
