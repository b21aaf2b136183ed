use super::{
    AiHint, SkillDefinition, SkillKind, SkillRange, TargetQuery, TargetSide, check_reach,
    hostile_target, log_hit, scan_by_distance, strike,
};
use crate::combat::calculate_damage;
use crate::rng::GameRng;
use crate::skill::SkillId;
use crate::state::GameState;
use crate::unit::UnitId;
use crate::world::ActionError;

pub static SNIPE: SkillDefinition = SkillDefinition {
    id: SkillId::Snipe,
    name: "Snipe",
    kind: SkillKind::Active,
    mana_cost: 8,
    cooldown: 1,
    range: SkillRange::new(1, 7),
    multiplier: 0.75,
    attribute: None,
    targets: TargetSide::Hostile,
    description: "Shoot a distant enemy in sight for 75% physical damage.",
    ai_hint: AiHint {
        role: "poke",
        priority: "sustain",
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
    let (Some(attacker), Some(defender)) = (state.living(user), state.living(target)) else {
        return Err(ActionError::TargetDead(target));
    };
    let base = calculate_damage(&attacker.stats, &defender.stats);
    let damage = strike(def, state, user, target, base);
    log_hit(state, def, user, target, damage);
    Ok(())
}
