use super::{
    AiHint, SkillDefinition, SkillKind, SkillRange, TargetQuery, TargetSide, check_reach,
    hostile_target, log_hit, scan_by_distance, strike,
};
use crate::combat::{AttributeType, calculate_magic_damage};
use crate::rng::GameRng;
use crate::skill::SkillId;
use crate::state::GameState;
use crate::unit::UnitId;
use crate::world::ActionError;

pub static FIREBALL: SkillDefinition = SkillDefinition {
    id: SkillId::Fireball,
    name: "Fireball",
    kind: SkillKind::Active,
    mana_cost: 12,
    cooldown: 2,
    range: SkillRange::new(2, 6),
    multiplier: 1.35,
    attribute: Some(AttributeType::Fire),
    targets: TargetSide::Hostile,
    description: "Hurl fire at one distant enemy for magic and fire damage.",
    ai_hint: AiHint {
        role: "burst",
        priority: "sustain",
    },
    select_target: Some(select),
    execute,
};

/// Farthest enemy still in range and sight
fn select(def: &SkillDefinition, query: &TargetQuery<'_>) -> Option<UnitId> {
    scan_by_distance(def, query, true)
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
    let base = calculate_magic_damage(&attacker.stats, &defender.stats);
    let damage = strike(def, state, user, target, base);
    log_hit(state, def, user, target, damage);
    Ok(())
}
