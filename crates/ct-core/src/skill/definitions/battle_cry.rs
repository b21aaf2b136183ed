use super::{AiHint, SkillDefinition, SkillKind, SkillRange, TargetSide};
use crate::combat::AttributeType;
use crate::rng::GameRng;
use crate::skill::{SkillId, StatusEffect, StatusKind};
use crate::state::GameState;
use crate::unit::{Stat, StatModifiers, UnitId};
use crate::world::ActionError;

const MAX_STACKS: u32 = 2;
const BUFF_TURNS: u32 = 3;
const BLOOD_OVERCHARGE: i32 = 5;

/// Self-centred roar buffing the attack of nearby allies
pub static BATTLE_CRY: SkillDefinition = SkillDefinition {
    id: SkillId::BattleCry,
    name: "Battle Cry",
    kind: SkillKind::Active,
    mana_cost: 14,
    cooldown: 5,
    range: SkillRange::new(0, 3),
    multiplier: 0.35,
    attribute: None,
    targets: TargetSide::None,
    description: "Raise the physical attack of allies within 3 tiles. Stacks twice.",
    ai_hint: AiHint {
        role: "support",
        priority: "burst",
    },
    select_target: None,
    execute,
};

fn execute(
    def: &SkillDefinition,
    state: &mut GameState,
    _rng: &mut GameRng,
    user: UnitId,
    _target: Option<UnitId>,
) -> Result<(), ActionError> {
    let caster = state.living(user).ok_or(ActionError::UnitDead(user))?;
    let origin = caster.position();
    let faction = caster.faction;
    let name = caster.name.clone();
    let boost = ((f64::from(caster.stats.attack) * def.multiplier).floor() as i32).max(2);

    let targets: Vec<UnitId> = state
        .allied_units(user)
        .into_iter()
        .filter(|u| def.range.contains(u.position().manhattan(origin)))
        .map(|u| u.id)
        .collect();
    if targets.is_empty() {
        return Err(ActionError::NoTarget);
    }

    let status_id = format!("battle-cry-{faction}");
    for unit in targets {
        let stacks = state
            .statuses
            .get(unit, &status_id)
            .map_or(0, |e| e.stacks);
        let stacks = (stacks + 1).min(MAX_STACKS);
        let modifiers = StatModifiers::new().with(Stat::Attack, boost * stacks as i32);
        let effect = StatusEffect::new(status_id.as_str(), def.name, StatusKind::Buff, BUFF_TURNS)
            .with_modifiers(modifiers)
            .with_stacks(stacks);
        state.apply_status(unit, effect);
    }

    let surged = state
        .attributes
        .pool_mut(faction)
        .add_overcharge(AttributeType::Blood, BLOOD_OVERCHARGE);
    state
        .log
        .push(format!("{name} roars, rallying allies (attack +{boost})."));
    if surged > 0 {
        state.log.push(format!("{name}'s blood surges by {surged}."));
    }
    Ok(())
}
