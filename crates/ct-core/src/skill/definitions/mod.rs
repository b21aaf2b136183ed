//! Built-in skill definitions
//!
//! Each skill is a static record with a targeting heuristic and an
//! execution function. Execution re-checks target liveness and range, and
//! returns an error without touching the user's costs when a check fails.

mod battle_cry;
mod charge;
mod fireball;
mod heal;
mod rending_strike;
mod snipe;

pub use battle_cry::BATTLE_CRY;
pub use charge::CHARGE;
pub use fireball::FIREBALL;
pub use heal::HEAL;
pub use rending_strike::RENDING_STRIKE;
pub use snipe::SNIPE;

use super::SkillId;
use crate::combat::{AttributeType, compute_attribute_damage};
use crate::dungeon::Dungeon;
use crate::grid::{can_see, line_of_sight_clear};
use crate::rng::GameRng;
use crate::state::GameState;
use crate::unit::{Unit, UnitId};
use crate::world::ActionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillKind {
    Active,
    Passive,
}

/// Inclusive Manhattan distance band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillRange {
    pub min: i32,
    pub max: i32,
}

impl SkillRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, distance: i32) -> bool {
        (self.min..=self.max).contains(&distance)
    }
}

/// Which side a skill's target comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSide {
    Hostile,
    Allied,
    /// Self-centred, no target
    None,
}

/// Hint for AI consumers about what a skill is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiHint {
    pub role: &'static str,
    pub priority: &'static str,
}

/// Input to a targeting heuristic
pub struct TargetQuery<'a> {
    pub user: &'a Unit,
    pub candidates: &'a [&'a Unit],
    pub dungeon: &'a Dungeon,
}

pub type SelectTargetFn = fn(&SkillDefinition, &TargetQuery<'_>) -> Option<UnitId>;
pub type ExecuteFn = fn(
    &SkillDefinition,
    &mut GameState,
    &mut GameRng,
    UnitId,
    Option<UnitId>,
) -> Result<(), ActionError>;

#[derive(Debug)]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: &'static str,
    pub kind: SkillKind,
    pub mana_cost: i32,
    pub cooldown: u32,
    pub range: SkillRange,
    /// Damage or healing multiplier
    pub multiplier: f64,
    pub attribute: Option<AttributeType>,
    pub targets: TargetSide,
    pub description: &'static str,
    pub ai_hint: AiHint,
    pub select_target: Option<SelectTargetFn>,
    pub execute: ExecuteFn,
}

/// Every built-in skill, in registration order
pub fn builtin() -> [&'static SkillDefinition; 6] {
    [
        &CHARGE,
        &HEAL,
        &SNIPE,
        &FIREBALL,
        &RENDING_STRIKE,
        &BATTLE_CRY,
    ]
}

/// First live candidate in range and sight, scanning by Manhattan distance.
///
/// Ties keep candidate order. With `farthest` the scan starts from the far
/// end.
pub(crate) fn scan_by_distance(
    def: &SkillDefinition,
    query: &TargetQuery<'_>,
    farthest: bool,
) -> Option<UnitId> {
    let origin = query.user.position();
    let mut candidates: Vec<&Unit> = query
        .candidates
        .iter()
        .copied()
        .filter(|u| u.is_alive())
        .collect();
    if farthest {
        candidates.sort_by_key(|u| std::cmp::Reverse(u.position().manhattan(origin)));
    } else {
        candidates.sort_by_key(|u| u.position().manhattan(origin));
    }
    candidates
        .into_iter()
        .find(|u| in_range_and_sight(def, query, u))
        .map(|u| u.id)
}

pub(crate) fn in_range_and_sight(def: &SkillDefinition, query: &TargetQuery<'_>, unit: &Unit) -> bool {
    let from = query.user.position();
    let to = unit.position();
    def.range.contains(from.manhattan(to))
        && can_see(query.dungeon, from, to, query.user.stats.sight_range)
}

/// The explicit target if it is alive, else the skill's own pick among
/// the user's hostiles
pub(crate) fn hostile_target(
    def: &SkillDefinition,
    state: &GameState,
    user: UnitId,
    explicit: Option<UnitId>,
) -> Result<UnitId, ActionError> {
    if let Some(target) = explicit.filter(|&t| state.living(t).is_some()) {
        return Ok(target);
    }
    let hostiles = state.hostile_units(user);
    state
        .select_skill_target(user, def.id, &hostiles)
        .ok_or(ActionError::NoTarget)
}

/// Manhattan distance between two live units, rejected outside the
/// skill's band or without a clear line between them
pub(crate) fn check_reach(
    def: &SkillDefinition,
    state: &GameState,
    user: UnitId,
    target: UnitId,
) -> Result<i32, ActionError> {
    let from = state.living(user).ok_or(ActionError::UnitDead(user))?;
    let to = state.living(target).ok_or(ActionError::TargetDead(target))?;
    let distance = from.position().manhattan(to.position());
    if !def.range.contains(distance) {
        return Err(ActionError::OutOfRange {
            distance,
            min: def.range.min,
            max: def.range.max,
        });
    }
    if !line_of_sight_clear(&state.dungeon, from.position(), to.position()) {
        return Err(ActionError::NoLineOfSight);
    }
    Ok(distance)
}

/// Scale `base` by the skill multiplier, fold in attribute resources and
/// apply the hit. Returns the damage dealt (at least 1).
pub(crate) fn strike(
    def: &SkillDefinition,
    state: &mut GameState,
    user: UnitId,
    target: UnitId,
    base: i32,
) -> i32 {
    let scaled = crate::combat::scale_damage(base, def.multiplier);
    let damage = match (state.unit(user), state.unit(target)) {
        (Some(attacker), Some(defender)) => compute_attribute_damage(
            &state.attributes,
            &state.enchants,
            attacker,
            defender,
            scaled,
            def.attribute,
        )
        .total
        .max(1),
        _ => scaled,
    };
    state.apply_damage(target, damage);
    damage
}

/// "{user}'s {skill} hits {target} for {damage}."
pub(crate) fn log_hit(state: &mut GameState, def: &SkillDefinition, user: UnitId, target: UnitId, damage: i32) {
    let name_of = |id| state.unit(id).map_or_else(String::new, |u: &Unit| u.name.clone());
    let msg = format!("{}'s {} hits {} for {damage}.", name_of(user), def.name, name_of(target));
    state.log.push(msg);
}
