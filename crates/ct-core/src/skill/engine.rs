//! Skill registry, grants and cooldowns
//!
//! Per unit and skill the state is Ready or OnCooldown; not having enough
//! mana is a separate gate. Costs are only paid when execution succeeds.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use super::definitions::{self, SkillDefinition, SkillKind, TargetQuery};
use crate::dungeon::Position;
use crate::rng::GameRng;
use crate::state::GameState;
use crate::unit::{Capabilities, Unit, UnitId};
use crate::world::ActionError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SkillId {
    Charge,
    Heal,
    Snipe,
    Fireball,
    RendingStrike,
    BattleCry,
}

#[derive(Debug, Default)]
pub struct SkillEngine {
    registry: HashMap<SkillId, &'static SkillDefinition>,
    grants: HashMap<UnitId, Vec<SkillId>>,
    /// Turn number from which a (unit, skill) pair is usable again
    ready_turn: HashMap<(UnitId, SkillId), u32>,
}

impl SkillEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with every built-in skill registered
    pub fn with_builtin_skills() -> Self {
        let mut engine = Self::new();
        for def in definitions::builtin() {
            engine.register_skill(def);
        }
        engine
    }

    pub fn register_skill(&mut self, def: &'static SkillDefinition) {
        self.registry.insert(def.id, def);
    }

    pub fn skill(&self, id: SkillId) -> Option<&'static SkillDefinition> {
        self.registry.get(&id).copied()
    }

    fn skills_of_kind(&self, kind: SkillKind) -> Vec<&'static SkillDefinition> {
        SkillId::iter()
            .filter_map(|id| self.skill(id))
            .filter(|def| def.kind == kind)
            .collect()
    }

    pub fn active_skills(&self) -> Vec<&'static SkillDefinition> {
        self.skills_of_kind(SkillKind::Active)
    }

    pub fn passive_skills(&self) -> Vec<&'static SkillDefinition> {
        self.skills_of_kind(SkillKind::Passive)
    }

    /// Give a unit a registered skill. Returns false if unknown or
    /// already granted.
    pub fn grant_skill(&mut self, unit: UnitId, skill: SkillId) -> bool {
        if !self.registry.contains_key(&skill) {
            return false;
        }
        let granted = self.grants.entry(unit).or_default();
        if granted.contains(&skill) {
            return false;
        }
        granted.push(skill);
        true
    }

    /// Granted skills in grant order
    pub fn unit_skills(&self, unit: UnitId) -> &[SkillId] {
        self.grants.get(&unit).map_or(&[], Vec::as_slice)
    }

    pub fn unit_active_skills(&self, unit: UnitId) -> Vec<SkillId> {
        self.unit_skills(unit)
            .iter()
            .copied()
            .filter(|&id| self.skill(id).is_some_and(|d| d.kind == SkillKind::Active))
            .collect()
    }

    pub fn has_skill(&self, unit: UnitId, skill: SkillId) -> bool {
        self.unit_skills(unit).contains(&skill)
    }

    pub fn remaining_cooldown(&self, unit: UnitId, skill: SkillId, current_turn: u32) -> u32 {
        self.ready_turn
            .get(&(unit, skill))
            .map_or(0, |&ready| ready.saturating_sub(current_turn))
    }

    pub(crate) fn start_cooldown(&mut self, unit: UnitId, skill: SkillId, ready_turn: u32) {
        self.ready_turn.insert((unit, skill), ready_turn);
    }
}

impl GameState {
    /// Every gate a skill use must pass before executing
    pub fn check_skill(
        &self,
        user: UnitId,
        skill: SkillId,
    ) -> Result<&'static SkillDefinition, ActionError> {
        let unit = self.living(user).ok_or(ActionError::UnitDead(user))?;
        let def = self
            .skills
            .skill(skill)
            .ok_or(ActionError::UnknownSkill(skill))?;
        if def.kind != SkillKind::Active
            || !unit.can(Capabilities::SKILL_USER)
            || !self.skills.has_skill(user, skill)
        {
            return Err(ActionError::SkillNotGranted(skill));
        }
        if unit.mana() < def.mana_cost {
            return Err(ActionError::InsufficientMana {
                needed: def.mana_cost,
                available: unit.mana(),
            });
        }
        let turns = self.remaining_cooldown(user, skill);
        if turns > 0 {
            return Err(ActionError::OnCooldown { skill, turns });
        }
        Ok(def)
    }

    pub fn can_use_skill(&self, user: UnitId, skill: SkillId) -> bool {
        self.check_skill(user, skill).is_ok()
    }

    pub fn remaining_cooldown(&self, user: UnitId, skill: SkillId) -> u32 {
        self.skills
            .remaining_cooldown(user, skill, self.turns.turn())
    }

    /// Run a skill and, only if it succeeds, pay its mana and start its
    /// cooldown.
    pub fn resolve_skill(
        &mut self,
        user: UnitId,
        skill: SkillId,
        target: Option<UnitId>,
        rng: &mut GameRng,
    ) -> Result<(), ActionError> {
        let def = self.check_skill(user, skill)?;
        (def.execute)(def, self, rng, user, target)?;

        let ready = self.turns.turn() + def.cooldown;
        self.skills.start_cooldown(user, skill, ready);
        let mana = self.unit(user).map_or(0, Unit::mana);
        self.set_mana(user, mana - def.mana_cost);
        log::trace!("{user} used {skill}; ready again on turn {ready}");
        Ok(())
    }

    /// Let the skill's own heuristic pick among `candidates`
    pub fn select_skill_target(
        &self,
        user: UnitId,
        skill: SkillId,
        candidates: &[&Unit],
    ) -> Option<UnitId> {
        let def = self.skills.skill(skill)?;
        let select = def.select_target?;
        let user = self.living(user)?;
        select(
            def,
            &TargetQuery {
                user,
                candidates,
                dungeon: &self.dungeon,
            },
        )
    }

    /// Free floor tile next to `target` closest to `user`
    pub fn find_adjacent_landing(&self, user: UnitId, target: UnitId) -> Option<Position> {
        let from = self.unit(user)?.position();
        let around = self.unit(target)?.position();
        let mut open: Vec<Position> = around
            .neighbors()
            .filter(|&tile| self.dungeon.is_walkable(tile))
            .filter(|&tile| {
                self.occupancy()
                    .unit_at(tile)
                    .is_none_or(|occupant| occupant == user)
            })
            .collect();
        open.sort_by_key(|tile| tile.manhattan(from));
        open.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::*;
    use crate::turn::Action;
    use crate::unit::UnitKind;

    #[test]
    fn test_registry() {
        let engine = SkillEngine::with_builtin_skills();
        assert_eq!(engine.active_skills().len(), 6);
        assert!(engine.passive_skills().is_empty());
        assert_eq!(engine.skill(SkillId::Heal).map(|d| d.mana_cost), Some(18));
    }

    #[test]
    fn test_grants_are_ordered_and_unique() {
        let mut engine = SkillEngine::with_builtin_skills();
        let unit = UnitId(4);
        assert!(engine.grant_skill(unit, SkillId::Snipe));
        assert!(engine.grant_skill(unit, SkillId::Charge));
        assert!(!engine.grant_skill(unit, SkillId::Snipe));
        assert_eq!(engine.unit_skills(unit), &[SkillId::Snipe, SkillId::Charge]);
        assert!(engine.has_skill(unit, SkillId::Charge));
        assert!(!engine.has_skill(unit, SkillId::Heal));
    }

    #[test]
    fn test_gates() {
        let mut state = arena(8, 8);
        let archer = spawn(&mut state, UnitKind::OrcArcher, 1, 1);
        let zombie = spawn(&mut state, UnitKind::Zombie, 5, 5);
        assert!(state.can_use_skill(archer, SkillId::Snipe));
        assert_eq!(
            state.check_skill(archer, SkillId::Heal).err(),
            Some(ActionError::SkillNotGranted(SkillId::Heal))
        );
        assert!(!state.can_use_skill(zombie, SkillId::Snipe));

        state.set_mana(archer, 5);
        assert_eq!(
            state.check_skill(archer, SkillId::Snipe).err(),
            Some(ActionError::InsufficientMana {
                needed: 8,
                available: 5
            })
        );
    }

    #[test]
    fn test_cooldown_three_turns() {
        let mut state = arena(12, 5);
        let sentinel = spawn(&mut state, UnitKind::Sentinel, 1, 2);
        let orc = spawn(&mut state, UnitKind::OrcWarrior, 6, 2);
        let mut rng = GameRng::new(42);
        let used_on = state.turns.turn();

        state.queue_action(sentinel, Action::skill(SkillId::Charge, Some(orc)));
        let report = state.resolve_turn(&mut rng).unwrap();
        assert_eq!(report.resolved, vec![sentinel]);
        assert_eq!(state.unit(sentinel).unwrap().mana(), 40 - 10 + 1);

        // turn T+1 and T+2 blocked, T+3 ready
        assert_eq!(state.turns.turn(), used_on + 1);
        assert_eq!(state.remaining_cooldown(sentinel, SkillId::Charge), 2);
        assert!(!state.can_use_skill(sentinel, SkillId::Charge));
        state.queue_action(sentinel, Action::Move { dx: -1, dy: 0 });
        state.resolve_turn(&mut rng);
        assert_eq!(state.remaining_cooldown(sentinel, SkillId::Charge), 1);
        state.queue_action(sentinel, Action::Move { dx: -1, dy: 0 });
        state.resolve_turn(&mut rng);
        assert_eq!(state.turns.turn(), used_on + 3);
        assert_eq!(state.remaining_cooldown(sentinel, SkillId::Charge), 0);
    }

    #[test]
    fn test_failed_skill_costs_nothing() {
        let mut state = arena(12, 5);
        let sentinel = spawn(&mut state, UnitKind::Sentinel, 1, 2);
        let orc = spawn(&mut state, UnitKind::OrcWarrior, 3, 2);
        let mut rng = GameRng::new(42);
        let err = state.resolve_skill(sentinel, SkillId::Charge, Some(orc), &mut rng);
        assert!(matches!(err, Err(ActionError::OutOfRange { distance: 2, .. })));
        assert_eq!(state.unit(sentinel).unwrap().mana(), 40);
        assert_eq!(state.remaining_cooldown(sentinel, SkillId::Charge), 0);
    }

    #[test]
    fn test_adjacent_landing_prefers_near_side() {
        let mut state = arena(12, 7);
        let sentinel = spawn(&mut state, UnitKind::Sentinel, 1, 3);
        let orc = spawn(&mut state, UnitKind::OrcWarrior, 6, 3);
        assert_eq!(
            state.find_adjacent_landing(sentinel, orc),
            Some(Position::new(5, 3))
        );
        spawn(&mut state, UnitKind::Zombie, 5, 3);
        let landing = state.find_adjacent_landing(sentinel, orc).unwrap();
        assert_eq!(landing.manhattan(Position::new(6, 3)), 1);
        assert_ne!(landing, Position::new(5, 3));
    }
}
