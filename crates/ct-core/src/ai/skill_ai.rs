//! Skill-use decisions for party members
//!
//! Each node knows one skill: it checks the skill can be used right now,
//! lets the skill pick its own target, and turns that into an action.
//! Decorators wrap nodes to add cross-unit rules.

use std::fmt;

use hashbrown::{HashMap, HashSet};

use crate::grid::find_path;
use crate::skill::SkillId;
use crate::state::GameState;
use crate::turn::Action;
use crate::unit::{Unit, UnitId};

/// The two sides a node may pick targets from
#[derive(Clone, Copy)]
pub struct AiContext<'a> {
    pub allies: &'a [&'a Unit],
    pub enemies: &'a [&'a Unit],
}

pub trait SkillAiNode: fmt::Debug {
    fn skill(&self) -> SkillId;

    fn decide(
        &self,
        state: &GameState,
        unit: UnitId,
        ctx: AiContext<'_>,
        reservation: &mut TargetReservation,
    ) -> Option<Action>;
}

/// Targets already claimed during the current planning pass
#[derive(Debug, Clone, Default)]
pub struct TargetReservation {
    targets: HashSet<UnitId>,
}

impl TargetReservation {
    pub fn begin_pass(&mut self) {
        self.targets.clear();
    }

    pub fn reserve(&mut self, unit: UnitId) {
        self.targets.insert(unit);
    }

    pub fn is_reserved(&self, unit: UnitId) -> bool {
        self.targets.contains(&unit)
    }
}

/// Gap-closer: needs a target in its band, a free landing tile and a path
#[derive(Debug, Default)]
pub struct ChargeNode;

impl SkillAiNode for ChargeNode {
    fn skill(&self) -> SkillId {
        SkillId::Charge
    }

    fn decide(
        &self,
        state: &GameState,
        unit: UnitId,
        ctx: AiContext<'_>,
        _reservation: &mut TargetReservation,
    ) -> Option<Action> {
        if !state.can_use_skill(unit, SkillId::Charge) {
            return None;
        }
        let target = state.select_skill_target(unit, SkillId::Charge, ctx.enemies)?;
        let landing = state.find_adjacent_landing(unit, target)?;
        let start = state.living(unit)?.position();
        let path = find_path(&state.dungeon, state.occupancy(), start, landing);
        if path.len() <= 1 {
            return None;
        }
        Some(Action::skill(SkillId::Charge, Some(target)))
    }
}

#[derive(Debug, Default)]
pub struct HealNode;

impl SkillAiNode for HealNode {
    fn skill(&self) -> SkillId {
        SkillId::Heal
    }

    fn decide(
        &self,
        state: &GameState,
        unit: UnitId,
        ctx: AiContext<'_>,
        _reservation: &mut TargetReservation,
    ) -> Option<Action> {
        if !state.can_use_skill(unit, SkillId::Heal) {
            return None;
        }
        let target = state.select_skill_target(unit, SkillId::Heal, ctx.allies)?;
        Some(Action::skill(SkillId::Heal, Some(target)))
    }
}

#[derive(Debug, Default)]
pub struct SnipeNode;

impl SkillAiNode for SnipeNode {
    fn skill(&self) -> SkillId {
        SkillId::Snipe
    }

    fn decide(
        &self,
        state: &GameState,
        unit: UnitId,
        ctx: AiContext<'_>,
        _reservation: &mut TargetReservation,
    ) -> Option<Action> {
        if !state.can_use_skill(unit, SkillId::Snipe) {
            return None;
        }
        let target = state.select_skill_target(unit, SkillId::Snipe, ctx.enemies)?;
        Some(Action::skill(SkillId::Snipe, Some(target)))
    }
}

/// Drops the inner node's decision if another unit already claimed its
/// target this pass, otherwise claims it
#[derive(Debug)]
pub struct AvoidDuplicateTarget<N> {
    inner: N,
}

impl<N: SkillAiNode> AvoidDuplicateTarget<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

impl<N: SkillAiNode> SkillAiNode for AvoidDuplicateTarget<N> {
    fn skill(&self) -> SkillId {
        self.inner.skill()
    }

    fn decide(
        &self,
        state: &GameState,
        unit: UnitId,
        ctx: AiContext<'_>,
        reservation: &mut TargetReservation,
    ) -> Option<Action> {
        let action = self.inner.decide(state, unit, ctx, reservation)?;
        if let Some(target) = action.target() {
            if reservation.is_reserved(target) {
                return None;
            }
            reservation.reserve(target);
        }
        Some(action)
    }
}

pub struct SkillAiManager {
    nodes: HashMap<SkillId, Box<dyn SkillAiNode>>,
    reservation: TargetReservation,
}

impl fmt::Debug for SkillAiManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkillAiManager")
            .field("nodes", &self.nodes.len())
            .field("reservation", &self.reservation)
            .finish()
    }
}

impl Default for SkillAiManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillAiManager {
    /// Manager with nodes for charge, snipe and de-duplicated heal
    pub fn new() -> Self {
        let mut manager = Self {
            nodes: HashMap::new(),
            reservation: TargetReservation::default(),
        };
        manager.add_node(Box::new(ChargeNode));
        manager.add_node(Box::new(AvoidDuplicateTarget::new(HealNode)));
        manager.add_node(Box::new(SnipeNode));
        manager
    }

    pub fn add_node(&mut self, node: Box<dyn SkillAiNode>) {
        self.nodes.insert(node.skill(), node);
    }

    /// Forget reservations from the previous pass
    pub fn begin_pass(&mut self) {
        self.reservation.begin_pass();
    }

    pub fn reservation(&self) -> &TargetReservation {
        &self.reservation
    }

    /// First action any of the unit's active skills produces, in grant
    /// order
    pub fn decide_action(
        &mut self,
        state: &GameState,
        unit: UnitId,
        allies: &[&Unit],
        enemies: &[&Unit],
    ) -> Option<Action> {
        let ctx = AiContext { allies, enemies };
        for skill in state.skills.unit_active_skills(unit) {
            let Some(node) = self.nodes.get(&skill) else {
                continue;
            };
            if let Some(action) = node.decide(state, unit, ctx, &mut self.reservation) {
                log::trace!("{unit} plans {skill}");
                return Some(action);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::*;
    use crate::unit::UnitKind;

    #[test]
    fn test_two_healers_one_patient() {
        let mut state = arena(10, 6);
        let player = spawn(&mut state, UnitKind::Player, 4, 2);
        let first = spawn(&mut state, UnitKind::Medic, 2, 2);
        let second = spawn(&mut state, UnitKind::Medic, 6, 2);
        state.set_health(player, 60);

        let mut manager = SkillAiManager::new();
        manager.begin_pass();
        let allies = state.allied_units(player);
        let a = manager.decide_action(&state, first, &allies, &[]);
        let b = manager.decide_action(&state, second, &allies, &[]);
        assert_eq!(a, Some(Action::skill(SkillId::Heal, Some(player))));
        assert_eq!(b, None);

        manager.begin_pass();
        let b = manager.decide_action(&state, second, &allies, &[]);
        assert_eq!(b, Some(Action::skill(SkillId::Heal, Some(player))));
    }

    #[test]
    fn test_charge_node_needs_band() {
        let mut state = arena(14, 5);
        let sentinel = spawn(&mut state, UnitKind::Sentinel, 1, 2);
        let orc = spawn(&mut state, UnitKind::OrcWarrior, 3, 2);
        let mut manager = SkillAiManager::new();
        let enemies = state.hostile_units(sentinel);
        assert_eq!(manager.decide_action(&state, sentinel, &[], &enemies), None);

        state.queue_action(orc, Action::Move { dx: 1, dy: 0 });
        let mut rng = crate::rng::GameRng::new(0);
        state.resolve_turn(&mut rng);
        state.queue_action(orc, Action::Move { dx: 1, dy: 0 });
        state.resolve_turn(&mut rng);
        let enemies = state.hostile_units(sentinel);
        assert_eq!(
            manager.decide_action(&state, sentinel, &[], &enemies),
            Some(Action::skill(SkillId::Charge, Some(orc)))
        );
    }

    #[test]
    fn test_units_without_nodes_decide_nothing() {
        let mut state = arena(10, 5);
        let orc = spawn(&mut state, UnitKind::OrcWarrior, 1, 2);
        spawn(&mut state, UnitKind::Player, 2, 2);
        let enemies = state.hostile_units(orc);
        let mut manager = SkillAiManager::new();
        assert_eq!(manager.decide_action(&state, orc, &[], &enemies), None);
    }
}
