//! The unit record

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::{BehaviorProfile, Faction, StatModifiers, Stats, UnitKind};
use crate::dungeon::Position;

/// Stable handle for a unit in the game state arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    /// What a unit can take part in
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        const COMBATANT = 0x01;
        const MOVER = 0x02;
        const SKILL_USER = 0x04;
    }
}

/// A combatant on the grid
///
/// Health, mana and position are written only through
/// `GameState` so that events and the occupancy index stay in step.
#[derive(Debug, Clone)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub kind: UnitKind,
    pub faction: Faction,
    pub capabilities: Capabilities,
    pub base_stats: Stats,
    /// Base stats plus active status modifiers
    pub stats: Stats,
    pub behavior: Option<BehaviorProfile>,
    pub spawn_anchor: Position,
    /// Shamblers stay dormant until this is set
    pub awake: bool,
    pub(crate) position: Position,
    pub(crate) health: i32,
    pub(crate) mana: i32,
}

impl Unit {
    pub fn new(id: UnitId, kind: UnitKind, position: Position) -> Self {
        let template = kind.template();
        Self {
            id,
            name: template.name.to_string(),
            kind,
            faction: template.faction,
            capabilities: template.capabilities,
            base_stats: template.stats,
            stats: template.stats,
            behavior: template.behavior,
            spawn_anchor: position,
            awake: template.behavior != Some(BehaviorProfile::Shambler),
            position,
            health: template.stats.max_health,
            mana: template.stats.max_mana,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.stats.max_health
    }

    pub fn mana(&self) -> i32 {
        self.mana
    }

    pub fn max_mana(&self) -> i32 {
        self.stats.max_mana
    }

    pub fn health_ratio(&self) -> f64 {
        if self.max_health() <= 0 {
            return 0.0;
        }
        f64::from(self.health) / f64::from(self.max_health())
    }

    pub fn is_injured(&self) -> bool {
        self.health < self.max_health()
    }

    pub fn is_hostile_to(&self, other: &Unit) -> bool {
        self.faction != other.faction
    }

    pub fn can(&self, capability: Capabilities) -> bool {
        self.capabilities.contains(capability)
    }

    /// Move allowance for one turn; never below one tile
    pub fn move_allowance(&self) -> u32 {
        self.stats.move_points.max(1) as u32
    }

    /// Recompute effective stats from base plus `modifiers`, clamping
    /// current pools to the new maxima.
    pub fn apply_modifiers(&mut self, modifiers: &StatModifiers) {
        self.stats = self.base_stats.with_modifiers(modifiers);
        self.health = self.health.min(self.stats.max_health);
        self.mana = self.mana.min(self.stats.max_mana);
    }

    pub fn snapshot(&self) -> UnitSnapshot {
        UnitSnapshot {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind,
            faction: self.faction,
            position: self.position,
            health: self.health,
            max_health: self.max_health(),
            mana: self.mana,
            max_mana: self.max_mana(),
            stats: self.stats,
            behavior: self.behavior,
            awake: self.awake,
        }
    }
}

/// Read-only copy of a unit for UI and logging consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    pub id: UnitId,
    pub name: String,
    pub kind: UnitKind,
    pub faction: Faction,
    pub position: Position,
    pub health: i32,
    pub max_health: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub stats: Stats,
    pub behavior: Option<BehaviorProfile>,
    pub awake: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Stat;

    #[test]
    fn test_new_from_template() {
        let unit = Unit::new(UnitId(1), UnitKind::Player, Position::new(3, 4));
        assert_eq!(unit.health(), 160);
        assert_eq!(unit.max_health(), 160);
        assert_eq!(unit.stats.attack, 16);
        assert_eq!(unit.stats.defense, 12);
        assert_eq!(unit.move_allowance(), 4);
        assert!(unit.is_alive());
        assert!(unit.awake);
    }

    #[test]
    fn test_shamblers_start_asleep() {
        let zombie = Unit::new(UnitId(2), UnitKind::Zombie, Position::new(0, 0));
        assert!(!zombie.awake);
        assert!(!zombie.can(Capabilities::SKILL_USER));
        assert_eq!(zombie.spawn_anchor, Position::new(0, 0));
    }

    #[test]
    fn test_hostility_by_faction() {
        let player = Unit::new(UnitId(1), UnitKind::Player, Position::new(0, 0));
        let medic = Unit::new(UnitId(2), UnitKind::Medic, Position::new(0, 0));
        let orc = Unit::new(UnitId(3), UnitKind::OrcWarrior, Position::new(0, 0));
        let zombie = Unit::new(UnitId(4), UnitKind::Zombie, Position::new(0, 0));
        assert!(!player.is_hostile_to(&medic));
        assert!(player.is_hostile_to(&orc));
        assert!(orc.is_hostile_to(&zombie));
    }

    #[test]
    fn test_modifiers_clamp_pools() {
        let mut unit = Unit::new(UnitId(1), UnitKind::Player, Position::new(0, 0));
        unit.apply_modifiers(&StatModifiers::new().with(Stat::MaxHealth, -60));
        assert_eq!(unit.max_health(), 100);
        assert_eq!(unit.health(), 100);
        unit.apply_modifiers(&StatModifiers::new());
        assert_eq!(unit.max_health(), 160);
        assert_eq!(unit.health(), 100);
    }
}
