//! Shared world state
//!
//! `GameState` owns the dungeon, every unit and each subsystem's
//! bookkeeping. Subsystems add their operations as `impl GameState`
//! blocks in their own modules; the methods here are the only writers of
//! unit health and mana, so every change is published on the
//! event bus and deaths are handled in one place.

use crate::combat::{AttributeResources, Enchants};
use crate::dungeon::{Dungeon, Position};
use crate::equipment::EquipmentManager;
use crate::grid::Occupancy;
use crate::skill::{SkillEngine, SkillLoadout, StatusManager};
use crate::turn::{MovementManager, TurnEngine};
use crate::unit::{Faction, Unit, UnitId, UnitKind};
use crate::world::{ActionError, EventBus, GameEvent, MessageLog};

#[derive(Debug)]
pub struct GameState {
    pub dungeon: Dungeon,
    units: Vec<Unit>,
    pub turns: TurnEngine,
    pub movement: MovementManager,
    pub skills: SkillEngine,
    pub statuses: StatusManager,
    pub attributes: AttributeResources,
    pub enchants: Enchants,
    pub equipment: EquipmentManager,
    pub loadout: SkillLoadout,
    pub events: EventBus,
    pub log: MessageLog,
    pub player: Option<UnitId>,
    /// Living hired mercenaries, in hire order
    pub party: Vec<UnitId>,
    /// Spawned monsters still alive
    pub monsters: Vec<UnitId>,
}

impl GameState {
    /// Empty state on `dungeon` with all skills registered
    pub fn new(dungeon: Dungeon, floor: u32) -> Self {
        Self {
            dungeon,
            units: Vec::new(),
            turns: TurnEngine::new(),
            movement: MovementManager::default(),
            skills: SkillEngine::with_builtin_skills(),
            statuses: StatusManager::default(),
            attributes: AttributeResources::new(floor),
            enchants: Enchants::default(),
            equipment: EquipmentManager::default(),
            loadout: SkillLoadout::default(),
            events: EventBus::new(),
            log: MessageLog::new(),
            player: None,
            party: Vec::new(),
            monsters: Vec::new(),
        }
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.0 as usize)
    }

    pub(crate) fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(id.0 as usize)
    }

    /// Live unit lookup
    pub fn living(&self, id: UnitId) -> Option<&Unit> {
        self.unit(id).filter(|u| u.is_alive())
    }

    /// Every unit ever created, dead ones included, in creation order
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub fn living_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.is_alive())
    }

    pub fn player_unit(&self) -> Option<&Unit> {
        self.player.and_then(|id| self.unit(id))
    }

    pub fn occupancy(&self) -> &Occupancy {
        self.turns.occupancy()
    }

    pub fn unit_at(&self, pos: Position) -> Option<&Unit> {
        self.occupancy().unit_at(pos).and_then(|id| self.unit(id))
    }

    /// Live units of other factions, in creation order
    pub fn hostile_units(&self, of: UnitId) -> Vec<&Unit> {
        let Some(me) = self.unit(of) else {
            return Vec::new();
        };
        self.living_units().filter(|u| u.is_hostile_to(me)).collect()
    }

    /// Live units of the same faction, `of` included
    pub fn allied_units(&self, of: UnitId) -> Vec<&Unit> {
        let Some(me) = self.unit(of) else {
            return Vec::new();
        };
        let faction = me.faction;
        self.living_units().filter(|u| u.faction == faction).collect()
    }

    pub fn faction_of(&self, id: UnitId) -> Option<Faction> {
        self.unit(id).map(|u| u.faction)
    }

    /// Create a unit and put it in play.
    ///
    /// Fails when the tile is not free floor. The unit's signature
    /// skills are granted and its initial pools are published.
    pub fn spawn_unit(&mut self, kind: UnitKind, pos: Position) -> Result<UnitId, ActionError> {
        if !self.dungeon.is_walkable(pos) || self.occupancy().is_occupied(pos) {
            return Err(ActionError::NoSpawnTile);
        }
        let id = UnitId(self.units.len() as u32);
        let unit = Unit::new(id, kind, pos);
        let template_skills = kind.template().skills;
        self.units.push(unit);
        self.register_unit(id);
        for &skill in template_skills {
            self.skills.grant_skill(id, skill);
        }
        self.publish_health(id);
        self.publish_mana(id);
        log::debug!("spawned {kind} {id} at {pos}");
        Ok(id)
    }

    /// Write a unit's health, clamped to `0..=max`.
    ///
    /// Publishes `UnitHealthChanged` when the value changes and runs death
    /// handling when the unit reaches zero. Dead units are left alone.
    pub fn set_health(&mut self, id: UnitId, value: i32) {
        let Some(unit) = self.unit_mut(id) else {
            return;
        };
        if !unit.is_alive() {
            return;
        }
        let value = value.clamp(0, unit.max_health().max(0));
        if value == unit.health {
            return;
        }
        unit.health = value;
        self.publish_health(id);
        if value == 0 {
            self.handle_death(id);
        }
    }

    pub fn set_mana(&mut self, id: UnitId, value: i32) {
        let Some(unit) = self.unit_mut(id) else {
            return;
        };
        let value = value.clamp(0, unit.max_mana().max(0));
        if value == unit.mana {
            return;
        }
        unit.mana = value;
        self.publish_mana(id);
    }

    /// Deal damage. Returns the health actually lost.
    pub fn apply_damage(&mut self, id: UnitId, amount: i32) -> i32 {
        let Some(unit) = self.living(id) else {
            return 0;
        };
        if amount <= 0 {
            return 0;
        }
        let before = unit.health();
        self.set_health(id, before - amount);
        before - self.unit(id).map_or(0, Unit::health)
    }

    /// Restore health up to max. Returns the amount actually healed.
    pub fn heal(&mut self, id: UnitId, amount: i32) -> i32 {
        let Some(unit) = self.living(id) else {
            return 0;
        };
        let before = unit.health();
        self.set_health(id, before.saturating_add(amount.max(0)));
        self.unit(id).map_or(0, Unit::health) - before
    }

    pub(crate) fn publish_health(&mut self, id: UnitId) {
        if let Some(unit) = self.unit(id) {
            let event = GameEvent::UnitHealthChanged {
                unit: id,
                current: unit.health(),
                max: unit.max_health(),
            };
            self.events.emit(event);
        }
    }

    pub(crate) fn publish_mana(&mut self, id: UnitId) {
        if let Some(unit) = self.unit(id) {
            let event = GameEvent::UnitManaChanged {
                unit: id,
                current: unit.mana(),
                max: unit.max_mana(),
            };
            self.events.emit(event);
        }
    }

    fn handle_death(&mut self, id: UnitId) {
        let Some(unit) = self.unit_mut(id) else {
            return;
        };
        let tile = unit.position;
        let name = unit.name.clone();

        self.unregister_unit(id);
        self.statuses.clear_unit(id);
        self.monsters.retain(|&m| m != id);
        self.party.retain(|&m| m != id);
        self.turns.record_death(id);

        self.log.push(format!("{name} falls."));
        self.events.emit(GameEvent::UnitDied { unit: id, tile });
    }

    /// Recompute a unit's effective stats from its statuses and gear
    pub(crate) fn refresh_stats(&mut self, id: UnitId) {
        let mut modifiers = self.statuses.combined_modifiers(id);
        modifiers.merge(&self.equipment.modifiers(id));
        let Some(unit) = self.unit_mut(id) else {
            return;
        };
        let (health, mana, max_h, max_m) = (unit.health, unit.mana, unit.max_health(), unit.max_mana());
        unit.apply_modifiers(&modifiers);
        let health_changed = unit.health != health || unit.max_health() != max_h;
        let mana_changed = unit.mana != mana || unit.max_mana() != max_m;
        if health_changed {
            self.publish_health(id);
        }
        if mana_changed {
            self.publish_mana(id);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Open rectangular arena surrounded by walls
    pub fn arena(width: i32, height: i32) -> GameState {
        let mut rows = Vec::new();
        for y in 0..height {
            let row: String = (0..width)
                .map(|x| {
                    if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect();
            rows.push(row);
        }
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        GameState::new(Dungeon::from_ascii(&refs), 1)
    }

    pub fn spawn(state: &mut GameState, kind: UnitKind, x: i32, y: i32) -> UnitId {
        state
            .spawn_unit(kind, Position::new(x, y))
            .expect("free tile")
    }
}
