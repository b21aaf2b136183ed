//! Worn equipment
//!
//! Each unit has a weapon and an armor slot. Worn items stack their stat
//! modifiers on top of the unit's base stats alongside status effects,
//! and a worn item's enchant becomes the unit's weapon or armor enchant.

mod item;

pub use item::{EquipSlot, Item, ItemKind};

use hashbrown::HashMap;
use strum::IntoEnumIterator;

use crate::combat::AttributeType;
use crate::rng::GameRng;
use crate::state::GameState;
use crate::unit::{StatModifiers, UnitId};
use crate::world::ActionError;

/// Enchants an armed monster may roll
pub const MONSTER_ENCHANTS: [AttributeType; 6] = [
    AttributeType::Fire,
    AttributeType::Water,
    AttributeType::Wind,
    AttributeType::Earth,
    AttributeType::Light,
    AttributeType::Dark,
];

/// What one unit is wearing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gear {
    weapon: Option<Item>,
    armor: Option<Item>,
}

impl Gear {
    pub fn get(&self, slot: EquipSlot) -> Option<Item> {
        match slot {
            EquipSlot::Weapon => self.weapon,
            EquipSlot::Armor => self.armor,
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<Item> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
        }
    }

    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        EquipSlot::iter().filter_map(move |slot| self.get(slot))
    }

    /// Summed modifiers of everything worn
    pub fn modifiers(&self) -> StatModifiers {
        let mut total = StatModifiers::new();
        for item in self.items() {
            total.merge(&item.kind.modifiers());
        }
        total
    }
}

#[derive(Debug, Clone, Default)]
pub struct EquipmentManager {
    gear: HashMap<UnitId, Gear>,
}

impl EquipmentManager {
    pub fn gear(&self, id: UnitId) -> Gear {
        self.gear.get(&id).copied().unwrap_or_default()
    }

    pub fn modifiers(&self, id: UnitId) -> StatModifiers {
        self.gear.get(&id).map(Gear::modifiers).unwrap_or_default()
    }

    fn put(&mut self, id: UnitId, item: Item) -> Option<Item> {
        self.gear
            .entry(id)
            .or_default()
            .slot_mut(item.kind.slot())
            .replace(item)
    }

    fn take(&mut self, id: UnitId, slot: EquipSlot) -> Option<Item> {
        self.gear.get_mut(&id)?.slot_mut(slot).take()
    }
}

impl GameState {
    /// Wear `item` in its slot. Returns whatever it displaced.
    pub fn equip(&mut self, id: UnitId, item: Item) -> Result<Option<Item>, ActionError> {
        self.living(id).ok_or(ActionError::UnitDead(id))?;
        let displaced = self.equipment.put(id, item);
        self.sync_enchants(id);
        self.refresh_stats(id);
        log::debug!("{id} equips {item}");
        Ok(displaced)
    }

    pub fn unequip(&mut self, id: UnitId, slot: EquipSlot) -> Option<Item> {
        let item = self.equipment.take(id, slot)?;
        self.sync_enchants(id);
        self.refresh_stats(id);
        Some(item)
    }

    /// Arm a monster with an axe and plate armor sharing one rolled enchant
    pub fn equip_monster(&mut self, id: UnitId, rng: &mut GameRng) -> Result<AttributeType, ActionError> {
        let enchant = MONSTER_ENCHANTS[rng.rn2(MONSTER_ENCHANTS.len() as u32) as usize];
        self.equip(id, Item::enchanted(ItemKind::ShortAxe, enchant))?;
        self.equip(id, Item::enchanted(ItemKind::PlateArmor, enchant))?;
        Ok(enchant)
    }

    fn sync_enchants(&mut self, id: UnitId) {
        let gear = self.equipment.gear(id);
        let enchant_of = |slot: EquipSlot| gear.get(slot).and_then(|item: Item| item.enchant);
        self.enchants.set_weapon(id, enchant_of(EquipSlot::Weapon));
        self.enchants.set_armor(id, enchant_of(EquipSlot::Armor));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::*;
    use crate::unit::UnitKind;

    #[test]
    fn test_gear_changes_stats_and_enchants() {
        let mut state = arena(8, 5);
        let id = spawn(&mut state, UnitKind::Player, 1, 1);
        let axe = Item::enchanted(ItemKind::ShortAxe, AttributeType::Fire);
        assert_eq!(state.equip(id, axe), Ok(None));
        assert_eq!(state.equip(id, Item::new(ItemKind::PlateArmor)), Ok(None));

        let unit = state.unit(id).unwrap();
        assert_eq!(unit.stats.attack, 22);
        assert_eq!(unit.stats.defense, 22);
        assert_eq!(unit.move_allowance(), 3);
        assert_eq!(state.enchants.weapon(id), Some(AttributeType::Fire));
        assert_eq!(state.enchants.armor(id), None);

        assert_eq!(state.unequip(id, EquipSlot::Weapon), Some(axe));
        assert_eq!(state.unit(id).unwrap().stats.attack, 16);
        assert_eq!(state.enchants.weapon(id), None);
        assert_eq!(state.unequip(id, EquipSlot::Weapon), None);
    }

    #[test]
    fn test_equip_returns_displaced_item() {
        let mut state = arena(8, 5);
        let id = spawn(&mut state, UnitKind::Sentinel, 1, 1);
        let plain = Item::new(ItemKind::ShortAxe);
        let dark = Item::enchanted(ItemKind::ShortAxe, AttributeType::Dark);
        state.equip(id, plain).unwrap();
        assert_eq!(state.equip(id, dark), Ok(Some(plain)));
        assert_eq!(state.equipment.gear(id).items().count(), 1);
        assert_eq!(state.enchants.weapon(id), Some(AttributeType::Dark));
    }

    #[test]
    fn test_gear_survives_stat_refresh() {
        let mut state = arena(8, 5);
        let id = spawn(&mut state, UnitKind::Player, 1, 1);
        state.equip(id, Item::new(ItemKind::ShortAxe)).unwrap();
        state.refresh_stats(id);
        assert_eq!(state.unit(id).unwrap().stats.attack, 22);
    }

    #[test]
    fn test_dead_units_cannot_equip() {
        let mut state = arena(8, 5);
        let id = spawn(&mut state, UnitKind::Zombie, 1, 1);
        state.set_health(id, 0);
        assert_eq!(
            state.equip(id, Item::new(ItemKind::ShortAxe)),
            Err(ActionError::UnitDead(id))
        );
    }

    #[test]
    fn test_armed_monster_shares_one_enchant() {
        let mut state = arena(8, 5);
        let orc = spawn(&mut state, UnitKind::OrcWarrior, 1, 1);
        let mut rng = GameRng::new(12);
        let enchant = state.equip_monster(orc, &mut rng).unwrap();
        assert!(MONSTER_ENCHANTS.contains(&enchant));
        assert_eq!(state.enchants.weapon(orc), Some(enchant));
        assert_eq!(state.enchants.armor(orc), Some(enchant));
        assert_eq!(state.unit(orc).unwrap().stats.defense, 21);
    }

    #[test]
    fn test_weapon_enchant_adds_attribute_damage() {
        let mut state = arena(8, 5);
        let player = spawn(&mut state, UnitKind::Player, 1, 1);
        let orc = spawn(&mut state, UnitKind::OrcWarrior, 2, 1);
        state
            .equip(orc, Item::enchanted(ItemKind::ShortAxe, AttributeType::Fire))
            .unwrap();
        state.resolve_engagement(orc, player);
        // 24 - 12/2 = 18, plus the floor-1 hostile fire resource
        assert_eq!(state.unit(player).unwrap().health(), 160 - 19);
        // 16 - 11/2 = 11, no attribute on either side
        assert_eq!(state.unit(orc).unwrap().health(), 180 - 11);
    }
}
