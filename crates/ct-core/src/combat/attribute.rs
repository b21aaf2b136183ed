//! Elemental attribute resources, enchants and attribute damage
//!
//! Each side has a pool of nine attribute resources. The allied pool
//! starts empty; the hostile pool starts at the floor number for every
//! type. Base amounts are permanent, overcharge fades by one per turn.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::unit::{Faction, Unit, UnitId};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttributeType {
    Fire,
    Water,
    Wind,
    Earth,
    Light,
    Dark,
    Iron,
    Blood,
    Poison,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceAmount {
    pub base: i32,
    pub overcharge: i32,
}

impl ResourceAmount {
    pub fn total(&self) -> i32 {
        self.base + self.overcharge
    }
}

/// One side's attribute resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool(HashMap<AttributeType, ResourceAmount>);

impl ResourcePool {
    /// Every type at `base`, no overcharge
    pub fn filled(base: i32) -> Self {
        let base = base.max(0);
        Self(
            AttributeType::iter()
                .map(|t| (t, ResourceAmount { base, overcharge: 0 }))
                .collect(),
        )
    }

    pub fn get(&self, kind: AttributeType) -> ResourceAmount {
        self.0.get(&kind).copied().unwrap_or_default()
    }

    pub fn total(&self, kind: AttributeType) -> i32 {
        self.get(kind).total()
    }

    pub fn add_overcharge(&mut self, kind: AttributeType, amount: i32) -> i32 {
        let gained = amount.max(0);
        self.0.entry(kind).or_default().overcharge += gained;
        gained
    }

    /// Reduce every overcharge by `amount`. Returns true if anything changed.
    pub fn decay_overcharge(&mut self, amount: i32) -> bool {
        if amount <= 0 {
            return false;
        }
        let mut changed = false;
        for resource in self.0.values_mut().filter(|r| r.overcharge > 0) {
            resource.overcharge = (resource.overcharge - amount).max(0);
            changed = true;
        }
        changed
    }

    /// Snapshot in declaration order
    pub fn snapshot(&self) -> Vec<(AttributeType, ResourceAmount)> {
        AttributeType::iter().map(|t| (t, self.get(t))).collect()
    }
}

/// Allied and hostile resource pools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeResources {
    pub allies: ResourcePool,
    pub hostile: ResourcePool,
    floor: u32,
}

impl AttributeResources {
    pub fn new(floor: u32) -> Self {
        Self {
            allies: ResourcePool::filled(0),
            hostile: ResourcePool::filled(floor as i32),
            floor,
        }
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    /// Move to another floor; the hostile pool is reseeded
    pub fn set_floor(&mut self, floor: u32) {
        self.floor = floor;
        self.hostile = ResourcePool::filled(floor as i32);
    }

    pub fn pool(&self, faction: Faction) -> &ResourcePool {
        match faction {
            Faction::Allies => &self.allies,
            Faction::Undead | Faction::Horde => &self.hostile,
        }
    }

    pub fn pool_mut(&mut self, faction: Faction) -> &mut ResourcePool {
        match faction {
            Faction::Allies => &mut self.allies,
            Faction::Undead | Faction::Horde => &mut self.hostile,
        }
    }

    pub fn decay_overcharge(&mut self, amount: i32) {
        self.allies.decay_overcharge(amount);
        self.hostile.decay_overcharge(amount);
    }
}

/// Per-unit weapon and armor enchants
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enchants {
    weapon: HashMap<UnitId, AttributeType>,
    armor: HashMap<UnitId, AttributeType>,
}

impl Enchants {
    pub fn weapon(&self, id: UnitId) -> Option<AttributeType> {
        self.weapon.get(&id).copied()
    }

    pub fn armor(&self, id: UnitId) -> Option<AttributeType> {
        self.armor.get(&id).copied()
    }

    pub fn set_weapon(&mut self, id: UnitId, kind: Option<AttributeType>) {
        match kind {
            Some(kind) => self.weapon.insert(id, kind),
            None => self.weapon.remove(&id),
        };
    }

    pub fn set_armor(&mut self, id: UnitId, kind: Option<AttributeType>) {
        match kind {
            Some(kind) => self.armor.insert(id, kind),
            None => self.armor.remove(&id),
        };
    }
}

/// How a hit's damage was put together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    pub total: i32,
    pub base: i32,
    pub attribute: Option<AttributeType>,
    pub attribute_bonus: i32,
    pub weapon_bonus: i32,
    pub resistance: i32,
}

/// Fold attribute resources into a hit.
///
/// The attribute is the explicit one if given, else the attacker's weapon
/// enchant. The attacker's side adds its resource total for that type,
/// and adds it again when an explicit attribute matches the weapon
/// enchant. The defender's side resists with its own total, doubled when
/// its armor enchant matches. The result is floored at zero.
pub fn compute_attribute_damage(
    resources: &AttributeResources,
    enchants: &Enchants,
    attacker: &Unit,
    defender: &Unit,
    base: i32,
    explicit: Option<AttributeType>,
) -> DamageBreakdown {
    let base = base.max(0);
    let weapon = enchants.weapon(attacker.id);
    let Some(kind) = explicit.or(weapon) else {
        return DamageBreakdown {
            total: base,
            base,
            attribute: None,
            attribute_bonus: 0,
            weapon_bonus: 0,
            resistance: 0,
        };
    };

    let attack_resource = resources.pool(attacker.faction).total(kind);
    let weapon_bonus = if explicit.is_some() && weapon == Some(kind) {
        attack_resource
    } else {
        0
    };
    let resist_base = resources.pool(defender.faction).total(kind);
    let armor_bonus = if enchants.armor(defender.id) == Some(kind) {
        resist_base
    } else {
        0
    };
    let resistance = resist_base + armor_bonus;

    DamageBreakdown {
        total: (base + attack_resource + weapon_bonus - resistance).max(0),
        base,
        attribute: Some(kind),
        attribute_bonus: attack_resource,
        weapon_bonus,
        resistance,
    }
}
