//! Item catalog

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::combat::AttributeType;
use crate::unit::{Stat, StatModifiers};

/// Where an item is worn
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum EquipSlot {
    Weapon,
    Armor,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ItemKind {
    ShortAxe,
    PlateArmor,
}

impl ItemKind {
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::ShortAxe => "short axe",
            ItemKind::PlateArmor => "plate armor",
        }
    }

    pub fn slot(self) -> EquipSlot {
        match self {
            ItemKind::ShortAxe => EquipSlot::Weapon,
            ItemKind::PlateArmor => EquipSlot::Armor,
        }
    }

    /// Stat deltas granted while worn
    pub fn modifiers(self) -> StatModifiers {
        match self {
            ItemKind::ShortAxe => StatModifiers::new()
                .with(Stat::Attack, 6)
                .with(Stat::CritChance, 2),
            ItemKind::PlateArmor => StatModifiers::new()
                .with(Stat::Defense, 10)
                .with(Stat::MagicDefense, 4)
                .with(Stat::MovePoints, -1),
        }
    }
}

/// One item instance, optionally enchanted with an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub enchant: Option<AttributeType>,
}

impl Item {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            enchant: None,
        }
    }

    pub fn enchanted(kind: ItemKind, enchant: AttributeType) -> Self {
        Self {
            kind,
            enchant: Some(enchant),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.enchant {
            Some(enchant) => write!(f, "{enchant} {}", self.kind.name()),
            None => f.write_str(self.kind.name()),
        }
    }
}
