//! Unit statistics and additive modifiers

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Stat block shared by every unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub max_health: i32,
    pub max_mana: i32,
    pub attack: i32,
    pub defense: i32,
    pub magic_attack: i32,
    pub magic_defense: i32,
    /// Higher acts earlier within a turn
    pub action_speed: i32,
    /// Tiles a unit may walk per turn
    pub move_points: i32,
    pub sight_range: i32,
    pub attack_range: i32,
    pub accuracy: i32,
    pub evasion: i32,
    pub crit_chance: i32,
    pub health_regen: i32,
    pub mana_regen: i32,
}

/// Addressable stat for modifiers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Stat {
    MaxHealth,
    MaxMana,
    Attack,
    Defense,
    MagicAttack,
    MagicDefense,
    ActionSpeed,
    MovePoints,
    SightRange,
    AttackRange,
    Accuracy,
    Evasion,
    CritChance,
    HealthRegen,
    ManaRegen,
}

impl Stats {
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::MaxHealth => self.max_health,
            Stat::MaxMana => self.max_mana,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::MagicAttack => self.magic_attack,
            Stat::MagicDefense => self.magic_defense,
            Stat::ActionSpeed => self.action_speed,
            Stat::MovePoints => self.move_points,
            Stat::SightRange => self.sight_range,
            Stat::AttackRange => self.attack_range,
            Stat::Accuracy => self.accuracy,
            Stat::Evasion => self.evasion,
            Stat::CritChance => self.crit_chance,
            Stat::HealthRegen => self.health_regen,
            Stat::ManaRegen => self.mana_regen,
        }
    }

    fn slot(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::MaxHealth => &mut self.max_health,
            Stat::MaxMana => &mut self.max_mana,
            Stat::Attack => &mut self.attack,
            Stat::Defense => &mut self.defense,
            Stat::MagicAttack => &mut self.magic_attack,
            Stat::MagicDefense => &mut self.magic_defense,
            Stat::ActionSpeed => &mut self.action_speed,
            Stat::MovePoints => &mut self.move_points,
            Stat::SightRange => &mut self.sight_range,
            Stat::AttackRange => &mut self.attack_range,
            Stat::Accuracy => &mut self.accuracy,
            Stat::Evasion => &mut self.evasion,
            Stat::CritChance => &mut self.crit_chance,
            Stat::HealthRegen => &mut self.health_regen,
            Stat::ManaRegen => &mut self.mana_regen,
        }
    }

    /// Base values plus every modifier delta
    pub fn with_modifiers(&self, modifiers: &StatModifiers) -> Stats {
        let mut out = *self;
        for (stat, delta) in modifiers.iter() {
            *out.slot(stat) += delta;
        }
        out
    }
}

/// Additive stat deltas
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatModifiers(HashMap<Stat, i32>);

impl StatModifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, stat: Stat, delta: i32) -> Self {
        self.add(stat, delta);
        self
    }

    pub fn add(&mut self, stat: Stat, delta: i32) {
        *self.0.entry(stat).or_insert(0) += delta;
    }

    pub fn get(&self, stat: Stat) -> i32 {
        self.0.get(&stat).copied().unwrap_or(0)
    }

    /// Sum another set of modifiers into this one
    pub fn merge(&mut self, other: &StatModifiers) {
        for (stat, delta) in other.iter() {
            self.add(stat, delta);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        self.0.iter().map(|(&s, &d)| (s, d))
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|&d| d == 0)
    }
}
