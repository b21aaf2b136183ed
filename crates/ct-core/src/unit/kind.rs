//! Unit archetypes and their starting stat blocks

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::Stats;
use super::entity::Capabilities;
use crate::skill::SkillId;

/// Side a unit fights for. Units of different factions are hostile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Faction {
    Allies,
    Undead,
    Horde,
}

/// Monster decision style
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BehaviorProfile {
    /// Dormant until it sees an enemy, then closes in
    Shambler,
    /// Strikes with its signature melee skill, otherwise closes in
    Melee,
    /// Keeps a firing band, retreating when crowded
    Skirmisher,
    /// Casts when possible, otherwise closes in
    Caster,
    /// Rallies nearby allies, otherwise closes in
    Warden,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UnitKind {
    Player,
    Sentinel,
    Medic,
    Gunner,
    Zombie,
    OrcWarrior,
    OrcArcher,
    OrcWizard,
    MinotaurWarrior,
}

/// Everything needed to build a fresh unit of some kind
#[derive(Debug, Clone, Copy)]
pub struct UnitTemplate {
    pub name: &'static str,
    pub faction: Faction,
    pub capabilities: Capabilities,
    pub stats: Stats,
    pub behavior: Option<BehaviorProfile>,
    pub skills: &'static [SkillId],
}

impl UnitKind {
    /// Mercenaries the party can hire
    pub const fn is_hireable(self) -> bool {
        matches!(self, UnitKind::Sentinel | UnitKind::Medic | UnitKind::Gunner)
    }

    pub const fn is_monster(self) -> bool {
        matches!(
            self,
            UnitKind::Zombie
                | UnitKind::OrcWarrior
                | UnitKind::OrcArcher
                | UnitKind::OrcWizard
                | UnitKind::MinotaurWarrior
        )
    }

    pub fn template(self) -> UnitTemplate {
        let all = Capabilities::all();
        match self {
            UnitKind::Player => UnitTemplate {
                name: "Warrior",
                faction: Faction::Allies,
                capabilities: all,
                stats: Stats {
                    max_health: 160,
                    max_mana: 50,
                    attack: 16,
                    defense: 12,
                    magic_attack: 8,
                    magic_defense: 8,
                    action_speed: 10,
                    move_points: 4,
                    sight_range: 10,
                    attack_range: 1,
                    accuracy: 85,
                    evasion: 10,
                    crit_chance: 5,
                    health_regen: 4,
                    mana_regen: 2,
                },
                behavior: None,
                skills: &[],
            },
            UnitKind::Sentinel => UnitTemplate {
                name: "Sentinel",
                faction: Faction::Allies,
                capabilities: all,
                stats: Stats {
                    max_health: 240,
                    max_mana: 40,
                    attack: 14,
                    defense: 16,
                    magic_attack: 4,
                    magic_defense: 10,
                    action_speed: 9,
                    move_points: 4,
                    sight_range: 9,
                    attack_range: 1,
                    accuracy: 80,
                    evasion: 5,
                    crit_chance: 5,
                    health_regen: 5,
                    mana_regen: 1,
                },
                behavior: None,
                skills: &[SkillId::Charge],
            },
            UnitKind::Medic => UnitTemplate {
                name: "Medic",
                faction: Faction::Allies,
                capabilities: all,
                stats: Stats {
                    max_health: 130,
                    max_mana: 80,
                    attack: 8,
                    defense: 8,
                    magic_attack: 16,
                    magic_defense: 14,
                    action_speed: 9,
                    move_points: 4,
                    sight_range: 10,
                    attack_range: 1,
                    accuracy: 80,
                    evasion: 10,
                    crit_chance: 3,
                    health_regen: 2,
                    mana_regen: 3,
                },
                behavior: None,
                skills: &[SkillId::Heal],
            },
            UnitKind::Gunner => UnitTemplate {
                name: "Gunner",
                faction: Faction::Allies,
                capabilities: all,
                stats: Stats {
                    max_health: 140,
                    max_mana: 60,
                    attack: 15,
                    defense: 9,
                    magic_attack: 6,
                    magic_defense: 8,
                    action_speed: 11,
                    move_points: 4,
                    sight_range: 11,
                    attack_range: 5,
                    accuracy: 90,
                    evasion: 8,
                    crit_chance: 8,
                    health_regen: 2,
                    mana_regen: 2,
                },
                behavior: None,
                skills: &[SkillId::Snipe],
            },
            UnitKind::Zombie => UnitTemplate {
                name: "Zombie",
                faction: Faction::Undead,
                capabilities: Capabilities::COMBATANT | Capabilities::MOVER,
                stats: Stats {
                    max_health: 110,
                    max_mana: 0,
                    attack: 11,
                    defense: 6,
                    magic_attack: 0,
                    magic_defense: 2,
                    action_speed: 7,
                    move_points: 3,
                    sight_range: 9,
                    attack_range: 1,
                    accuracy: 70,
                    evasion: 2,
                    crit_chance: 0,
                    health_regen: 1,
                    mana_regen: 0,
                },
                behavior: Some(BehaviorProfile::Shambler),
                skills: &[],
            },
            UnitKind::OrcWarrior => UnitTemplate {
                name: "Orc Warrior",
                faction: Faction::Horde,
                capabilities: all,
                stats: Stats {
                    max_health: 180,
                    max_mana: 50,
                    attack: 18,
                    defense: 11,
                    magic_attack: 4,
                    magic_defense: 6,
                    action_speed: 8,
                    move_points: 3,
                    sight_range: 8,
                    attack_range: 1,
                    accuracy: 80,
                    evasion: 5,
                    crit_chance: 5,
                    health_regen: 2,
                    mana_regen: 1,
                },
                behavior: Some(BehaviorProfile::Melee),
                skills: &[SkillId::RendingStrike],
            },
            UnitKind::OrcArcher => UnitTemplate {
                name: "Orc Archer",
                faction: Faction::Horde,
                capabilities: all,
                stats: Stats {
                    max_health: 130,
                    max_mana: 70,
                    attack: 16,
                    defense: 7,
                    magic_attack: 4,
                    magic_defense: 6,
                    action_speed: 9,
                    move_points: 3,
                    sight_range: 11,
                    attack_range: 7,
                    accuracy: 85,
                    evasion: 8,
                    crit_chance: 6,
                    health_regen: 1,
                    mana_regen: 2,
                },
                behavior: Some(BehaviorProfile::Skirmisher),
                skills: &[SkillId::Snipe],
            },
            UnitKind::OrcWizard => UnitTemplate {
                name: "Orc Wizard",
                faction: Faction::Horde,
                capabilities: all,
                stats: Stats {
                    max_health: 120,
                    max_mana: 90,
                    attack: 10,
                    defense: 6,
                    magic_attack: 18,
                    magic_defense: 12,
                    action_speed: 8,
                    move_points: 3,
                    sight_range: 10,
                    attack_range: 6,
                    accuracy: 80,
                    evasion: 6,
                    crit_chance: 4,
                    health_regen: 1,
                    mana_regen: 3,
                },
                behavior: Some(BehaviorProfile::Caster),
                skills: &[SkillId::Fireball],
            },
            UnitKind::MinotaurWarrior => UnitTemplate {
                name: "Minotaur Warrior",
                faction: Faction::Horde,
                capabilities: all,
                stats: Stats {
                    max_health: 230,
                    max_mana: 70,
                    attack: 20,
                    defense: 14,
                    magic_attack: 4,
                    magic_defense: 8,
                    action_speed: 7,
                    move_points: 3,
                    sight_range: 9,
                    attack_range: 1,
                    accuracy: 75,
                    evasion: 3,
                    crit_chance: 6,
                    health_regen: 3,
                    mana_regen: 2,
                },
                behavior: Some(BehaviorProfile::Warden),
                skills: &[SkillId::BattleCry],
            },
        }
    }
}
