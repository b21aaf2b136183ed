//! Error types for actions and configuration
//!
//! Every expected failure of a queued action is one of these. The turn
//! engine writes them to the message log and consumes the unit's slot.

use thiserror::Error;

use crate::skill::{SkillId, SkillSlot};
use crate::unit::{UnitId, UnitKind};

/// Why an action, skill or command could not be carried out
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("unit {0} does not exist")]
    UnknownUnit(UnitId),

    #[error("unit {0} is dead")]
    UnitDead(UnitId),

    #[error("target {0} is dead")]
    TargetDead(UnitId),

    #[error("target is out of range (distance {distance}, allowed {min}..={max})")]
    OutOfRange { distance: i32, min: i32, max: i32 },

    #[error("no line of sight to target")]
    NoLineOfSight,

    #[error("{0} has not been granted")]
    SkillNotGranted(SkillId),

    #[error("{0} is not a registered skill")]
    UnknownSkill(SkillId),

    #[error("not enough mana (need {needed}, have {available})")]
    InsufficientMana { needed: i32, available: i32 },

    #[error("{skill} is on cooldown for {turns} more turn(s)")]
    OnCooldown { skill: SkillId, turns: u32 },

    #[error("no valid target")]
    NoTarget,

    #[error("no path to destination")]
    NoPath,

    #[error("no free tile next to the target")]
    NoLanding,

    #[error("movement is blocked")]
    Blocked,

    #[error("step ({dx}, {dy}) is not a single orthogonal tile")]
    InvalidStep { dx: i32, dy: i32 },

    #[error("no movement left this turn")]
    NoMoveAllowance,

    #[error("party is full ({0} members)")]
    PartyFull(usize),

    #[error("{0} cannot be hired")]
    NotHireable(UnitKind),

    #[error("no free tile to spawn on")]
    NoSpawnTile,

    #[error("slot {0} cannot hold that skill")]
    InvalidSlot(SkillSlot),

    #[error("{0} has not been learned")]
    NotLearned(SkillId),

    #[error("{0} is already learned")]
    AlreadyLearned(SkillId),
}

/// Configuration loading and validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value '{value}' for '{field}'")]
    InvalidValue { field: &'static str, value: String },
}
