//! Skills: definitions, the skill engine, status effects and the
//! player's loadout

pub mod definitions;
mod engine;
mod loadout;
mod status;

pub use definitions::{AiHint, SkillDefinition, SkillKind, SkillRange, TargetQuery, TargetSide};
pub use engine::{SkillEngine, SkillId};
pub use loadout::{SkillLoadout, SkillSlot};
pub use status::{StatusEffect, StatusKind, StatusManager, StatusTick};
