use serde::{Deserialize, Serialize};

use crate::grid::Step;
use crate::skill::SkillId;
use crate::unit::UnitId;
use crate::world::ActionError;

/// An intent queued for one unit for one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Single orthogonal step
    Move { dx: i32, dy: i32 },
    /// Walk a sequence of steps, bounded by the move allowance
    Path(Vec<Step>),
    /// Use a skill, optionally on an explicit target
    Skill {
        skill: SkillId,
        target: Option<UnitId>,
    },
    /// Basic attack against a unit already in range
    Attack { target: UnitId },
}

impl Action {
    pub fn path(steps: Vec<Step>) -> Self {
        Action::Path(steps)
    }

    pub fn skill(skill: SkillId, target: Option<UnitId>) -> Self {
        Action::Skill { skill, target }
    }

    /// Target unit, if the action names one
    pub fn target(&self) -> Option<UnitId> {
        match self {
            Action::Skill { target, .. } => *target,
            Action::Attack { target } => Some(*target),
            Action::Move { .. } | Action::Path(_) => None,
        }
    }
}

/// What happened during one resolved turn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnReport {
    /// Turn number after resolution
    pub turn: u32,
    /// Units whose action succeeded, in execution order
    pub resolved: Vec<UnitId>,
    /// Units whose action was rejected
    pub failed: Vec<(UnitId, ActionError)>,
    /// Units queued but dead before their slot came up
    pub skipped: Vec<UnitId>,
    pub deaths: Vec<UnitId>,
}
