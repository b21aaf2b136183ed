//! The player's learned skills and hotkey slots

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use super::{SkillId, SkillKind, TargetSide};
use crate::state::GameState;
use crate::turn::Action;
use crate::world::{ActionError, GameEvent};

/// Hotkey slot
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum SkillSlot {
    Q,
    W,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLoadout {
    learned_active: Vec<SkillId>,
    learned_passive: Vec<SkillId>,
    q: Option<SkillId>,
    w: Option<SkillId>,
}

impl SkillLoadout {
    pub fn learned_active(&self) -> &[SkillId] {
        &self.learned_active
    }

    pub fn learned_passive(&self) -> &[SkillId] {
        &self.learned_passive
    }

    pub fn is_learned(&self, skill: SkillId) -> bool {
        self.learned_active.contains(&skill) || self.learned_passive.contains(&skill)
    }

    pub fn assigned(&self, slot: SkillSlot) -> Option<SkillId> {
        match slot {
            SkillSlot::Q => self.q,
            SkillSlot::W => self.w,
        }
    }

    fn slot_mut(&mut self, slot: SkillSlot) -> &mut Option<SkillId> {
        match slot {
            SkillSlot::Q => &mut self.q,
            SkillSlot::W => &mut self.w,
        }
    }

    pub fn slots(&self) -> Vec<(SkillSlot, Option<SkillId>)> {
        SkillSlot::iter().map(|s| (s, self.assigned(s))).collect()
    }
}

impl GameState {
    /// Learn a skill and grant it to the player, if there is one
    pub fn learn_skill(&mut self, skill: SkillId) -> Result<(), ActionError> {
        let def = self
            .skills
            .skill(skill)
            .ok_or(ActionError::UnknownSkill(skill))?;
        if self.loadout.is_learned(skill) {
            return Err(ActionError::AlreadyLearned(skill));
        }
        match def.kind {
            SkillKind::Active => self.loadout.learned_active.push(skill),
            SkillKind::Passive => self.loadout.learned_passive.push(skill),
        }
        if let Some(player) = self.player {
            self.skills.grant_skill(player, skill);
        }
        self.publish_loadout();
        Ok(())
    }

    /// Grant every learned skill to the current player
    pub fn sync_learned_skills(&mut self) {
        let Some(player) = self.player else {
            return;
        };
        let learned: Vec<SkillId> = self
            .loadout
            .learned_active
            .iter()
            .chain(&self.loadout.learned_passive)
            .copied()
            .collect();
        for skill in learned {
            self.skills.grant_skill(player, skill);
        }
    }

    pub fn assign_to_slot(&mut self, slot: SkillSlot, skill: SkillId) -> Result<(), ActionError> {
        if self.loadout.learned_passive.contains(&skill) {
            return Err(ActionError::InvalidSlot(slot));
        }
        if !self.loadout.learned_active.contains(&skill) {
            return Err(ActionError::NotLearned(skill));
        }
        *self.loadout.slot_mut(slot) = Some(skill);
        self.publish_loadout();
        Ok(())
    }

    pub fn clear_slot(&mut self, slot: SkillSlot) {
        *self.loadout.slot_mut(slot) = None;
        self.publish_loadout();
    }

    /// Turn a hotkey press into a skill action with an automatic target.
    ///
    /// Returns `None` if the slot is empty or no target qualifies.
    pub fn translate_slot(&self, slot: SkillSlot) -> Option<Action> {
        let skill = self.loadout.assigned(slot)?;
        let player = self.player?;
        let def = self.skills.skill(skill)?;
        if def.targets == TargetSide::None {
            return Some(Action::skill(skill, None));
        }
        let candidates = match def.targets {
            TargetSide::Allied => self.allied_units(player),
            _ => self.hostile_units(player),
        };
        let target = self.select_skill_target(player, skill, &candidates)?;
        Some(Action::skill(skill, Some(target)))
    }

    fn publish_loadout(&mut self) {
        let event = GameEvent::PlayerSkillChanged {
            active: self.loadout.learned_active.clone(),
            passive: self.loadout.learned_passive.clone(),
            slots: self.loadout.slots(),
        };
        self.events.emit(event);
    }
}
