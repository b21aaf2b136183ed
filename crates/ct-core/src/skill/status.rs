//! Timed status effects
//!
//! Effects are keyed by (unit, id). Reapplying an effect refreshes it in
//! place: remaining turns become the larger of old and new, everything
//! else is replaced. A unit's effective stats are always base stats plus
//! the sum of its effects' modifiers.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::state::GameState;
use crate::unit::{StatModifiers, UnitId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum StatusKind {
    Buff,
    Debuff,
    Aura,
}

/// Per-turn effect of a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusTick {
    /// Lose `power` health each turn
    Bleed { power: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub id: String,
    pub name: String,
    pub kind: StatusKind,
    pub duration: u32,
    pub remaining: u32,
    pub modifiers: StatModifiers,
    pub stacks: u32,
    pub tick: Option<StatusTick>,
}

impl StatusEffect {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: StatusKind, duration: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            duration,
            remaining: duration,
            modifiers: StatModifiers::new(),
            stacks: 1,
            tick: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: StatModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_stacks(mut self, stacks: u32) -> Self {
        self.stacks = stacks;
        self
    }

    pub fn with_tick(mut self, tick: StatusTick) -> Self {
        self.tick = Some(tick);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusManager {
    effects: HashMap<UnitId, Vec<StatusEffect>>,
}

impl StatusManager {
    /// Add or refresh an effect
    pub fn apply(&mut self, unit: UnitId, effect: StatusEffect) {
        let list = self.effects.entry(unit).or_default();
        if let Some(existing) = list.iter_mut().find(|e| e.id == effect.id) {
            let remaining = existing.remaining.max(effect.duration);
            *existing = StatusEffect {
                remaining,
                ..effect
            };
        } else {
            list.push(effect);
        }
    }

    pub fn remove(&mut self, unit: UnitId, id: &str) -> bool {
        let Some(list) = self.effects.get_mut(&unit) else {
            return false;
        };
        let before = list.len();
        list.retain(|e| e.id != id);
        list.len() != before
    }

    pub fn clear_unit(&mut self, unit: UnitId) {
        self.effects.remove(&unit);
    }

    pub fn statuses(&self, unit: UnitId) -> &[StatusEffect] {
        self.effects.get(&unit).map_or(&[], Vec::as_slice)
    }

    pub fn get(&self, unit: UnitId, id: &str) -> Option<&StatusEffect> {
        self.statuses(unit).iter().find(|e| e.id == id)
    }

    pub fn combined_modifiers(&self, unit: UnitId) -> StatModifiers {
        let mut total = StatModifiers::new();
        for effect in self.statuses(unit) {
            total.merge(&effect.modifiers);
        }
        total
    }

    /// Count every effect down one turn and drop the finished ones.
    ///
    /// Returns the names of expired effects.
    fn count_down(&mut self, unit: UnitId) -> Vec<String> {
        let Some(list) = self.effects.get_mut(&unit) else {
            return Vec::new();
        };
        let mut expired = Vec::new();
        list.retain_mut(|effect| {
            effect.remaining = effect.remaining.saturating_sub(1);
            if effect.remaining == 0 {
                expired.push(effect.name.clone());
                false
            } else {
                true
            }
        });
        expired
    }
}

impl GameState {
    pub fn apply_status(&mut self, unit: UnitId, effect: StatusEffect) {
        if self.living(unit).is_none() {
            return;
        }
        self.statuses.apply(unit, effect);
        self.refresh_stats(unit);
    }

    pub fn remove_status(&mut self, unit: UnitId, id: &str) -> bool {
        let removed = self.statuses.remove(unit, id);
        if removed {
            self.refresh_stats(unit);
        }
        removed
    }

    /// Run tick effects, then count down and expire.
    pub(crate) fn tick_statuses(&mut self, unit: UnitId) {
        let ticks: Vec<(String, StatusTick)> = self
            .statuses
            .statuses(unit)
            .iter()
            .filter_map(|e| e.tick.map(|t| (e.name.clone(), t)))
            .collect();

        for (name, tick) in ticks {
            match tick {
                StatusTick::Bleed { power } => {
                    let lost = self.apply_damage(unit, power);
                    if lost > 0
                        && let Some(target) = self.unit(unit)
                    {
                        let msg = format!("{} suffers {lost} from {name}.", target.name);
                        self.log.push(msg);
                    }
                }
            }
            if self.living(unit).is_none() {
                return;
            }
        }

        let expired = self.statuses.count_down(unit);
        if !expired.is_empty() {
            self.refresh_stats(unit);
            log::trace!("{unit}: {} expired", expired.join(", "));
        }
    }
}
