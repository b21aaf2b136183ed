//! End-of-turn upkeep: regeneration, status ticks and overcharge decay

use crate::state::GameState;
use crate::unit::UnitId;

impl GameState {
    pub(crate) fn advance_turn_counters(&mut self) {
        let units: Vec<UnitId> = self.turns.registered().to_vec();
        for &id in &units {
            self.apply_regen(id);
        }
        for &id in &units {
            self.tick_statuses(id);
        }
        self.attributes.decay_overcharge(1);
    }

    /// Restore `health_regen` and `mana_regen`, capped at the maxima
    pub fn apply_regen(&mut self, id: UnitId) {
        let Some(unit) = self.living(id) else {
            return;
        };
        let health = unit.health() + unit.stats.health_regen.max(0);
        let mana = unit.mana() + unit.stats.mana_regen.max(0);
        self.set_health(id, health);
        self.set_mana(id, mana);
    }
}
