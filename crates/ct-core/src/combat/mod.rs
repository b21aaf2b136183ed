//! Damage formulas and melee engagements

mod attribute;

pub use attribute::{
    AttributeResources, AttributeType, DamageBreakdown, Enchants, ResourceAmount, ResourcePool,
    compute_attribute_damage,
};

use crate::state::GameState;
use crate::unit::{Stats, UnitId};

/// Physical damage: `attack - defense/2`, at least 1
pub fn calculate_damage(attacker: &Stats, defender: &Stats) -> i32 {
    (attacker.attack - defender.defense / 2).max(1)
}

/// Magic damage: `magic_attack - magic_defense/3`, at least 1
pub fn calculate_magic_damage(attacker: &Stats, defender: &Stats) -> i32 {
    (attacker.magic_attack - defender.magic_defense / 3).max(1)
}

/// Apply a skill multiplier, flooring and keeping at least 1
pub fn scale_damage(base: i32, multiplier: f64) -> i32 {
    ((f64::from(base) * multiplier).floor() as i32).max(1)
}

impl GameState {
    /// Both units strike once, fastest first.
    ///
    /// A unit only strikes if both are still alive and its target is
    /// inside its own attack range.
    pub fn resolve_engagement(&mut self, a: UnitId, b: UnitId) {
        let mut order = [a, b];
        order.sort_by_key(|&id| {
            std::cmp::Reverse(self.unit(id).map_or(i32::MIN, |u| u.stats.action_speed))
        });

        for attacker in order {
            let defender = if attacker == a { b } else { a };
            let (Some(atk), Some(def)) = (self.living(attacker), self.living(defender)) else {
                continue;
            };
            if atk.position().manhattan(def.position()) > atk.stats.attack_range {
                continue;
            }
            let base = calculate_damage(&atk.stats, &def.stats);
            let breakdown =
                compute_attribute_damage(&self.attributes, &self.enchants, atk, def, base, None);
            if breakdown.total == 0 {
                continue;
            }
            let msg = format!("{} hits {} for {}.", atk.name, def.name, breakdown.total);
            self.log.push(msg);
            self.apply_damage(defender, breakdown.total);
        }
    }
}
