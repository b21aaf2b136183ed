//! Units: stats, archetypes and the unit record itself

mod entity;
mod kind;
mod stats;

pub use entity::{Capabilities, Unit, UnitId, UnitSnapshot};
pub use kind::{BehaviorProfile, Faction, UnitKind, UnitTemplate};
pub use stats::{Stat, StatModifiers, Stats};
