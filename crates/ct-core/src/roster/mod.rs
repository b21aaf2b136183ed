//! Putting units into play: the player, hired mercenaries and the
//! monster population of a floor

mod monsters;
mod party;

pub use monsters::SPAWN_PLAN;
