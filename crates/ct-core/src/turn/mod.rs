//! Turn engine: action queue, ordering, movement and per-turn upkeep

mod action;
mod engine;
mod movement;
mod upkeep;

pub use action::{Action, TurnReport};
pub use engine::{TurnEngine, TurnPhase};
pub use movement::MovementManager;
