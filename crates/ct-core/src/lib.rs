//! ct-core: turn-based combat core for a tile-grid dungeon crawler
//!
//! This crate holds all game logic: dungeon generation, pathfinding and
//! vision, the turn engine, combat, skills and the AI that drives the
//! party and monsters. It performs no rendering or input handling;
//! consumers read state and events and feed actions back in.

pub mod ai;
pub mod combat;
pub mod dungeon;
pub mod equipment;
pub mod grid;
pub mod roster;
pub mod skill;
pub mod turn;
pub mod unit;
pub mod world;

mod consts;
mod gameloop;
mod rng;
mod state;

pub use consts::*;
pub use gameloop::{GameLoop, GameLoopResult};
pub use rng::GameRng;
pub use state::GameState;
pub use world::{ActionError, ConfigError};
