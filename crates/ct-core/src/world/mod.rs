//! World-level plumbing: errors, configuration, events and the message log.

mod config;
mod errors;
mod events;
mod messages;

pub use config::{DungeonConfig, GameConfig, RoomConfig};
pub use errors::{ActionError, ConfigError};
pub use events::{EventBus, GameEvent, SubscriptionId, Topic};
pub use messages::MessageLog;
