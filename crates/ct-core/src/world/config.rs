//! Game and dungeon configuration
//!
//! Configuration is plain serde data. Files are JSON; any missing field
//! falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use crate::consts::*;
use crate::equipment::ItemKind;
use crate::unit::UnitKind;

/// Room size and placement limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub max_rooms: usize,
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
    /// Minimum gap kept between rooms
    pub padding: i32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            max_rooms: DEFAULT_MAX_ROOMS,
            min_width: DEFAULT_ROOM_MIN_SIZE,
            max_width: DEFAULT_ROOM_MAX_SIZE,
            min_height: DEFAULT_ROOM_MIN_SIZE,
            max_height: DEFAULT_ROOM_MAX_SIZE,
            padding: DEFAULT_ROOM_PADDING,
        }
    }
}

/// Dungeon generator input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub width: i32,
    pub height: i32,
    pub room: RoomConfig,
    pub corridor_width: i32,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAP_WIDTH,
            height: DEFAULT_MAP_HEIGHT,
            room: RoomConfig::default(),
            corridor_width: DEFAULT_CORRIDOR_WIDTH,
        }
    }
}

impl DungeonConfig {
    /// Reject configurations the generator cannot work with.
    ///
    /// Room sizes larger than the map are accepted: generation simply
    /// stops early and yields fewer rooms.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 3 {
            return Err(invalid("width", self.width));
        }
        if self.height < 3 {
            return Err(invalid("height", self.height));
        }
        let room = &self.room;
        if room.min_width < 1 || room.min_width > room.max_width {
            return Err(invalid("room.min_width", room.min_width));
        }
        if room.min_height < 1 || room.min_height > room.max_height {
            return Err(invalid("room.min_height", room.min_height));
        }
        if room.padding < 0 {
            return Err(invalid("room.padding", room.padding));
        }
        if self.corridor_width < 1 {
            return Err(invalid("corridor_width", self.corridor_width));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        value: value.to_string(),
    }
}

/// Top-level game setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub dungeon: DungeonConfig,
    /// Populate rooms with the standard monster plan
    pub spawn_monsters: bool,
    /// Spawned monsters wear an enchanted axe and plate armor
    pub armed_monsters: bool,
    /// Items the player starts wearing
    pub starting_gear: Vec<ItemKind>,
    /// Party members hired at start, in order
    pub party: Vec<UnitKind>,
    /// Dungeon floor number; seeds the hostile attribute pool
    pub floor: u32,
    /// Fixed seed; a random one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dungeon: DungeonConfig::default(),
            spawn_monsters: true,
            armed_monsters: true,
            starting_gear: Vec::new(),
            party: Vec::new(),
            floor: 1,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        Self::parse_config(&contents)
    }

    /// Parse and validate configuration from a JSON string
    pub fn parse_config(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dungeon.validate()?;
        if let Some(kind) = self.party.iter().find(|k| !k.is_hireable()) {
            return Err(invalid("party", kind));
        }
        if self.party.len() > MAX_PARTY_SIZE {
            return Err(invalid("party", self.party.len()));
        }
        Ok(())
    }
}
