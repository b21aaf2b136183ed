//! Core game constants
//!
//! Map defaults mirror the measurement table the dungeon is tuned for;
//! AI distances are in tiles (Manhattan unless noted).

/// Default map dimensions
pub const DEFAULT_MAP_WIDTH: i32 = 70;
pub const DEFAULT_MAP_HEIGHT: i32 = 55;

/// Room placement defaults
pub const DEFAULT_MAX_ROOMS: usize = 18;
pub const DEFAULT_ROOM_MIN_SIZE: i32 = 12;
pub const DEFAULT_ROOM_MAX_SIZE: i32 = 20;
pub const DEFAULT_ROOM_PADDING: i32 = 2;
pub const DEFAULT_CORRIDOR_WIDTH: i32 = 5;

/// Percent chance that a non-spanning-tree room edge becomes an extra corridor
pub const BONUS_EDGE_PERCENT: u32 = 30;

/// Number of short dead-end passages carved after corridors
pub const WANDERING_SPUR_COUNT: usize = 12;
pub const SPUR_MIN_SEGMENTS: u32 = 2;
pub const SPUR_MAX_SEGMENTS: u32 = 4;
pub const SPUR_MIN_LENGTH: i32 = 2;
pub const SPUR_MAX_LENGTH: i32 = 5;

/// Party limits and follow behaviour
pub const MAX_PARTY_SIZE: usize = 2;
pub const PARTY_LEASH_DISTANCE: i32 = 6;
pub const PARTY_AGGRO_RANGE: i32 = 8;
pub const PARTY_FOLLOW_DEADZONE: i32 = 2;
pub const PARTY_REGROUP_MIN: i32 = 1;
pub const PARTY_REGROUP_MAX: i32 = 2;

/// Monster behaviour distances
pub const WANDER_RADIUS: i32 = 4;
pub const SKIRMISHER_MIN_RANGE: i32 = 3;

/// Monster spawn tile retries inside a room
pub const SPAWN_TILE_RETRIES: usize = 8;

/// Message log history length
pub const MESSAGE_HISTORY_LEN: usize = 200;
