//! Rectangular rooms

use serde::{Deserialize, Serialize};

use super::Position;

/// A rectangular room; `x`/`y` is the top-left floor tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x
            && pos.x < self.x + self.width
            && pos.y >= self.y
            && pos.y < self.y + self.height
    }

    /// True when the rooms are closer than `padding` tiles on both axes
    pub fn overlaps(&self, other: &Room, padding: i32) -> bool {
        self.x - padding < other.x + other.width
            && self.x + self.width + padding > other.x
            && self.y - padding < other.y + other.height
            && self.y + self.height + padding > other.y
    }
}
