use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Map tile kinds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum TileType {
    #[default]
    Wall,
    Floor,
    StairsDown,
}

impl TileType {
    /// Walls stop sight; floor and stairs do not
    pub const fn blocks_sight(self) -> bool {
        matches!(self, TileType::Wall)
    }

    pub const fn symbol(self) -> char {
        match self {
            TileType::Wall => '#',
            TileType::Floor => '.',
            TileType::StairsDown => '>',
        }
    }

    pub const fn from_symbol(ch: char) -> Self {
        match ch {
            '.' => TileType::Floor,
            '>' => TileType::StairsDown,
            _ => TileType::Wall,
        }
    }
}
