//! Dungeon map, rooms and procedural generation

mod corridor;
mod generation;
mod position;
mod room;
mod tile;

pub use corridor::{carve_corridor, carve_rect, carve_spur};
pub use generation::{build_spanning_tree, generate};
pub use position::Position;
pub use room::Room;
pub use tile::TileType;

use serde::{Deserialize, Serialize};

use crate::rng::GameRng;

/// A generated dungeon floor
///
/// Tiles are indexed `tiles[x][y]`. The layout never changes after
/// generation; units live in the turn engine's occupancy index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<Vec<TileType>>,
    pub rooms: Vec<Room>,
    pub stairs: Option<Position>,
}

impl Dungeon {
    /// Solid rock of the given size
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![vec![TileType::Wall; height as usize]; width as usize],
            rooms: Vec::new(),
            stairs: None,
        }
    }

    /// Build a dungeon from ASCII rows (`#` wall, `.` floor, `>` stairs).
    ///
    /// Unknown characters become walls. Mostly useful for tests and fixtures.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
        let mut dungeon = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                let tile = TileType::from_symbol(ch);
                if tile == TileType::StairsDown {
                    dungeon.stairs = Some(pos);
                }
                dungeon.set_tile(pos, tile);
            }
        }
        dungeon
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    pub fn tile(&self, pos: Position) -> Option<TileType> {
        if self.in_bounds(pos) {
            Some(self.tiles[pos.x as usize][pos.y as usize])
        } else {
            None
        }
    }

    pub fn set_tile(&mut self, pos: Position, tile: TileType) {
        if self.in_bounds(pos) {
            self.tiles[pos.x as usize][pos.y as usize] = tile;
        }
    }

    /// Units may only stand on and path through floor.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tile(pos) == Some(TileType::Floor)
    }

    /// Out-of-bounds tiles block sight like walls.
    pub fn blocks_sight(&self, pos: Position) -> bool {
        self.tile(pos).is_none_or(|t| t.blocks_sight())
    }

    pub fn floor_tiles(&self) -> Vec<Position> {
        let mut tiles = Vec::new();
        for x in 0..self.width {
            for y in 0..self.height {
                let pos = Position::new(x, y);
                if self.is_walkable(pos) {
                    tiles.push(pos);
                }
            }
        }
        tiles
    }

    /// Random walkable tile inside room `index`
    pub fn random_tile_in_room(&self, index: usize, rng: &mut GameRng) -> Option<Position> {
        let room = self.rooms.get(index)?;
        let pos = Position::new(
            rng.range(room.x, room.x + room.width - 1),
            rng.range(room.y, room.y + room.height - 1),
        );
        self.is_walkable(pos).then_some(pos)
    }

    pub fn room_at(&self, pos: Position) -> Option<usize> {
        self.rooms.iter().position(|r| r.contains(pos))
    }

    /// Render as text, one row per line
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.tiles[x as usize][y as usize].symbol());
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_solid() {
        let dungeon = Dungeon::new(5, 4);
        assert!(dungeon.floor_tiles().is_empty());
        assert_eq!(dungeon.tile(Position::new(4, 3)), Some(TileType::Wall));
        assert_eq!(dungeon.tile(Position::new(5, 0)), None);
    }

    #[test]
    fn test_ascii_round_trip() {
        let rows = ["#####", "#..>#", "#####"];
        let dungeon = Dungeon::from_ascii(&rows);
        assert_eq!(dungeon.width, 5);
        assert_eq!(dungeon.stairs, Some(Position::new(3, 1)));
        assert_eq!(dungeon.to_ascii(), "#####\n#..>#\n#####\n");
    }

    #[test]
    fn test_walkable_and_sight() {
        let dungeon = Dungeon::from_ascii(&["#.>"]);
        assert!(!dungeon.is_walkable(Position::new(0, 0)));
        assert!(dungeon.is_walkable(Position::new(1, 0)));
        // stairs can be seen across but not walked through
        assert!(!dungeon.is_walkable(Position::new(2, 0)));
        assert!(!dungeon.blocks_sight(Position::new(2, 0)));
        assert!(dungeon.blocks_sight(Position::new(0, 0)));
        assert!(dungeon.blocks_sight(Position::new(-1, 0)));
    }

    #[test]
    fn test_random_tile_in_room() {
        let mut dungeon = Dungeon::new(10, 10);
        let room = Room::new(2, 2, 3, 3);
        carve_rect(&mut dungeon, room.x, room.y, room.width, room.height);
        dungeon.rooms.push(room);
        let mut rng = GameRng::new(42);
        for _ in 0..20 {
            let pos = dungeon.random_tile_in_room(0, &mut rng).unwrap();
            assert!(room.contains(pos));
        }
        assert!(dungeon.random_tile_in_room(1, &mut rng).is_none());
    }
}
