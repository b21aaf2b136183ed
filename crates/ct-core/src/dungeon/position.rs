use std::fmt;

use serde::{Deserialize, Serialize};

/// Tile coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// The four orthogonal step deltas in search order: +x, -x, +y, -y
    pub const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn euclidean(self, other: Position) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }

    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        Self::ORTHOGONAL
            .into_iter()
            .map(move |(dx, dy)| self.offset(dx, dy))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distances() {
        let a = Position::new(1, 1);
        let b = Position::new(4, 5);
        assert_eq!(a.manhattan(b), 7);
        assert!((a.euclidean(b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_neighbor_order() {
        let n: Vec<_> = Position::new(0, 0).neighbors().collect();
        assert_eq!(
            n,
            vec![
                Position::new(1, 0),
                Position::new(-1, 0),
                Position::new(0, 1),
                Position::new(0, -1)
            ]
        );
    }
}
