//! Line of sight
//!
//! Sight is traced with Bresenham from the viewer's tile. Because the line
//! is not symmetric, `a` seeing `b` does not guarantee `b` sees `a`.

use crate::dungeon::{Dungeon, Position};

/// Tiles strictly between `from` and `to`
pub fn bresenham_line(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };

    let mut err = dx - dy;
    let mut x = from.x;
    let mut y = from.y;
    let mut line = Vec::with_capacity((dx.max(dy)) as usize);

    while x != to.x || y != to.y {
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
        if x == to.x && y == to.y {
            break;
        }
        line.push(Position::new(x, y));
    }

    line
}

/// True when no tile between the two blocks sight
pub fn line_of_sight_clear(dungeon: &Dungeon, from: Position, to: Position) -> bool {
    bresenham_line(from, to)
        .into_iter()
        .all(|pos| !dungeon.blocks_sight(pos))
}

/// Within `range` (Euclidean) and in line of sight
pub fn can_see(dungeon: &Dungeon, from: Position, to: Position, range: i32) -> bool {
    from.euclidean(to) <= f64::from(range) && line_of_sight_clear(dungeon, from, to)
}
