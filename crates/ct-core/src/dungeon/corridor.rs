//! Corridor and spur carving
//!
//! Corridors are drawn as 2 or 3 axis-aligned segments, each a filled
//! rectangle `corridor_width` tiles thick. Carving never touches the
//! outer border ring.

use super::{Dungeon, Position, TileType};
use crate::consts::*;
use crate::rng::GameRng;

/// Fill a rectangle with floor, clipped to the map interior
pub fn carve_rect(dungeon: &mut Dungeon, x: i32, y: i32, width: i32, height: i32) {
    let x0 = x.max(1);
    let y0 = y.max(1);
    let x1 = (x + width).min(dungeon.width - 1);
    let y1 = (y + height).min(dungeon.height - 1);
    for cx in x0..x1 {
        for cy in y0..y1 {
            dungeon.set_tile(Position::new(cx, cy), TileType::Floor);
        }
    }
}

/// Carve a straight axis-aligned segment `width` tiles thick
fn carve_segment(dungeon: &mut Dungeon, from: Position, to: Position, width: i32) {
    let half = width / 2;
    let (min_x, max_x) = (from.x.min(to.x), from.x.max(to.x));
    let (min_y, max_y) = (from.y.min(to.y), from.y.max(to.y));
    carve_rect(
        dungeon,
        min_x - half,
        min_y - half,
        max_x - min_x + width,
        max_y - min_y + width,
    );
}

/// Connect two tiles with a bent corridor.
///
/// Half of the corridors are simple L shapes; the rest take a detour
/// through a random bend line between the endpoints.
pub fn carve_corridor(
    dungeon: &mut Dungeon,
    from: Position,
    to: Position,
    width: i32,
    rng: &mut GameRng,
) {
    let horizontal_first = rng.one_in(2);
    let three_segments = rng.one_in(2);

    let waypoints: Vec<Position> = match (three_segments, horizontal_first) {
        (false, true) => vec![from, Position::new(to.x, from.y), to],
        (false, false) => vec![from, Position::new(from.x, to.y), to],
        (true, true) => {
            let bend_x = rng.range(from.x.min(to.x), from.x.max(to.x));
            vec![
                from,
                Position::new(bend_x, from.y),
                Position::new(bend_x, to.y),
                to,
            ]
        }
        (true, false) => {
            let bend_y = rng.range(from.y.min(to.y), from.y.max(to.y));
            vec![
                from,
                Position::new(from.x, bend_y),
                Position::new(to.x, bend_y),
                to,
            ]
        }
    };

    for pair in waypoints.windows(2) {
        carve_segment(dungeon, pair[0], pair[1], width);
    }
}

/// Carve a short one-tile-wide dead end starting from `start`.
///
/// The walk is made of connected straight segments; each step is clamped
/// inside the border so spurs never open the map edge.
pub fn carve_spur(dungeon: &mut Dungeon, start: Position, rng: &mut GameRng) {
    let segments = rng.range(SPUR_MIN_SEGMENTS as i32, SPUR_MAX_SEGMENTS as i32);
    let mut pos = start;
    for _ in 0..segments {
        let Some(&(dx, dy)) = rng.choose(&Position::ORTHOGONAL) else {
            return;
        };
        let length = rng.range(SPUR_MIN_LENGTH, SPUR_MAX_LENGTH);
        for _ in 0..length {
            pos = Position::new(
                (pos.x + dx).clamp(1, dungeon.width - 2),
                (pos.y + dy).clamp(1, dungeon.height - 2),
            );
            dungeon.set_tile(pos, TileType::Floor);
        }
    }
}
