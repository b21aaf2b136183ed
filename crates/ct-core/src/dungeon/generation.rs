//! Procedural dungeon generation
//!
//! 1. Place rooms: one random attempt per slot, rejected on padded overlap.
//! 2. Join room centers with a minimum spanning tree (Prim).
//! 3. Add some of the remaining edges back as loops.
//! 4. Carve corridors, then a handful of short dead-end spurs.
//! 5. Put the down stairs in a room other than the spawn room.

use super::corridor::{carve_corridor, carve_rect, carve_spur};
use super::{Dungeon, Room, TileType};
use crate::consts::*;
use crate::rng::GameRng;
use crate::world::DungeonConfig;

/// Generate a dungeon floor.
///
/// Fewer than `max_rooms` rooms is a normal outcome: a slot whose room
/// overlaps an existing one is skipped, and placement stops early when the
/// map is too small for the drawn room size.
pub fn generate(config: &DungeonConfig, rng: &mut GameRng) -> Dungeon {
    let mut dungeon = Dungeon::new(config.width, config.height);

    place_rooms(&mut dungeon, config, rng);

    let centers: Vec<_> = dungeon.rooms.iter().map(Room::center).collect();
    let tree = build_spanning_tree(&dungeon.rooms);
    let mut corridors = tree.clone();
    for i in 0..centers.len() {
        for j in (i + 1)..centers.len() {
            let in_tree = tree.iter().any(|&(a, b)| (a, b) == (i, j) || (a, b) == (j, i));
            if !in_tree && rng.percent(BONUS_EDGE_PERCENT) {
                corridors.push((i, j));
            }
        }
    }
    log::debug!(
        "{} rooms, {} tree edges, {} loop edges",
        dungeon.rooms.len(),
        tree.len(),
        corridors.len() - tree.len()
    );

    for &(a, b) in &corridors {
        carve_corridor(&mut dungeon, centers[a], centers[b], config.corridor_width, rng);
    }

    let floor = dungeon.floor_tiles();
    for _ in 0..WANDERING_SPUR_COUNT {
        if let Some(&start) = rng.choose(&floor) {
            carve_spur(&mut dungeon, start, rng);
        }
    }

    if dungeon.rooms.len() > 1 {
        let index = rng.range(1, dungeon.rooms.len() as i32 - 1) as usize;
        let stairs = dungeon.rooms[index].center();
        dungeon.set_tile(stairs, TileType::StairsDown);
        dungeon.stairs = Some(stairs);
    }

    dungeon
}

fn place_rooms(dungeon: &mut Dungeon, config: &DungeonConfig, rng: &mut GameRng) {
    let rc = &config.room;
    for _ in 0..rc.max_rooms {
        let width = rng.range(rc.min_width, rc.max_width);
        let height = rng.range(rc.min_height, rc.max_height);
        let max_x = config.width - width - 1;
        let max_y = config.height - height - 1;
        if max_x <= 1 || max_y <= 1 {
            break;
        }

        let room = Room::new(rng.range(1, max_x), rng.range(1, max_y), width, height);
        if dungeon.rooms.iter().any(|r| r.overlaps(&room, rc.padding)) {
            continue;
        }

        carve_rect(dungeon, room.x, room.y, room.width, room.height);
        dungeon.rooms.push(room);
    }
}

/// Prim's minimum spanning tree over room centers.
///
/// Edge weights are Euclidean distances. Returns `rooms.len() - 1` edges
/// as `(connected, newly_connected)` index pairs.
pub fn build_spanning_tree(rooms: &[Room]) -> Vec<(usize, usize)> {
    let n = rooms.len();
    let mut edges = Vec::with_capacity(n.saturating_sub(1));
    if n < 2 {
        return edges;
    }

    let centers: Vec<_> = rooms.iter().map(Room::center).collect();
    let mut connected = vec![false; n];
    connected[0] = true;

    for _ in 1..n {
        let mut best: Option<(usize, usize, f64)> = None;
        for from in (0..n).filter(|&i| connected[i]) {
            for to in (0..n).filter(|&j| !connected[j]) {
                let weight = centers[from].euclidean(centers[to]);
                if best.is_none_or(|(_, _, w)| weight < w) {
                    best = Some((from, to, weight));
                }
            }
        }
        let Some((from, to, _)) = best else {
            break;
        };
        connected[to] = true;
        edges.push((from, to));
    }

    edges
}
