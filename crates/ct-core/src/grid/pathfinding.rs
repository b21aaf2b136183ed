//! A* pathfinding on the 4-connected grid
//!
//! Unit step cost with a Manhattan heuristic. Only floor is passable, and
//! occupied tiles block unless they are the goal itself, so callers can
//! path "into" a target they intend to attack.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use super::Occupancy;
use crate::dungeon::{Dungeon, Position};

/// One orthogonal move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub dx: i32,
    pub dy: i32,
}

impl Step {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// One tile along one axis
    pub fn is_single_tile(&self) -> bool {
        self.dx.abs() + self.dy.abs() == 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f: i32,
    seq: u32,
    pos: Position,
}

// Min-heap on f, earlier insertions first on ties
impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest path from `start` to `goal`, both included.
///
/// Returns `[start]` when they coincide and an empty path when the goal
/// cannot be reached.
pub fn find_path(
    dungeon: &Dungeon,
    occupancy: &Occupancy,
    start: Position,
    goal: Position,
) -> Vec<Position> {
    if start == goal {
        return vec![start];
    }
    if !dungeon.is_walkable(goal) {
        return Vec::new();
    }

    let mut open = BinaryHeap::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut g_score: HashMap<Position, i32> = HashMap::new();
    let mut closed: HashSet<Position> = HashSet::new();
    let mut seq = 0u32;

    g_score.insert(start, 0);
    open.push(OpenNode {
        f: start.manhattan(goal),
        seq,
        pos: start,
    });

    while let Some(OpenNode { pos: current, .. }) = open.pop() {
        if current == goal {
            return reconstruct(&came_from, current);
        }
        if !closed.insert(current) {
            continue;
        }

        let g = g_score.get(&current).copied().unwrap_or(i32::MAX);
        for next in current.neighbors() {
            if closed.contains(&next) || !dungeon.is_walkable(next) {
                continue;
            }
            if next != goal && occupancy.is_occupied(next) {
                continue;
            }
            let tentative = g + 1;
            if g_score.get(&next).is_some_and(|&old| tentative >= old) {
                continue;
            }
            came_from.insert(next, current);
            g_score.insert(next, tentative);
            seq += 1;
            open.push(OpenNode {
                f: tentative + next.manhattan(goal),
                seq,
                pos: next,
            });
        }
    }

    Vec::new()
}

fn reconstruct(came_from: &HashMap<Position, Position>, mut current: Position) -> Vec<Position> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Convert a tile path into at most `max_steps` step deltas
pub fn path_to_steps(path: &[Position], max_steps: usize) -> Vec<Step> {
    path.windows(2)
        .take(max_steps)
        .map(|w| Step::new(w[1].x - w[0].x, w[1].y - w[0].y))
        .collect()
}
