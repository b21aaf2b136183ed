//! Grid services: occupancy, pathfinding and line of sight

mod occupancy;
mod pathfinding;
mod vision;

pub use occupancy::Occupancy;
pub use pathfinding::{Step, find_path, path_to_steps};
pub use vision::{bresenham_line, can_see, line_of_sight_clear};
