//! Tile occupancy index
//!
//! Two mirrored maps so that a tile holds at most one unit and a unit
//! stands on at most one tile. All writes go through methods that keep
//! both sides in step.

use hashbrown::HashMap;

use crate::dungeon::Position;
use crate::unit::UnitId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Occupancy {
    by_tile: HashMap<Position, UnitId>,
    by_unit: HashMap<UnitId, Position>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unit_at(&self, pos: Position) -> Option<UnitId> {
        self.by_tile.get(&pos).copied()
    }

    pub fn position_of(&self, unit: UnitId) -> Option<Position> {
        self.by_unit.get(&unit).copied()
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.by_tile.contains_key(&pos)
    }

    /// Put `unit` on `pos`, leaving its previous tile.
    ///
    /// Returns false (and changes nothing) if another unit holds `pos`.
    pub fn place(&mut self, unit: UnitId, pos: Position) -> bool {
        if let Some(other) = self.unit_at(pos) {
            return other == unit;
        }
        if let Some(old) = self.by_unit.insert(unit, pos) {
            self.by_tile.remove(&old);
        }
        self.by_tile.insert(pos, unit);
        true
    }

    pub fn remove(&mut self, unit: UnitId) -> Option<Position> {
        let pos = self.by_unit.remove(&unit)?;
        self.by_tile.remove(&pos);
        Some(pos)
    }

    /// Exchange the tiles of two placed units
    pub fn swap(&mut self, a: UnitId, b: UnitId) -> bool {
        let (Some(pa), Some(pb)) = (self.position_of(a), self.position_of(b)) else {
            return false;
        };
        self.by_tile.insert(pa, b);
        self.by_tile.insert(pb, a);
        self.by_unit.insert(a, pb);
        self.by_unit.insert(b, pa);
        true
    }

    pub fn len(&self) -> usize {
        self.by_unit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_unit.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (UnitId, Position)> + '_ {
        self.by_unit.iter().map(|(&u, &p)| (u, p))
    }

    /// Both directions agree entry for entry
    pub fn is_consistent(&self) -> bool {
        self.by_tile.len() == self.by_unit.len()
            && self
                .by_unit
                .iter()
                .all(|(unit, pos)| self.by_tile.get(pos) == Some(unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_and_move() {
        let mut occ = Occupancy::new();
        let a = UnitId(1);
        assert!(occ.place(a, Position::new(1, 1)));
        assert!(occ.place(a, Position::new(2, 1)));
        assert_eq!(occ.unit_at(Position::new(1, 1)), None);
        assert_eq!(occ.unit_at(Position::new(2, 1)), Some(a));
        assert_eq!(occ.len(), 1);
        assert!(occ.is_consistent());
    }

    #[test]
    fn test_place_rejects_taken_tile() {
        let mut occ = Occupancy::new();
        occ.place(UnitId(1), Position::new(1, 1));
        occ.place(UnitId(2), Position::new(2, 2));
        assert!(!occ.place(UnitId(2), Position::new(1, 1)));
        assert_eq!(occ.position_of(UnitId(2)), Some(Position::new(2, 2)));
        assert!(occ.is_consistent());
    }

    #[test]
    fn test_swap_and_remove() {
        let mut occ = Occupancy::new();
        let (a, b) = (UnitId(1), UnitId(2));
        occ.place(a, Position::new(1, 1));
        occ.place(b, Position::new(1, 2));
        assert!(occ.swap(a, b));
        assert_eq!(occ.position_of(a), Some(Position::new(1, 2)));
        assert_eq!(occ.unit_at(Position::new(1, 1)), Some(b));
        assert_eq!(occ.remove(a), Some(Position::new(1, 2)));
        assert!(!occ.is_occupied(Position::new(1, 2)));
        assert!(!occ.swap(a, b));
        assert!(occ.is_consistent());
    }
}
