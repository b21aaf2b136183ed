use crate::consts::SPAWN_TILE_RETRIES;
use crate::dungeon::Position;
use crate::rng::GameRng;
use crate::state::GameState;
use crate::unit::{UnitId, UnitKind};

/// How many of each monster a floor gets, in spawn order
pub const SPAWN_PLAN: [(UnitKind, usize); 5] = [
    (UnitKind::OrcWarrior, 4),
    (UnitKind::OrcArcher, 3),
    (UnitKind::OrcWizard, 3),
    (UnitKind::MinotaurWarrior, 2),
    (UnitKind::Zombie, 4),
];

impl GameState {
    /// Populate every room but the first.
    ///
    /// Each monster takes a random unused room, so a dungeon with fewer
    /// rooms than the plan simply gets fewer monsters.
    pub fn spawn_monsters(&mut self, rng: &mut GameRng) -> Vec<UnitId> {
        let mut rooms: Vec<usize> = (1..self.dungeon.rooms.len()).collect();
        let mut spawned = Vec::new();

        for (kind, count) in SPAWN_PLAN {
            for _ in 0..count {
                if rooms.is_empty() {
                    break;
                }
                let room = rooms.remove(rng.rn2(rooms.len() as u32) as usize);
                let Some(tile) = self.pick_spawn_tile(room, rng) else {
                    log::debug!("no room for {kind} in room {room}");
                    continue;
                };
                match self.spawn_unit(kind, tile) {
                    Ok(id) => {
                        self.monsters.push(id);
                        spawned.push(id);
                    }
                    Err(err) => log::debug!("{kind} not spawned: {err}"),
                }
            }
        }
        log::info!("spawned {} monsters", spawned.len());
        spawned
    }

    fn pick_spawn_tile(&self, room: usize, rng: &mut GameRng) -> Option<Position> {
        (0..=SPAWN_TILE_RETRIES)
            .filter_map(|_| self.dungeon.random_tile_in_room(room, rng))
            .find(|&tile| !self.occupancy().is_occupied(tile))
    }
}
