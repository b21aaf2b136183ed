use crate::consts::MAX_PARTY_SIZE;
use crate::dungeon::Position;
use crate::state::GameState;
use crate::unit::{UnitId, UnitKind};
use crate::world::ActionError;

/// Tiles tried around the player, in order
const HIRE_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

impl GameState {
    /// Place the player at `pos`, or on the first floor tile if that is
    /// taken, and grant any skills learned beforehand
    pub fn setup_player(&mut self, pos: Position) -> Result<UnitId, ActionError> {
        let tile = if self.dungeon.is_walkable(pos) && !self.occupancy().is_occupied(pos) {
            pos
        } else {
            self.dungeon
                .floor_tiles()
                .into_iter()
                .find(|&t| !self.occupancy().is_occupied(t))
                .ok_or(ActionError::NoSpawnTile)?
        };
        let id = self.spawn_unit(UnitKind::Player, tile)?;
        self.player = Some(id);
        self.sync_learned_skills();
        Ok(id)
    }

    /// Hire a mercenary next to the player
    pub fn hire(&mut self, kind: UnitKind) -> Result<UnitId, ActionError> {
        if !kind.is_hireable() {
            return Err(ActionError::NotHireable(kind));
        }
        if self.party.len() >= MAX_PARTY_SIZE {
            self.log.push("The party is full.");
            return Err(ActionError::PartyFull(self.party.len()));
        }
        let home = self
            .player_unit()
            .filter(|p| p.is_alive())
            .map(|p| p.position())
            .ok_or(ActionError::NoSpawnTile)?;
        let tile = HIRE_OFFSETS
            .iter()
            .map(|&(dx, dy)| home.offset(dx, dy))
            .find(|&t| self.dungeon.is_walkable(t) && !self.occupancy().is_occupied(t));
        let Some(tile) = tile else {
            self.log.push("There is no room for a mercenary.");
            return Err(ActionError::NoSpawnTile);
        };

        let id = self.spawn_unit(kind, tile)?;
        self.party.push(id);
        let msg = format!("Hired a {kind} mercenary.");
        self.log.push(msg);
        log::info!("hired {kind} as {id} at {tile}");
        Ok(id)
    }
}
