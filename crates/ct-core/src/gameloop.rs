//! Turn-by-turn driver
//!
//! `GameLoop` owns the state, the random source and the skill AI, and
//! runs one full turn per `tick`: the player's intent is queued, the
//! party and monsters plan, and the turn engine resolves everything.

use crate::ai::{SkillAiManager, plan_monster_turn, plan_party_turn};
use crate::dungeon::{Position, generate};
use crate::equipment::Item;
use crate::rng::GameRng;
use crate::state::GameState;
use crate::turn::{Action, TurnReport};
use crate::world::{ActionError, GameConfig};

/// Outcome of a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameLoopResult {
    /// Continue playing
    Continue,
    /// Player died with message
    PlayerDied(String),
    /// Every monster on the floor is dead
    FloorCleared,
}

#[derive(Debug)]
pub struct GameLoop {
    state: GameState,
    rng: GameRng,
    skill_ai: SkillAiManager,
    last_report: Option<TurnReport>,
}

impl GameLoop {
    /// Generate a floor and put the player, party and monsters on it
    pub fn new(config: &GameConfig) -> Result<Self, ActionError> {
        let mut rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let dungeon = generate(&config.dungeon, &mut rng);
        log::info!(
            "generated {}x{} floor {} with {} rooms (seed {})",
            dungeon.width,
            dungeon.height,
            config.floor,
            dungeon.rooms.len(),
            rng.seed()
        );
        let start = dungeon
            .rooms
            .first()
            .map_or_else(Position::default, |room| room.center());

        let mut state = GameState::new(dungeon, config.floor);
        let player = state.setup_player(start)?;
        for &kind in &config.starting_gear {
            state.equip(player, Item::new(kind))?;
        }
        for &kind in &config.party {
            state.hire(kind)?;
        }
        if config.spawn_monsters {
            let spawned = state.spawn_monsters(&mut rng);
            if config.armed_monsters {
                for id in spawned {
                    state.equip_monster(id, &mut rng)?;
                }
            }
        }

        Ok(Self::from_parts(state, rng))
    }

    /// Drive an already prepared state
    pub fn from_parts(state: GameState, rng: GameRng) -> Self {
        Self {
            state,
            rng,
            skill_ai: SkillAiManager::new(),
            last_report: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Report of the most recently resolved turn
    pub fn last_report(&self) -> Option<&TurnReport> {
        self.last_report.as_ref()
    }

    /// Let the party and monsters queue their actions for this turn
    pub fn plan_ai(&mut self) {
        self.skill_ai.begin_pass();
        plan_party_turn(&mut self.state, &mut self.skill_ai);
        plan_monster_turn(&mut self.state, &mut self.rng);
    }

    /// Run one turn with an optional player intent
    pub fn tick(&mut self, player_action: Option<Action>) -> GameLoopResult {
        if let Some(result) = self.outcome() {
            return result;
        }
        if let (Some(player), Some(action)) = (self.state.player, player_action) {
            self.state.queue_action(player, action);
        }
        self.plan_ai();

        self.last_report = self.state.resolve_turn(&mut self.rng);
        if self.last_report.is_none() {
            self.state.pass_turn();
        }
        self.outcome().unwrap_or(GameLoopResult::Continue)
    }

    fn outcome(&self) -> Option<GameLoopResult> {
        let player = self.state.player_unit()?;
        if !player.is_alive() {
            let turn = self.state.turns.turn();
            return Some(GameLoopResult::PlayerDied(format!(
                "{} fell on turn {turn}",
                player.name
            )));
        }
        if self.state.monsters.is_empty() && self.state.units().any(|u| u.kind.is_monster()) {
            return Some(GameLoopResult::FloorCleared);
        }
        None
    }
}
