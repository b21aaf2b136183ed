//! Headless crawl-tactics simulation
//!
//! Generates a floor, lets a simple autopilot drive the player and runs
//! turns until the player dies, the floor is cleared or the turn limit
//! is reached. Prints a JSON summary on stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use serde_json::json;

use ct_core::ai::{approach, visible_hostiles};
use ct_core::equipment::ItemKind;
use ct_core::skill::{SkillId, SkillSlot};
use ct_core::turn::Action;
use ct_core::unit::UnitKind;
use ct_core::world::GameConfig;
use ct_core::{GameLoop, GameLoopResult, GameState};

/// Run a headless dungeon fight
#[derive(Parser, Debug)]
#[command(name = "ct-sim")]
#[command(author, version, about = "Simulate a crawl-tactics floor", long_about = None)]
struct Args {
    /// RNG seed (random when omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Maximum number of turns to simulate
    #[arg(short = 't', long = "turns", default_value_t = 200)]
    turns: u32,

    /// JSON game configuration file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Hire a mercenary at start (sentinel, medic, gunner); repeatable
    #[arg(long = "hire")]
    hire: Vec<UnitKind>,

    /// Start the player wearing an item (short-axe, plate-armor); repeatable
    #[arg(long = "gear")]
    gear: Vec<ItemKind>,

    /// Spawn monsters without weapons and armor
    #[arg(long = "unarmed-monsters")]
    unarmed_monsters: bool,

    /// Teach the player a skill and bind it to the next free slot; repeatable
    #[arg(long = "learn")]
    learn: Vec<SkillId>,

    /// Print the final map
    #[arg(long = "ascii")]
    ascii: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = match &args.config {
        Some(path) => GameConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.party.extend(args.hire.iter().copied());
    config.starting_gear.extend(args.gear.iter().copied());
    if args.unarmed_monsters {
        config.armed_monsters = false;
    }
    config.validate().context("invalid configuration")?;

    let mut game = GameLoop::new(&config).context("setting up the floor")?;
    learn_skills(game.state_mut(), &args.learn)?;

    let mut result = GameLoopResult::Continue;
    for _ in 0..args.turns {
        let action = autopilot(game.state());
        result = game.tick(action);
        if let Some(report) = game.last_report() {
            debug!(
                "turn {}: {} resolved, {} failed, {} died",
                report.turn,
                report.resolved.len(),
                report.failed.len(),
                report.deaths.len()
            );
        }
        if result != GameLoopResult::Continue {
            break;
        }
    }
    info!("simulation ended: {result:?}");

    let state = game.state();
    if args.ascii {
        println!("{}", render(state));
    }
    println!("{}", serde_json::to_string_pretty(&summary(state, &result))?);
    Ok(())
}

fn learn_skills(state: &mut GameState, skills: &[SkillId]) -> Result<()> {
    let mut slots = [SkillSlot::Q, SkillSlot::W].into_iter();
    for &skill in skills {
        state
            .learn_skill(skill)
            .with_context(|| format!("learning {skill}"))?;
        if let Some(slot) = slots.next() {
            state.assign_to_slot(slot, skill)?;
        }
    }
    Ok(())
}

/// Use a bound skill if one is ready, strike what is in reach, else walk
/// toward the nearest monster
fn autopilot(state: &GameState) -> Option<Action> {
    let player = state.player_unit()?;
    for slot in [SkillSlot::Q, SkillSlot::W] {
        if let Some(action @ Action::Skill { skill, .. }) = state.translate_slot(slot)
            && state.can_use_skill(player.id, skill)
        {
            return Some(action);
        }
    }

    let here = player.position();
    let seen = visible_hostiles(state, player.id);
    if let Some(target) = seen
        .iter()
        .find(|u| u.position().manhattan(here) <= player.stats.attack_range)
    {
        return Some(Action::Attack { target: target.id });
    }
    let goal = seen.first().copied().or_else(|| {
        state
            .monsters
            .iter()
            .filter_map(|&id| state.living(id))
            .min_by_key(|u| u.position().manhattan(here))
    })?;
    approach(state, player.id, goal.position())
}

fn render(state: &GameState) -> String {
    let mut rows: Vec<Vec<char>> = state
        .dungeon
        .to_ascii()
        .lines()
        .map(|line| line.chars().collect())
        .collect();
    for unit in state.living_units() {
        let pos = unit.position();
        let glyph = if Some(unit.id) == state.player {
            '@'
        } else if unit.kind.is_monster() {
            'M'
        } else {
            'A'
        };
        if let Some(cell) = rows
            .get_mut(pos.y as usize)
            .and_then(|row| row.get_mut(pos.x as usize))
        {
            *cell = glyph;
        }
    }
    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn summary(state: &GameState, result: &GameLoopResult) -> serde_json::Value {
    let party: Vec<_> = state
        .party
        .iter()
        .filter_map(|&id| state.unit(id))
        .map(|u| u.snapshot())
        .collect();
    let history: Vec<&String> = state.log.history().collect();
    let recent = &history[history.len().saturating_sub(10)..];
    json!({
        "result": format!("{result:?}"),
        "turn": state.turns.turn(),
        "player": state.player_unit().map(|u| u.snapshot()),
        "party": party,
        "monsters_remaining": state.monsters.len(),
        "allied_resources": state.attributes.allies.snapshot(),
        "recent_messages": recent,
    })
}
