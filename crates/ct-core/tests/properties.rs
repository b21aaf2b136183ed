use std::collections::{HashSet, VecDeque};

use proptest::prelude::*;

use ct_core::dungeon::{Dungeon, Position, generate};
use ct_core::grid::{Occupancy, find_path};
use ct_core::world::{DungeonConfig, GameConfig};
use ct_core::{GameLoop, GameRng};

fn flood_fill(dungeon: &Dungeon, start: Position) -> usize {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        for next in pos.neighbors() {
            if dungeon.is_walkable(next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.len()
}

fn open_room(width: i32, height: i32) -> Dungeon {
    let rows: Vec<String> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect()
        })
        .collect();
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    Dungeon::from_ascii(&refs)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn generated_floors_are_connected(seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        let dungeon = generate(&DungeonConfig::default(), &mut rng);
        let floor = dungeon.floor_tiles();
        prop_assume!(dungeon.rooms.len() >= 2);
        // stairs are not walkable, so they are left out of the fill
        prop_assert_eq!(flood_fill(&dungeon, floor[0]), floor.len());
    }

    #[test]
    fn open_grid_path_is_manhattan(
        (sx, sy, gx, gy) in (1..19i32, 1..11i32, 1..19i32, 1..11i32)
    ) {
        let dungeon = open_room(20, 12);
        let start = Position::new(sx, sy);
        let goal = Position::new(gx, gy);
        let path = find_path(&dungeon, &Occupancy::new(), start, goal);
        prop_assert_eq!(path.len() as i32, start.manhattan(goal) + 1);
        prop_assert_eq!(path.first(), Some(&start));
        prop_assert_eq!(path.last(), Some(&goal));
    }

    #[test]
    fn occupancy_stays_consistent(seed in any::<u64>()) {
        let config = GameConfig {
            seed: Some(seed),
            party: vec![ct_core::unit::UnitKind::Gunner],
            ..GameConfig::default()
        };
        let mut game = GameLoop::new(&config).unwrap();
        for _ in 0..15 {
            game.tick(None);
            let state = game.state();
            prop_assert!(state.occupancy().is_consistent());
            for unit in state.living_units() {
                prop_assert_eq!(state.occupancy().unit_at(unit.position()), Some(unit.id));
            }
            for unit in state.units().filter(|u| !u.is_alive()) {
                prop_assert_eq!(state.occupancy().position_of(unit.id), None);
            }
        }
    }

    #[test]
    fn health_and_mana_stay_in_bounds(seed in any::<u64>()) {
        let mut game = GameLoop::new(&GameConfig { seed: Some(seed), ..GameConfig::default() }).unwrap();
        for _ in 0..15 {
            game.tick(None);
            for unit in game.state().units() {
                prop_assert!(unit.health() >= 0 && unit.health() <= unit.max_health());
                prop_assert!(unit.mana() >= 0 && unit.mana() <= unit.max_mana());
            }
        }
    }
}
