//! Fortress (1-4): hard ceiling, lava pits with safety platforms, maze columns
//! and a boss bridge before the goal.

use super::spawn_walkers;
use crate::constants::{STANDARD_LEVEL_WIDTH, UNDERGROUND_COLOR};
use crate::grid::{FlagpoleOptions, Grid, GroundOptions, PlatformOptions};
use crate::level::{LevelData, TileType};

const FIRST_GUARD_ID: u32 = 900;
const GUARD_SPEED: f32 = 0.35;
const BOSS_SPEED: f32 = 0.4;
const BOSS_X: i32 = 180;
const FLAGPOLE_X: i32 = 205;

/// (pit start, pit width)
const LAVA_PITS: [(i32, i32); 5] = [(22, 2), (40, 3), (60, 3), (90, 2), (130, 3)];

const MAZE_COLUMNS: [i32; 3] = [80, 100, 120];

const GUARD_COLUMNS: [f32; 7] = [18.0, 32.0, 58.0, 78.0, 105.0, 135.0, 170.0];

pub fn generate_fortress() -> LevelData {
    let mut grid = Grid::standard();
    let width = STANDARD_LEVEL_WIDTH as i32;

    grid.place_ground(0, width, GroundOptions::default());
    grid.fill_rect(0, 0, width, 2, TileType::HardBlock);

    for (i, (start, pit_width)) in LAVA_PITS.into_iter().enumerate() {
        grid.carve_gap(start, pit_width);
        let height = 2 + (i as i32 % 2);
        grid.place_floating_platform(start - 1, pit_width + 3, height, PlatformOptions::default());
    }

    // hanging columns, open underneath
    for x in MAZE_COLUMNS {
        grid.fill_rect(x, 5, 2, 7, TileType::HardBlock);
    }

    grid.carve_gap(BOSS_X - 5, 3);
    grid.fill_rect(BOSS_X - 5, 10, 15, 1, TileType::Brick);
    grid.place_floating_platform(BOSS_X - 2, 4, 3, PlatformOptions::with_tile(TileType::HardBlock));

    grid.place_flagpole(FLAGPOLE_X, FlagpoleOptions::default());

    let mut entities = spawn_walkers(&grid, &GUARD_COLUMNS, FIRST_GUARD_ID, GUARD_SPEED);
    let boss = [BOSS_X as f32 + 2.0, BOSS_X as f32 - 2.0, BOSS_X as f32];
    entities.extend(spawn_walkers(&grid, &boss, 997, BOSS_SPEED));

    LevelData::new(grid, entities, UNDERGROUND_COLOR)
}
