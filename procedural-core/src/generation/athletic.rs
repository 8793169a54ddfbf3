//! Athletic (1-3): mushroom platforms over gaps, floating bridges, coin rows.

use super::spawn_walkers;
use crate::constants::{SKY_COLOR, STANDARD_LEVEL_WIDTH};
use crate::grid::{
    FlagpoleOptions, Grid, GroundOptions, PlatformOptions, StairDirection, StairOptions,
};
use crate::level::{LevelData, TileType};

const FIRST_ENEMY_ID: u32 = 300;
const WALK_SPEED: f32 = 0.4;
const FLAGPOLE_X: i32 = 210;
const MUSHROOM_WIDTH: i32 = 5;

/// (gap start, gap width, mushroom height above ground)
const GAPS: [(i32, i32, i32); 8] = [
    (18, 3, 3),
    (36, 2, 4),
    (54, 3, 3),
    (72, 3, 4),
    (96, 2, 3),
    (118, 3, 4),
    (140, 3, 3),
    (160, 2, 4),
];

/// (x, width, height above ground)
const BRIDGES: [(i32, i32, i32); 8] = [
    (30, 6, 3),
    (45, 5, 4),
    (62, 7, 3),
    (85, 6, 4),
    (108, 6, 3),
    (132, 7, 4),
    (155, 5, 3),
    (175, 6, 3),
];

const ENEMY_COLUMNS: [f32; 8] = [12.0, 28.0, 44.0, 70.0, 95.0, 122.0, 150.0, 185.0];

pub fn generate_athletic() -> LevelData {
    let mut grid = Grid::standard();

    grid.place_ground(0, STANDARD_LEVEL_WIDTH as i32, GroundOptions::default());

    // each gap gets a mushroom whose cap starts one column before it
    for (start, width, height) in GAPS {
        grid.carve_gap(start, width);
        grid.place_mushroom_platform(start - 1, MUSHROOM_WIDTH, height);
    }

    for (x, width, height) in BRIDGES {
        grid.place_floating_platform(x, width, height, PlatformOptions::default());
    }

    let coins: Vec<(i32, i32)> = (30..180).step_by(10).map(|x| (x, 8)).collect();
    grid.scatter(TileType::Coin, &coins);

    grid.create_stair(190, 6, StairDirection::Ascending, StairOptions::default());
    grid.place_flagpole(FLAGPOLE_X, FlagpoleOptions::default());
    grid.set_tile(FLAGPOLE_X + 4, 12, TileType::Castle);

    let entities = spawn_walkers(&grid, &ENEMY_COLUMNS, FIRST_ENEMY_ID, WALK_SPEED);
    LevelData::new(grid, entities, SKY_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{GROUND_ROW, MAX_HORIZONTAL_GAP_TILES, MAX_JUMP_HEIGHT_TILES};

    #[test]
    fn test_mushroom_trunks_fill_narrow_gaps() {
        let level = generate_athletic();
        let grid = level.grid();
        // 2-wide gaps are fully covered by the trunk; 3-wide gaps keep one open column
        let pits: Vec<i32> = grid.pit_runs().iter().map(|p| p.start).collect();
        assert_eq!(pits, vec![20, 56, 74, 120, 142]);
        assert!(grid.widest_pit() <= MAX_HORIZONTAL_GAP_TILES);
    }

    #[test]
    fn test_platforms_within_jump_height() {
        let level = generate_athletic();
        for (y, row) in level.grid().rows().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                if *tile == TileType::Brick {
                    assert!(
                        y as i32 >= GROUND_ROW - MAX_JUMP_HEIGHT_TILES,
                        "platform too high at ({x}, {y})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_goal_and_enemies() {
        let level = generate_athletic();
        assert_eq!(level.grid().find_flagpole().map(|f| f.x), Some(FLAGPOLE_X));
        assert_eq!(level.entities().len(), ENEMY_COLUMNS.len());
        assert_eq!(level.entities()[7].id, 307);
    }
}
