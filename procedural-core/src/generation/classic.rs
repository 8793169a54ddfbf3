//! Classic overworld (1-1 approximation).

use super::spawn_walkers;
use crate::constants::SKY_COLOR;
use crate::grid::{FlagpoleOptions, Grid, GroundOptions, PipeOptions, StairDirection, StairOptions};
use crate::level::{LevelData, TileType};

const FIRST_ENEMY_ID: u32 = 100;
const WALK_SPEED: f32 = 0.5;
const FLAGPOLE_X: i32 = 198;

const GOOMBA_COLUMNS: [f32; 14] = [
    22.0, 40.0, 51.0, 52.5, 80.0, 82.0, 97.0, 98.5, 114.0, 115.5, 124.0, 125.5, 174.0, 175.5,
];

pub fn generate_classic() -> LevelData {
    let mut grid = Grid::standard();

    // ground with three pits of 2, 3 and 2 columns
    for (start, width) in [(0, 69), (71, 15), (89, 64), (155, 65)] {
        grid.place_ground(start, width, GroundOptions::default());
    }

    scenery(&mut grid);
    blocks(&mut grid);

    for (x, height) in [(28, 2), (38, 3), (46, 4), (57, 4)] {
        grid.place_pipe(x, height, PipeOptions::default());
    }

    let stairs = StairOptions::default();
    grid.create_stair(134, 4, StairDirection::Ascending, stairs);
    grid.create_stair(143, 4, StairDirection::Descending, stairs);
    grid.create_stair(148, 4, StairDirection::Ascending, stairs);
    grid.create_stair(155, 4, StairDirection::Descending, stairs);
    grid.create_stair(181, 8, StairDirection::Ascending, stairs);

    grid.place_flagpole(FLAGPOLE_X, FlagpoleOptions::default());
    grid.set_tile(FLAGPOLE_X + 4, 12, TileType::Castle);

    let entities = spawn_walkers(&grid, &GOOMBA_COLUMNS, FIRST_ENEMY_ID, WALK_SPEED);
    LevelData::new(grid, entities, SKY_COLOR)
}

fn scenery(grid: &mut Grid) {
    let row = |xs: &[i32], y: i32| xs.iter().map(|&x| (x, y)).collect::<Vec<_>>();

    grid.scatter(TileType::Cloud, &row(&[8, 19, 56, 67, 103, 114, 152, 163], 3));
    grid.scatter(TileType::Cloud, &row(&[27, 36, 75, 84, 123, 132, 171, 180], 4));
    grid.scatter(TileType::Hill, &row(&[0, 48, 96, 144, 192], 10));
    grid.scatter(TileType::Hill, &row(&[16, 64, 112, 160], 11));
    grid.scatter(TileType::Bush, &row(&[11, 59, 107, 23, 71, 119, 167], 12));
}

fn blocks(grid: &mut Grid) {
    grid.scatter(
        TileType::QuestionBlock,
        &[(16, 9), (21, 9), (23, 9), (22, 5), (78, 9), (94, 5), (105, 9), (106, 9), (109, 9), (109, 5)],
    );
    grid.scatter(
        TileType::Brick,
        &[(20, 9), (22, 9), (24, 9), (77, 9), (79, 9), (94, 9), (100, 9), (101, 9), (118, 9)],
    );
    grid.set_tile(64, 8, TileType::InvisibleBlock);

    grid.fill_rect(80, 5, 8, 1, TileType::Brick);
    grid.fill_rect(91, 5, 3, 1, TileType::Brick);
    grid.fill_rect(119, 5, 3, 1, TileType::Brick);
    grid.fill_rect(129, 5, 2, 1, TileType::Brick);
    grid.fill_rect(129, 9, 2, 1, TileType::Brick);
}
