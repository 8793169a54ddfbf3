//! Underground (1-2): brick ceiling, pipes and rescue platforms over short pits.

use super::spawn_walkers;
use crate::constants::{STANDARD_LEVEL_WIDTH, UNDERGROUND_COLOR};
use crate::grid::{
    FlagpoleOptions, Grid, GroundOptions, PipeOptions, PlatformOptions, StairDirection,
    StairOptions,
};
use crate::level::{LevelData, TileType};

const FIRST_ENEMY_ID: u32 = 200;
const WALK_SPEED: f32 = 0.4;
const FLAGPOLE_X: i32 = 210;

const ENEMY_COLUMNS: [f32; 9] = [25.0, 35.0, 60.0, 75.0, 92.0, 115.0, 145.0, 165.0, 190.0];

pub fn generate_underground() -> LevelData {
    let mut grid = Grid::standard();
    let width = STANDARD_LEVEL_WIDTH as i32;
    let platform = PlatformOptions::default();

    grid.place_ground(0, width, GroundOptions::default());
    grid.fill_rect(0, 0, width, 2, TileType::Brick);

    // entrance pillar hangs from the ceiling, leaving a crawl space over the ground
    grid.fill_rect(6, 2, 1, 8, TileType::Brick);

    grid.place_floating_platform(10, 5, 4, platform);
    grid.set_tile(12, 9, TileType::QuestionBlock);
    grid.place_floating_platform(18, 4, 3, platform);

    grid.place_pipe(20, 2, PipeOptions::default());
    grid.place_pipe(28, 3, PipeOptions::default());

    // broken ceiling
    grid.fill_rect(35, 0, 10, 2, TileType::Air);

    grid.carve_gap(40, 3);
    grid.place_floating_platform(40, 4, 3, platform);
    grid.place_floating_platform(46, 4, 2, platform);

    for step in 0..3 {
        let height = if step % 2 == 1 { 3 } else { 4 };
        grid.place_floating_platform(52 + step * 6, 5, height, platform);
    }
    let coins: Vec<(i32, i32)> = (52..69).step_by(2).map(|x| (x, 11)).collect();
    grid.scatter(TileType::Coin, &coins);

    grid.place_pipe(70, 2, PipeOptions::default());
    grid.place_floating_platform(74, 5, 3, platform);
    grid.place_pipe(80, 4, PipeOptions::default());
    grid.place_floating_platform(86, 4, 4, platform);
    grid.place_pipe(90, 3, PipeOptions::default());

    grid.place_floating_platform(95, 5, 3, platform);
    grid.set_tile(96, 9, TileType::QuestionBlock);

    grid.create_stair(110, 3, StairDirection::Ascending, StairOptions::default());
    grid.create_stair(130, 3, StairDirection::Descending, StairOptions::default());

    grid.carve_gap(140, 2);
    grid.place_floating_platform(138, 4, 2, platform);
    grid.carve_gap(150, 3);
    grid.place_floating_platform(152, 4, 3, platform);

    grid.place_pipe(180, 4, PipeOptions::default());
    grid.place_floating_platform(184, 4, 3, platform);
    grid.place_pipe(200, 2, PipeOptions::default());

    grid.place_flagpole(FLAGPOLE_X, FlagpoleOptions::default());

    let entities = spawn_walkers(&grid, &ENEMY_COLUMNS, FIRST_ENEMY_ID, WALK_SPEED);
    LevelData::new(grid, entities, UNDERGROUND_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_and_crawl_space() {
        let level = generate_underground();
        let grid = level.grid();
        assert_eq!(grid.get(0, 0), Some(TileType::Brick));
        assert_eq!(grid.get(36, 1), Some(TileType::Air));
        assert_eq!(grid.get(6, 9), Some(TileType::Brick));
        for y in 10..=12 {
            assert_eq!(grid.get(6, y), Some(TileType::Air));
        }
    }

    #[test]
    fn test_pits_are_short() {
        let level = generate_underground();
        let pits: Vec<(i32, i32)> = level
            .grid()
            .pit_runs()
            .iter()
            .map(|p| (p.start, p.width))
            .collect();
        assert_eq!(pits, vec![(40, 3), (140, 2), (150, 3)]);
    }

    #[test]
    fn test_enemies_and_goal() {
        let level = generate_underground();
        assert_eq!(level.background_color(), UNDERGROUND_COLOR);
        assert_eq!(level.grid().find_flagpole().map(|f| f.x), Some(FLAGPOLE_X));
        let ids: Vec<u32> = level.entities().iter().map(|e| e.id).collect();
        assert_eq!(ids, (200..209).collect::<Vec<_>>());
        assert!(level.entities().iter().all(|e| e.tile_position().1 == 12));
    }
}
