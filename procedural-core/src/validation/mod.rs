//! Playability audit.
//!
//! Checks a finished level against the structural invariants the repair pass
//! guarantees, plus the traversal properties the deterministic archetypes
//! guarantee by construction (pit widths and goal reachability).

pub mod reachability;

pub use reachability::SurfaceGraph;

use serde::Serialize;
use tracing::debug;

use crate::constants::MAX_HORIZONTAL_GAP_TILES;
use crate::level::LevelData;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayabilityReport {
    /// Leading columns have solid tiles in both bottom rows
    pub spawn_safe: bool,
    pub goal_column: Option<i32>,
    /// Ids of enemies whose tile is solid
    pub embedded_enemies: Vec<u32>,
    pub widest_pit: i32,
    pub enemy_count: usize,
    pub goal_reachable: bool,
}

impl PlayabilityReport {
    pub fn inspect(level: &LevelData, spawn_columns: i32) -> Self {
        let grid = level.grid();
        let bottom = grid.bottom_row();

        let spawn_safe = grid.width() > 0
            && (0..spawn_columns.min(grid.width() as i32))
                .all(|x| grid.is_solid_at(x, bottom) && grid.is_solid_at(x, bottom - 1));

        let goal_column = grid.find_flagpole().map(|pole| pole.x);

        let embedded_enemies = level
            .entities()
            .iter()
            .filter(|e| {
                let (x, y) = e.tile_position();
                grid.is_solid_at(x, y)
            })
            .map(|e| e.id)
            .collect();

        let goal_reachable = goal_column
            .is_some_and(|column| SurfaceGraph::build(grid).goal_reachable(grid, column));

        let report = Self {
            spawn_safe,
            goal_column,
            embedded_enemies,
            widest_pit: grid.widest_pit(),
            enemy_count: level.entities().len(),
            goal_reachable,
        };
        debug!(?report, "Playability audit");
        report
    }

    /// The invariants every repaired level satisfies
    pub fn structurally_valid(&self) -> bool {
        self.spawn_safe && self.goal_column.is_some() && self.embedded_enemies.is_empty()
    }

    pub fn is_playable(&self) -> bool {
        self.structurally_valid()
            && self.goal_reachable
            && self.widest_pit <= MAX_HORIZONTAL_GAP_TILES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GENERATOR_SPAWN_COLUMNS;
    use crate::generation::LevelArchetype;
    use crate::grid::Grid;
    use crate::level::{Entity, TileType};

    #[test]
    fn test_archetypes_are_playable() {
        for archetype in LevelArchetype::ALL {
            let report = PlayabilityReport::inspect(&archetype.generate(), GENERATOR_SPAWN_COLUMNS);
            assert!(report.is_playable(), "{archetype}: {report:?}");
            assert!(report.enemy_count > 0);
        }
    }

    #[test]
    fn test_detects_embedded_enemy_and_missing_goal() {
        let mut grid = Grid::new(12, 15);
        grid.fill_rect(0, 13, 12, 2, TileType::Ground);
        let level = LevelData::new(grid, vec![Entity::walker_on_tile(7, 3.0, 13, 0.5)], "#000000");
        let report = PlayabilityReport::inspect(&level, 5);
        assert!(report.spawn_safe);
        assert_eq!(report.embedded_enemies, vec![7]);
        assert_eq!(report.goal_column, None);
        assert!(!report.goal_reachable);
        assert!(!report.structurally_valid());
    }

    #[test]
    fn test_unsafe_spawn() {
        let mut grid = Grid::new(12, 15);
        grid.fill_rect(0, 13, 12, 2, TileType::Ground);
        grid.set_tile(3, 14, TileType::Air);
        let level = LevelData::new(grid, Vec::new(), "#000000");
        assert!(!PlayabilityReport::inspect(&level, 5).spawn_safe);
        let level_ok = PlayabilityReport::inspect(&level, 3);
        assert!(level_ok.spawn_safe);
    }
}
