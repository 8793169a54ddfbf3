//! Surface reachability graph.
//!
//! Nodes are standing cells: a non-solid cell directly above a solid one. A
//! directed edge joins two standing cells when a player can move from the first
//! to the second in one walk, jump or drop:
//!
//! - the columns are 1 to `MAX_HORIZONTAL_GAP_TILES + 1` apart,
//! - the rise is at most `MAX_JUMP_HEIGHT_TILES` (drops are unlimited),
//! - the source column is clear up to the target row when rising, the target
//!   column is clear down from the source row when dropping, and every column in
//!   between is clear at the higher of the two rows.
//!
//! This is a coarse model of the simulation's physics; it ignores momentum and
//! enemies, and exists to catch layouts whose goal cannot be reached at all.

use std::collections::HashMap;

use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;

use crate::constants::{MAX_HORIZONTAL_GAP_TILES, MAX_JUMP_HEIGHT_TILES};
use crate::grid::Grid;

/// A standing cell (column, row)
pub type Cell = (i32, i32);

/// Column the player spawns in
pub const SPAWN_COLUMN: i32 = 2;

pub struct SurfaceGraph {
    graph: DiGraph<Cell, ()>,
    index: HashMap<Cell, NodeIndex>,
}

impl SurfaceGraph {
    pub fn build(grid: &Grid) -> Self {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();

        for x in 0..grid.width() as i32 {
            for y in 0..grid.bottom_row() {
                if !grid.is_solid_at(x, y) && grid.is_solid_at(x, y + 1) {
                    index.insert((x, y), graph.add_node((x, y)));
                }
            }
        }

        let reach = MAX_HORIZONTAL_GAP_TILES + 1;
        let cells: Vec<(Cell, NodeIndex)> = index.iter().map(|(c, n)| (*c, *n)).collect();
        for &(from, from_idx) in &cells {
            for dx in (-reach..=reach).filter(|dx| *dx != 0) {
                let x2 = from.0 + dx;
                for y2 in 0..grid.bottom_row() {
                    let Some(&to_idx) = index.get(&(x2, y2)) else {
                        continue;
                    };
                    if can_move(grid, from, (x2, y2)) {
                        graph.add_edge(from_idx, to_idx, ());
                    }
                }
            }
        }

        Self { graph, index }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.index.contains_key(&cell)
    }

    /// Whether `to` can be reached from `from` (both must be standing cells)
    pub fn path_exists(&self, from: Cell, to: Cell) -> bool {
        match (self.index.get(&from), self.index.get(&to)) {
            (Some(&a), Some(&b)) => has_path_connecting(&self.graph, a, b, None),
            _ => false,
        }
    }

    /// All standing cells reachable from `start`
    pub fn reachable_from(&self, start: Cell) -> Vec<Cell> {
        let Some(&start_idx) = self.index.get(&start) else {
            return Vec::new();
        };
        let mut dfs = Dfs::new(&self.graph, start_idx);
        let mut cells = Vec::new();
        while let Some(node) = dfs.next(&self.graph) {
            cells.push(self.graph[node]);
        }
        cells
    }

    /// Standing cell on the spawn column's surface, if the spawn column has one
    pub fn spawn_cell(grid: &Grid) -> Option<Cell> {
        if !grid.has_ground(SPAWN_COLUMN) {
            return None;
        }
        Some((SPAWN_COLUMN, grid.ground_level(SPAWN_COLUMN) - 1))
    }

    /// Whether a standing cell in or beside `goal_column` is reachable from spawn
    pub fn goal_reachable(&self, grid: &Grid, goal_column: i32) -> bool {
        let Some(spawn) = Self::spawn_cell(grid) else {
            return false;
        };
        self.reachable_from(spawn)
            .iter()
            .any(|(x, _)| (x - goal_column).abs() <= 1)
    }
}

fn can_move(grid: &Grid, from: Cell, to: Cell) -> bool {
    let (x1, y1) = from;
    let (x2, y2) = to;
    let rise = y1 - y2;
    if rise > MAX_JUMP_HEIGHT_TILES {
        return false;
    }

    let clear = |x: i32, rows: std::ops::RangeInclusive<i32>| rows.into_iter().all(|y| !grid.is_solid_at(x, y));

    if rise > 0 && !clear(x1, y2..=y1) {
        return false;
    }
    if rise < 0 && !clear(x2, y1..=y2) {
        return false;
    }

    let top = y1.min(y2);
    let (lo, hi) = (x1.min(x2), x1.max(x2));
    (lo + 1..hi).all(|x| !grid.is_solid_at(x, top))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::TileType;

    fn flat(width: usize) -> Grid {
        let mut grid = Grid::new(width, 15);
        grid.fill_rect(0, 13, width as i32, 2, TileType::Ground);
        grid
    }

    #[test]
    fn test_flat_ground_fully_connected() {
        let grid = flat(20);
        let graph = SurfaceGraph::build(&grid);
        assert_eq!(graph.node_count(), 20);
        assert!(graph.path_exists((2, 12), (19, 12)));
        assert!(graph.path_exists((19, 12), (0, 12)));
        assert!(graph.goal_reachable(&grid, 19));
    }

    #[test]
    fn test_gap_limit() {
        let mut grid = flat(20);
        grid.fill_rect(8, 13, 3, 2, TileType::Air);
        assert!(SurfaceGraph::build(&grid).path_exists((2, 12), (15, 12)));

        grid.fill_rect(11, 13, 1, 2, TileType::Air);
        assert!(!SurfaceGraph::build(&grid).path_exists((2, 12), (15, 12)));
    }

    #[test]
    fn test_wall_too_tall() {
        let mut grid = flat(20);
        grid.fill_rect(10, 8, 1, 5, TileType::HardBlock);
        let graph = SurfaceGraph::build(&grid);
        // five-block wall: top standing cell is five rows above the ground surface
        assert!(!graph.path_exists((9, 12), (10, 7)));
        assert!(!graph.goal_reachable(&grid, 18));

        let mut grid = flat(20);
        grid.fill_rect(10, 9, 1, 4, TileType::HardBlock);
        assert!(SurfaceGraph::build(&grid).goal_reachable(&grid, 18));
    }

    #[test]
    fn test_overhang_blocks_jump() {
        let mut grid = flat(20);
        grid.fill_rect(5, 10, 4, 1, TileType::Brick);
        // jumping up from under the brick row is blocked
        assert!(!can_move(&grid, (7, 12), (8, 9)));
        // but the platform can be reached from beside its left edge
        assert!(can_move(&grid, (4, 12), (5, 9)));
        assert!(SurfaceGraph::build(&grid).path_exists((7, 12), (8, 9)));
    }

    #[test]
    fn test_missing_spawn_surface() {
        let grid = Grid::new(10, 15);
        let graph = SurfaceGraph::build(&grid);
        assert_eq!(graph.node_count(), 0);
        assert!(!graph.goal_reachable(&grid, 5));
        assert!(graph.reachable_from((0, 0)).is_empty());
    }
}
