//! Playability repair for untrusted levels.
//!
//! [`repair_level`] turns any [`Candidate`] into a [`LevelData`] that satisfies the
//! structural invariants: safe spawn columns, a grounded flagpole near the right
//! edge, no enemy inside a solid tile and at least one enemy whenever the terrain
//! allows it. The pass is best effort and never fails; every read and write is
//! clamped to the grid.
//!
//! Terrain is fixed first (shape, spawn, goal) so that the enemy checks run against
//! the final grid. That makes the pass idempotent: repairing a repaired level
//! reproduces it exactly.

pub mod candidate;

pub use candidate::{Candidate, CandidateError, EnemyHint};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{px_to_tile, tile_to_px, LEVEL_HEIGHT, REMOTE_LEVEL_WIDTH, SKY_COLOR};
use crate::grid::Grid;
use crate::level::{Entity, LevelData, TileType, Vec2};
use crate::logging::TimingSpan;

/// Horizontal speed of every repaired enemy (px/frame)
pub const REPAIRED_ENEMY_SPEED: f32 = 0.5;

/// Rows the goal stamp occupies: flag, two pole tiles, base
pub const GOAL_STAMP_ROWS: usize = 4;

/// Hard ceilings applied to configured options
const GRID_WIDTH_LIMIT: usize = 4096;
const GRID_HEIGHT_LIMIT: usize = 256;
const COLUMN_OPTION_LIMIT: i32 = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairOptions {
    pub fallback_width: usize,
    pub fallback_height: usize,
    /// Leading columns whose two bottom rows are forced to Ground
    pub spawn_columns: i32,
    /// Columns to the right searched for a safe enemy spot
    pub probe_window: i32,
    pub default_enemy_count: usize,
    /// Flagpole column, counted from the right edge
    pub goal_offset: i32,
    pub enemy_id_base: u32,
    pub max_width: usize,
    pub max_height: usize,
    pub background_color: String,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            fallback_width: REMOTE_LEVEL_WIDTH,
            fallback_height: LEVEL_HEIGHT,
            spawn_columns: 5,
            probe_window: 3,
            default_enemy_count: 20,
            goal_offset: 5,
            enemy_id_base: 1000,
            max_width: 1024,
            max_height: 64,
            background_color: SKY_COLOR.to_string(),
        }
    }
}

impl RepairOptions {
    /// Copy with every value clamped to a range the repair pass can honor.
    ///
    /// Options usually come from a config file, so nothing here is trusted.
    pub fn sanitized(&self) -> Self {
        let spawn_columns = self.spawn_columns.clamp(0, COLUMN_OPTION_LIMIT);
        let probe_window = self.probe_window.clamp(0, COLUMN_OPTION_LIMIT);
        let goal_offset = self.goal_offset.clamp(1, COLUMN_OPTION_LIMIT);
        let min_width = (spawn_columns + goal_offset + 1) as usize;

        let max_width = self.max_width.clamp(min_width, GRID_WIDTH_LIMIT);
        let max_height = self.max_height.clamp(GOAL_STAMP_ROWS, GRID_HEIGHT_LIMIT);

        Self {
            fallback_width: self.fallback_width.clamp(min_width, max_width),
            fallback_height: self.fallback_height.clamp(GOAL_STAMP_ROWS, max_height),
            spawn_columns,
            probe_window,
            default_enemy_count: self.default_enemy_count.min(max_width),
            goal_offset,
            enemy_id_base: self.enemy_id_base,
            max_width,
            max_height,
            background_color: self.background_color.clone(),
        }
    }

    /// Narrowest grid that fits the spawn columns and the goal stamp side by side
    pub fn min_width(&self) -> usize {
        (self.spawn_columns.max(0) + self.goal_offset.max(1) + 1) as usize
    }

    /// Undersized candidates are padded with Air rows on top to this height
    pub fn min_height(&self) -> usize {
        self.fallback_height.max(GOAL_STAMP_ROWS)
    }
}

/// What the repair pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepairReport {
    pub used_fallback: bool,
    pub unknown_cells: usize,
    pub hints: usize,
    pub relocated: usize,
    /// Hints left in an unsafe column because no probe succeeded
    pub unresolved: usize,
    pub dropped_embedded: usize,
    pub synthesized: usize,
}

pub fn repair_level(candidate: Candidate, opts: &RepairOptions) -> LevelData {
    repair_level_with_report(candidate, opts).0
}

pub fn repair_level_with_report(candidate: Candidate, opts: &RepairOptions) -> (LevelData, RepairReport) {
    let _span = TimingSpan::new("repair_level");
    let opts = &opts.sanitized();
    let mut report = RepairReport::default();

    let (grid, hints) = match candidate {
        Candidate::Layout { rows, enemy_hints } => (normalize(&rows, opts, &mut report), enemy_hints),
        Candidate::Shapeless { enemy_hints } => (None, enemy_hints),
    };
    let mut grid = grid.unwrap_or_else(|| {
        warn!("Candidate has no usable grid, substituting fallback layout");
        report.used_fallback = true;
        fallback_grid(opts)
    });

    enforce_spawn_safety(&mut grid, opts.spawn_columns);
    stamp_goal(&mut grid, opts.goal_offset);

    report.hints = hints.len();
    let mut positions: Vec<Vec2> = hints
        .iter()
        .map(|hint| place_enemy(&grid, hint, opts.probe_window, &mut report))
        .collect();

    let before = positions.len();
    positions.retain(|pos| !grid.is_solid_at(px_to_tile(pos.x), px_to_tile(pos.y)));
    report.dropped_embedded = before - positions.len();
    if report.dropped_embedded > 0 {
        warn!(dropped = report.dropped_embedded, "Dropped enemies embedded in solid tiles");
    }

    if positions.is_empty() {
        positions = default_enemies(&grid, opts.default_enemy_count);
        report.synthesized = positions.len();
        warn!(synthesized = report.synthesized, "No enemies survived repair, synthesized defaults");
    }

    let entities = positions
        .into_iter()
        .zip(opts.enemy_id_base..)
        .map(|(pos, id)| Entity::walker(id, pos, REPAIRED_ENEMY_SPEED))
        .collect();

    debug!(
        width = grid.width(),
        height = grid.height(),
        hints = report.hints,
        relocated = report.relocated,
        unresolved = report.unresolved,
        "Repaired level"
    );

    (LevelData::new(grid, entities, opts.background_color.clone()), report)
}

/// Rectangular grid from raw rows, or `None` when the shape is unusable.
///
/// Undersized grids are padded with Air: rows are added on top so the
/// candidate's floor stays the bottom row, and columns on the right so the
/// spawn and goal stamps never overlap.
fn normalize(rows: &[Vec<i64>], opts: &RepairOptions, report: &mut RepairReport) -> Option<Grid> {
    let width = rows.first().map_or(0, Vec::len).min(opts.max_width);
    let height = rows.len().min(opts.max_height);
    if width == 0 || height == 0 {
        return None;
    }

    let padded_width = width.max(opts.min_width());
    let padded_height = height.max(opts.min_height());
    if (padded_width, padded_height) != (width, height) {
        debug!(width, height, padded_width, padded_height, "Padded undersized candidate");
    }

    let top = (padded_height - height) as i32;
    let mut grid = Grid::new(padded_width, padded_height);
    for (y, row) in rows.iter().take(height).enumerate() {
        for (x, &code) in row.iter().take(width).enumerate() {
            let tile = TileType::from_code(code).unwrap_or_else(|| {
                report.unknown_cells += 1;
                TileType::Air
            });
            grid.set_tile(x as i32, top + y as i32, tile);
        }
    }
    if report.unknown_cells > 0 {
        debug!(count = report.unknown_cells, "Replaced unknown tile codes with Air");
    }
    Some(grid)
}

/// Bottom two rows Ground, everything else Air
pub fn fallback_grid(opts: &RepairOptions) -> Grid {
    let opts = opts.sanitized();
    let mut grid = Grid::new(opts.fallback_width, opts.fallback_height);
    let bottom = grid.bottom_row();
    grid.fill_rect(0, bottom - 1, grid.width() as i32, 2, TileType::Ground);
    grid
}

fn enforce_spawn_safety(grid: &mut Grid, spawn_columns: i32) {
    let bottom = grid.bottom_row();
    grid.fill_rect(0, bottom - 1, spawn_columns, 2, TileType::Ground);
}

/// Ground pad plus flagpole at `width - goal_offset`, overwriting whatever is there
fn stamp_goal(grid: &mut Grid, goal_offset: i32) {
    let gx = (grid.width() as i32 - goal_offset).max(0);
    let h = grid.height() as i32;

    grid.fill_rect(gx - 3, h - 2, 6, 2, TileType::Ground);
    grid.set_tile(gx, h - 1, TileType::Ground);
    grid.fill_rect(gx, h - 3, 1, 2, TileType::Pole);
    grid.set_tile(gx, h - 4, TileType::Flag);
}

fn place_enemy(grid: &Grid, hint: &EnemyHint, probe_window: i32, report: &mut RepairReport) -> Vec2 {
    let raw_x = if hint.x.is_finite() { hint.x as f32 } else { 0.0 };
    let column = grid.clamp_column(px_to_tile(raw_x));

    let x = if grid.is_standable(column) {
        let max_px = tile_to_px(grid.clamp_column(i32::MAX));
        raw_x.clamp(0.0, max_px)
    } else {
        match (1..=probe_window)
            .map(|offset| grid.clamp_column(column.saturating_add(offset)))
            .find(|&c| grid.is_standable(c))
        {
            Some(safe) => {
                report.relocated += 1;
                debug!(from = column, to = safe, "Relocated enemy to standable column");
                tile_to_px(safe)
            }
            None => {
                report.unresolved += 1;
                tile_to_px(column)
            }
        }
    };

    let row = grid.clamp_row(grid.ground_level(px_to_tile(x)) - 1);
    Vec2::new(x, tile_to_px(row))
}

/// Evenly spaced enemies on standable columns
fn default_enemies(grid: &Grid, count: usize) -> Vec<Vec2> {
    let width = grid.width();
    (0..count)
        .map(|i| ((i + 1) * width / (count + 1)) as i32)
        .filter(|&x| grid.is_standable(x))
        .map(|x| {
            let row = grid.clamp_row(grid.ground_level(x) - 1);
            Vec2::new(tile_to_px(x), tile_to_px(row))
        })
        .collect()
}
