//! Geometry placement primitives.
//!
//! Every primitive clamps its parameters against the traversal constants so that a
//! script cannot produce an unjumpable pipe, an unreachable platform or an
//! unclearable gap. All writes go through [`Grid::set_tile`].

use serde::{Deserialize, Serialize};

use super::Grid;
use crate::constants::{
    GROUND_ROW, MAX_HORIZONTAL_GAP_TILES, MAX_JUMP_HEIGHT_TILES, MAX_STEP_HEIGHT_TILES,
};
use crate::level::TileType;

// =====================================================
// Option records
// =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundOptions {
    /// Top row of the strip
    pub row: i32,
    pub thickness: i32,
}

impl Default for GroundOptions {
    fn default() -> Self {
        Self {
            row: GROUND_ROW,
            thickness: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipeOptions {
    /// Ground row the pipe body rests on
    pub ground_row: i32,
}

impl Default for PipeOptions {
    fn default() -> Self {
        Self {
            ground_row: GROUND_ROW,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StairOptions {
    /// Row of the lowest block of every step
    pub bottom_row: i32,
    pub tile: TileType,
}

impl Default for StairOptions {
    fn default() -> Self {
        Self {
            bottom_row: GROUND_ROW - 1,
            tile: TileType::HardBlock,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformOptions {
    pub tile: TileType,
    /// Row that `height_above_ground` is measured from
    pub ground_row: i32,
}

impl Default for PlatformOptions {
    fn default() -> Self {
        Self {
            tile: TileType::Brick,
            ground_row: GROUND_ROW,
        }
    }
}

impl PlatformOptions {
    pub fn with_tile(tile: TileType) -> Self {
        Self {
            tile,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagpoleOptions {
    pub base_row: i32,
    pub pole_height: i32,
    pub base_tile: TileType,
}

impl Default for FlagpoleOptions {
    fn default() -> Self {
        Self {
            base_row: GROUND_ROW - 1,
            pole_height: 9,
            base_tile: TileType::HardBlock,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StairDirection {
    /// Steps climb to the right
    Ascending,
    /// Steps climb to the left
    Descending,
}

impl StairDirection {
    pub fn step(self) -> i32 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
        }
    }
}

// =====================================================
// Primitives
// =====================================================

impl Grid {
    /// `w`×`h` block with its top-left corner at (`x`, `y`)
    /// The rectangle is clipped to the grid before anything is written.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, tile: TileType) {
        let columns = x.max(0)..x.saturating_add(w.max(0)).min(self.width() as i32);
        let rows = y.max(0)..y.saturating_add(h.max(0)).min(self.height() as i32);
        for iy in rows {
            for ix in columns.clone() {
                self.set_tile(ix, iy, tile);
            }
        }
    }

    pub fn place_ground(&mut self, start_x: i32, width: i32, opts: GroundOptions) {
        self.fill_rect(start_x, opts.row, width, opts.thickness, TileType::Ground);
    }

    /// Two-column pipe standing on `ground_row`. Height is clamped to a jumpable range.
    pub fn place_pipe(&mut self, x: i32, height: i32, opts: PipeOptions) {
        let height = height.clamp(1, MAX_JUMP_HEIGHT_TILES);
        let top = opts.ground_row - height;

        self.set_tile(x, top, TileType::PipeTopLeft);
        self.set_tile(x + 1, top, TileType::PipeTopRight);
        for y in top + 1..opts.ground_row {
            self.set_tile(x, y, TileType::PipeLeft);
            self.set_tile(x + 1, y, TileType::PipeRight);
        }
    }

    /// Staircase of `steps` columns; column `i` holds `i + 1` stacked blocks
    pub fn create_stair(&mut self, x: i32, steps: i32, direction: StairDirection, opts: StairOptions) {
        for i in 0..steps.max(0) {
            let column = x + direction.step() * i;
            let height = (i + 1) * MAX_STEP_HEIGHT_TILES;
            for j in 0..height {
                self.set_tile(column, opts.bottom_row - j, opts.tile);
            }
        }
    }

    /// One-row platform `height_above_ground` tiles over the ground row, clamped to the
    /// jump limit. Returns the row the platform occupies.
    pub fn place_floating_platform(
        &mut self,
        x: i32,
        width: i32,
        height_above_ground: i32,
        opts: PlatformOptions,
    ) -> i32 {
        let offset = height_above_ground.clamp(1, MAX_JUMP_HEIGHT_TILES);
        let row = (opts.ground_row - offset).max(0);
        self.fill_rect(x, row, width, 1, opts.tile);
        row
    }

    /// Floating platform carried by a HardBlock trunk down to the bottom row
    pub fn place_mushroom_platform(&mut self, x: i32, width: i32, height_above_ground: i32) -> i32 {
        let row =
            self.place_floating_platform(x, width, height_above_ground, PlatformOptions::default());
        let trunk_x = x + (width / 2 - 1).max(0);
        let trunk_top = row + 1;
        let trunk_height = self.bottom_row() - trunk_top + 1;
        self.fill_rect(trunk_x, trunk_top, width.min(2), trunk_height, TileType::HardBlock);
        row
    }

    /// Clear both ground rows over at most `MAX_HORIZONTAL_GAP_TILES` columns
    pub fn carve_gap(&mut self, start_x: i32, width: i32) {
        let width = width.min(MAX_HORIZONTAL_GAP_TILES);
        let bottom = self.bottom_row();
        self.fill_rect(start_x, bottom - 1, width, 2, TileType::Air);
    }

    /// Base block, pole column and flag on top
    pub fn place_flagpole(&mut self, x: i32, opts: FlagpoleOptions) {
        let pole_height = opts.pole_height.max(1);
        self.set_tile(x, opts.base_row, opts.base_tile);
        self.fill_rect(x, opts.base_row - pole_height, 1, pole_height, TileType::Pole);
        self.set_tile(x, opts.base_row - pole_height - 1, TileType::Flag);
    }

    /// Stamp one tile at each listed (x, y)
    pub fn scatter(&mut self, tile: TileType, cells: &[(i32, i32)]) {
        for &(x, y) in cells {
            self.set_tile(x, y, tile);
        }
    }
}
