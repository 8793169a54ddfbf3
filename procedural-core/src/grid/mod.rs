//! Bounds-checked level grid.
//!
//! All reads and writes go through [`Grid`]; out-of-range reads return `None` and
//! out-of-range writes are dropped, so no caller can corrupt storage or panic on a
//! bad coordinate. Coordinates are signed because scripts routinely compute
//! offsets such as `start - 1`.

pub mod primitives;

pub use primitives::{
    FlagpoleOptions, GroundOptions, PipeOptions, PlatformOptions, StairDirection, StairOptions,
};

use serde::{Serialize, Serializer};

use crate::constants::{LEVEL_HEIGHT, STANDARD_LEVEL_WIDTH};
use crate::level::TileType;

/// Row-major tile matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<TileType>,
}

/// Maximal run of columns whose two bottom rows hold no solid tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitRun {
    pub start: i32,
    pub width: i32,
}

/// Goal structure: a flag tile on top of a pole that rests on a solid tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flagpole {
    pub x: i32,
    pub flag_row: i32,
    pub base_row: i32,
}

impl Grid {
    /// All-Air grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![TileType::Air; width * height],
        }
    }

    /// Empty grid with the dimensions of the hand-authored archetypes
    pub fn standard() -> Self {
        Self::new(STANDARD_LEVEL_WIDTH, LEVEL_HEIGHT)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bottom_row(&self) -> i32 {
        self.height as i32 - 1
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<TileType> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Tile at a cell, treating everything outside the grid as Air
    pub fn tile_or_air(&self, x: i32, y: i32) -> TileType {
        self.get(x, y).unwrap_or(TileType::Air)
    }

    pub fn is_solid_at(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(TileType::is_solid)
    }

    /// Single-cell write; silently ignored outside the grid
    pub fn set_tile(&mut self, x: i32, y: i32, tile: TileType) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = tile;
        }
    }

    pub fn clamp_column(&self, x: i32) -> i32 {
        x.clamp(0, (self.width as i32 - 1).max(0))
    }

    pub fn clamp_row(&self, y: i32) -> i32 {
        y.clamp(0, self.bottom_row().max(0))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TileType]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn count(&self, tile: TileType) -> usize {
        self.cells.iter().filter(|t| **t == tile).count()
    }

    /// Ground row of a column (findGroundLevel).
    ///
    /// Scans upward from the bottom row to the first solid tile, then climbs the
    /// contiguous solid run above it and returns the run's topmost row: the surface
    /// something standing in this column rests on. Columns without any solid tile
    /// report the bottom row. `x` is clamped into the grid.
    pub fn ground_level(&self, x: i32) -> i32 {
        let x = self.clamp_column(x);
        let bottom = self.bottom_row();

        let Some(first) = (0..=bottom).rev().find(|&y| self.is_solid_at(x, y)) else {
            return bottom;
        };

        let mut top = first;
        while top > 0 && self.is_solid_at(x, top - 1) {
            top -= 1;
        }
        top
    }

    pub fn has_ground(&self, x: i32) -> bool {
        let x = self.clamp_column(x);
        (0..self.height as i32).any(|y| self.is_solid_at(x, y))
    }

    /// Air directly above a real ground row
    pub fn is_standable(&self, x: i32) -> bool {
        let x = self.clamp_column(x);
        self.has_ground(x) && self.get(x, self.ground_level(x) - 1) == Some(TileType::Air)
    }

    pub fn is_pit_column(&self, x: i32) -> bool {
        let bottom = self.bottom_row();
        !self.is_solid_at(x, bottom) && !self.is_solid_at(x, bottom - 1)
    }

    pub fn pit_runs(&self) -> Vec<PitRun> {
        let mut runs = Vec::new();
        let mut current: Option<PitRun> = None;

        for x in 0..self.width as i32 {
            if self.is_pit_column(x) {
                match current.as_mut() {
                    Some(run) => run.width += 1,
                    None => current = Some(PitRun { start: x, width: 1 }),
                }
            } else if let Some(run) = current.take() {
                runs.push(run);
            }
        }
        runs.extend(current);
        runs
    }

    pub fn widest_pit(&self) -> i32 {
        self.pit_runs().iter().map(|r| r.width).max().unwrap_or(0)
    }

    /// Rightmost flag that tops a pole standing on a solid tile
    pub fn find_flagpole(&self) -> Option<Flagpole> {
        for x in (0..self.width as i32).rev() {
            for flag_row in 0..self.height as i32 {
                if self.get(x, flag_row) != Some(TileType::Flag) {
                    continue;
                }
                let mut y = flag_row + 1;
                while self.get(x, y) == Some(TileType::Pole) {
                    y += 1;
                }
                if y > flag_row + 1 && self.is_solid_at(x, y) {
                    return Some(Flagpole {
                        x,
                        flag_row,
                        base_row: y,
                    });
                }
            }
        }
        None
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(
            self.rows()
                .map(|row| row.iter().map(|t| t.code()).collect::<Vec<u8>>()),
        )
    }
}
