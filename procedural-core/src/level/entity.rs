//! Entity records handed to the simulation layer.
//!
//! Positions are computed from tile coordinates at placement time and are not kept
//! in sync with the grid afterwards; the simulation owns the entity lifecycle.

use serde::Serialize;

use crate::constants::{px_to_tile, tile_to_px, TILE_SIZE};

/// Pixel-space 2D vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Player,
    Goomba,
    Koopa,
    Mushroom,
    Flower,
    Fireball,
    Particle,
    Flag,
}

/// Horizontal facing, serialized as -1 / 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "i8")]
pub enum Facing {
    Left,
    Right,
}

impl From<Facing> for i8 {
    fn from(facing: Facing) -> Self {
        match facing {
            Facing::Left => -1,
            Facing::Right => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub dead: bool,
    pub grounded: bool,
    pub direction: Facing,
}

impl Entity {
    /// Ground walker (Goomba) at a pixel position, walking left at `speed` px/frame
    pub fn walker(id: u32, pos: Vec2, speed: f32) -> Self {
        Self {
            id,
            kind: EntityKind::Goomba,
            pos,
            vel: Vec2::new(-speed, 0.0),
            width: TILE_SIZE,
            height: TILE_SIZE,
            dead: false,
            grounded: false,
            direction: Facing::Left,
        }
    }

    /// Ground walker standing in tile `row`; `column` may be fractional (half-tile offsets)
    pub fn walker_on_tile(id: u32, column: f32, row: i32, speed: f32) -> Self {
        Self::walker(id, Vec2::new(column * TILE_SIZE, tile_to_px(row)), speed)
    }

    /// Tile cell containing the entity's top-left corner
    pub fn tile_position(&self) -> (i32, i32) {
        (px_to_tile(self.pos.x), px_to_tile(self.pos.y))
    }
}
