//! Centralized level constants.
//!
//! The traversal limits are consulted by every placement primitive, every
//! deterministic generator and the reachability audit, so a single tuning change
//! propagates everywhere. Per-archetype coordinates stay in their generator scripts.

// =====================================================
// Traversal constraints
// =====================================================

/// Highest platform (in tiles above the ground row) a player can reach from the ground
pub const MAX_JUMP_HEIGHT_TILES: i32 = 4;

/// Widest pit (in tiles) a running jump can clear
pub const MAX_HORIZONTAL_GAP_TILES: i32 = 3;

/// Rise of a single walkable step (stairs)
pub const MAX_STEP_HEIGHT_TILES: i32 = 1;

// =====================================================
// Grid geometry
// =====================================================

/// Edge length of one tile in pixels
pub const TILE_SIZE: f32 = 16.0;

/// Rows in every level grid
pub const LEVEL_HEIGHT: usize = 15;

/// Top row of the two-row ground strip (`LEVEL_HEIGHT - 2`)
pub const GROUND_ROW: i32 = LEVEL_HEIGHT as i32 - 2;

/// Width of the hand-authored archetype levels
pub const STANDARD_LEVEL_WIDTH: usize = 220;

/// Width requested from the external generator (and of the fallback grid)
pub const REMOTE_LEVEL_WIDTH: usize = 150;

/// Columns guaranteed to be solid ground in the deterministic archetypes
pub const GENERATOR_SPAWN_COLUMNS: i32 = 10;

// =====================================================
// Presentation
// =====================================================

/// Overworld background
pub const SKY_COLOR: &str = "#5C94FC";

/// Underground and castle background
pub const UNDERGROUND_COLOR: &str = "#000000";

/// Pixel-space conversion for a tile column or row
pub fn tile_to_px(tile: i32) -> f32 {
    tile as f32 * TILE_SIZE
}

/// Tile index containing a pixel coordinate (floors toward negative infinity)
pub fn px_to_tile(px: f32) -> i32 {
    (px / TILE_SIZE).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_row_is_two_above_bottom() {
        assert_eq!(GROUND_ROW, 13);
        assert_eq!(LEVEL_HEIGHT as i32 - GROUND_ROW, 2);
    }

    #[test]
    fn test_pixel_conversion() {
        assert_eq!(tile_to_px(10), 160.0);
        assert_eq!(px_to_tile(159.9), 9);
        assert_eq!(px_to_tile(160.0), 10);
        assert_eq!(px_to_tile(-1.0), -1);
    }
}
