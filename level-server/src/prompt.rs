//! Generator prompt and structured-output schema.
//!
//! The prompt describes the tile legend, the traversal limits and the chosen
//! style. Whatever comes back is still untrusted and goes through the repair pass.

use std::fmt::Write;

use serde_json::{json, Value};

use level_core::constants::{MAX_HORIZONTAL_GAP_TILES, MAX_JUMP_HEIGHT_TILES, TILE_SIZE};
use level_core::{StyleSelection, TileType};

/// Tiles the generator may place; Castle, InvisibleBlock and QuestionBlockHit are
/// reserved for the hand-authored levels
const PROMPT_TILES: [TileType; 15] = [
    TileType::Air,
    TileType::Ground,
    TileType::Brick,
    TileType::QuestionBlock,
    TileType::HardBlock,
    TileType::PipeLeft,
    TileType::PipeRight,
    TileType::PipeTopLeft,
    TileType::PipeTopRight,
    TileType::Pole,
    TileType::Flag,
    TileType::Coin,
    TileType::Cloud,
    TileType::Bush,
    TileType::Hill,
];

pub fn build_prompt(selection: &StyleSelection, width: usize, height: usize) -> String {
    let style = selection.style;
    let flag_column = width.saturating_sub(5);
    let start_px = 3.0 * TILE_SIZE;

    let mut legend = String::new();
    for tile in PROMPT_TILES {
        let _ = writeln!(legend, "{}: {}", tile.code(), tile.describe());
    }

    format!(
        "Generate a Super Mario Bros style level map.\n\
         Style: {name} - {description}\n\
         Random Seed: {seed}\n\
         \n\
         The map should be a 2D array of integers ({height} rows x {width} columns).\n\
         \n\
         Tile Mapping:\n\
         {legend}\n\
         Provide a JSON object with:\n\
         - map: number[][] ({height} rows x {width} columns)\n\
         - enemyPositions: {{x: number, y: number, type: string}}[] (x and y in pixels, not tiles)\n\
         \n\
         DESIGN RULES:\n\
         1. Vary the ground height with hills, pits and floating islands; do not make the level flat.\n\
         2. Columns 0-10 must have solid ground in rows {ground_top}-{bottom} for a safe start at x={start_px} pixels.\n\
         3. Place 15-25 Goombas standing on solid blocks (Ground, Brick or Hard Block), never in the air or inside blocks.\n\
         4. Use Brick and Question Blocks for platforms; build staircases and elevated paths; stand pipes on ground.\n\
         5. Every jump must be possible: at most {jump} tiles up and {gap} tiles across.\n\
         6. Decoration (clouds, hills, bushes) is optional; focus on the gameplay blocks.\n\
         7. Place a flagpole at column {flag_column}.\n\
         \n\
         Make the level feel organic and non-repetitive.\n\
         \n\
         Style Specific Instructions:\n\
         - {instructions}",
        name = style.name(),
        description = style.description(),
        seed = selection.seed,
        ground_top = height.saturating_sub(2),
        bottom = height.saturating_sub(1),
        jump = MAX_JUMP_HEIGHT_TILES,
        gap = MAX_HORIZONTAL_GAP_TILES,
        instructions = style.instructions(),
    )
}

/// Structured-output schema: `map` (int rows) and `enemyPositions` (`{x, y, type}`)
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "map": {
                "type": "ARRAY",
                "items": {
                    "type": "ARRAY",
                    "items": { "type": "INTEGER" }
                }
            },
            "enemyPositions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "x": { "type": "INTEGER" },
                        "y": { "type": "INTEGER" },
                        "type": { "type": "STRING" }
                    },
                    "required": ["x", "y", "type"]
                }
            }
        },
        "required": ["map", "enemyPositions"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use level_core::LevelStyle;

    #[test]
    fn test_prompt_carries_selection_and_dimensions() {
        let selection = StyleSelection::new(LevelStyle::Hilly, 4242);
        let prompt = build_prompt(&selection, 150, 15);
        assert!(prompt.contains("Style: Hilly"));
        assert!(prompt.contains("Random Seed: 4242"));
        assert!(prompt.contains("15 rows x 150 columns"));
        assert!(prompt.contains("flagpole at column 145"));
        assert!(prompt.contains("rows 13-14"));
        assert!(prompt.contains(LevelStyle::Hilly.instructions()));
    }

    #[test]
    fn test_prompt_legend_uses_tile_codes() {
        let prompt = build_prompt(&StyleSelection::new(LevelStyle::Classic, 1), 150, 15);
        assert!(prompt.contains("0: Air (empty space)"));
        assert!(prompt.contains("8: Pipe Top Left"));
        assert!(prompt.contains("16: Hill"));
        assert!(!prompt.contains("17: Castle"));
    }

    #[test]
    fn test_schema_requires_map_and_enemies() {
        let schema = response_schema();
        assert_eq!(schema["required"], json!(["map", "enemyPositions"]));
        assert_eq!(schema["properties"]["map"]["items"]["items"]["type"], "INTEGER");
    }
}
