//! Property-based tests using proptest
//!
//! Tests invariants that must hold for ALL inputs:
//! - Repair: any candidate → structurally valid level
//! - Repair: repairing a repaired level changes nothing
//! - Primitives: platforms, pipes and gaps stay within traversal limits
//! - Candidate parsing: arbitrary text never panics
//! - Style selection: any seed → seed in range

use proptest::prelude::*;

use level_core::constants::{
    px_to_tile, GROUND_ROW, LEVEL_HEIGHT, MAX_HORIZONTAL_GAP_TILES, MAX_JUMP_HEIGHT_TILES,
};
use level_core::grid::{GroundOptions, PipeOptions, PlatformOptions};
use level_core::style::SEED_RANGE;
use level_core::{
    repair_level, Candidate, EnemyHint, Grid, PlayabilityReport, RepairOptions, StyleSelection,
    TileType,
};

fn candidate_strategy() -> impl Strategy<Value = Candidate> {
    (1usize..=160, 1usize..=20).prop_flat_map(|(width, height)| {
        let rows = prop::collection::vec(prop::collection::vec(-3i64..=20, width..=width), height..=height);
        let hints = prop::collection::vec(
            (-100.0f64..3000.0, 0.0f64..300.0).prop_map(|(x, y)| EnemyHint::new(x, y, "GOOMBA")),
            0..25,
        );
        (rows, hints).prop_map(|(rows, hints)| Candidate::from_parts(rows, hints))
    })
}

// ============================================================
// Repair Properties
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_repaired_level_is_structurally_valid(candidate in candidate_strategy()) {
        let opts = RepairOptions::default();
        let level = repair_level(candidate, &opts);
        let grid = level.grid();
        let report = PlayabilityReport::inspect(&level, opts.spawn_columns);

        prop_assert!(report.structurally_valid(), "{report:?}");

        let goal = report.goal_column.unwrap();
        prop_assert!(goal >= grid.width() as i32 - 10, "goal at {goal} in width {}", grid.width());

        for entity in level.entities() {
            let (x, y) = entity.tile_position();
            prop_assert!(!grid.is_solid_at(x, y), "enemy {} embedded at ({x}, {y})", entity.id);
        }
    }

    #[test]
    fn prop_enemy_floor(candidate in candidate_strategy()) {
        let opts = RepairOptions::default();
        let level = repair_level(candidate, &opts);
        let grid = level.grid();
        let count = opts.default_enemy_count;
        let any_default_spot = (0..count)
            .map(|i| ((i + 1) * grid.width() / (count + 1)) as i32)
            .any(|x| grid.is_standable(x));
        prop_assert!(!level.entities().is_empty() || !any_default_spot);
    }

    #[test]
    fn prop_repair_is_idempotent(candidate in candidate_strategy()) {
        let opts = RepairOptions::default();
        let once = repair_level(candidate, &opts);
        let twice = repair_level(Candidate::from_level(&once), &opts);
        prop_assert_eq!(once.fingerprint(), twice.fingerprint());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_ids_are_sequential(candidate in candidate_strategy()) {
        let level = repair_level(candidate, &RepairOptions::default());
        for (i, entity) in level.entities().iter().enumerate() {
            prop_assert_eq!(entity.id, 1000 + i as u32);
            prop_assert_eq!(entity.vel.x, -0.5);
        }
    }

    #[test]
    fn prop_enemies_inside_grid(candidate in candidate_strategy()) {
        let level = repair_level(candidate, &RepairOptions::default());
        let grid = level.grid();
        for entity in level.entities() {
            let column = px_to_tile(entity.pos.x);
            prop_assert!(column >= 0 && column < grid.width() as i32);
            let row = px_to_tile(entity.pos.y);
            prop_assert!(row >= 0 && row < grid.height() as i32);
        }
    }
}

// ============================================================
// Primitive Properties
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_floating_platform_within_jump(x in -10i32..60, width in 0i32..20, height in -50i32..50) {
        let mut grid = Grid::new(50, LEVEL_HEIGHT);
        let row = grid.place_floating_platform(x, width, height, PlatformOptions::default());
        prop_assert!(row >= GROUND_ROW - MAX_JUMP_HEIGHT_TILES);
        prop_assert!(row < GROUND_ROW);
    }

    #[test]
    fn prop_carved_gap_clearable(start in -5i32..50, width in 0i32..40) {
        let mut grid = Grid::new(50, LEVEL_HEIGHT);
        grid.place_ground(0, 50, GroundOptions::default());
        grid.carve_gap(start, width);
        prop_assert!(grid.widest_pit() <= MAX_HORIZONTAL_GAP_TILES);
    }

    #[test]
    fn prop_pipe_jumpable(x in 0i32..48, height in -10i32..20) {
        let mut grid = Grid::new(50, LEVEL_HEIGHT);
        grid.place_ground(0, 50, GroundOptions::default());
        grid.place_pipe(x, height, PipeOptions::default());
        let top = grid.ground_level(x);
        prop_assert!(GROUND_ROW - top <= MAX_JUMP_HEIGHT_TILES);
        prop_assert_eq!(grid.get(x, top), Some(TileType::PipeTopLeft));
    }
}

// ============================================================
// Parsing & Selection Properties
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_candidate_parse_never_panics(text in ".{0,200}") {
        let _ = Candidate::from_json(&text);
    }

    #[test]
    fn prop_style_seed_in_range(seed in any::<u64>()) {
        let selection = StyleSelection::from_seed(seed);
        prop_assert!(selection.seed < SEED_RANGE);
        prop_assert_eq!(selection, StyleSelection::from_seed(seed));
    }
}
