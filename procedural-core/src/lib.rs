//! Level Procedural Core Library
//!
//! This crate provides the deterministic level logic for a tile-based platformer:
//! - Level data model (tile codes, entities, `LevelData`)
//! - Bounds-checked grid with constrained placement primitives
//! - Hand-authored archetype generators (classic, underground, athletic, fortress)
//! - Candidate parsing and the playability repair pass for untrusted levels
//! - Playability audit with a surface reachability graph
//! - Style/seed selection for external generation
//! - Level persistence and the audio cue interface

pub mod audio;
pub mod constants;
pub mod generation;
pub mod grid;
pub mod level;
pub mod logging;
pub mod persistence;
pub mod repair;
pub mod style;
pub mod validation;

pub use generation::LevelArchetype;
pub use grid::Grid;
pub use level::{Entity, EntityKind, LevelData, TileType};
pub use repair::{repair_level, Candidate, CandidateError, EnemyHint, RepairOptions};
pub use style::{LevelStyle, StyleSelection};
pub use validation::PlayabilityReport;
