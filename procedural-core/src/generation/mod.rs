//! Deterministic hand-authored level archetypes.
//!
//! Each archetype is a fixed script of placement primitives over a
//! `STANDARD_LEVEL_WIDTH` x `LEVEL_HEIGHT` grid. Scripts are pure: the same archetype
//! always yields the same [`LevelData`] (and therefore the same fingerprint).
//! Their output is trusted and never passes through the repair pass.

pub mod athletic;
pub mod classic;
pub mod fortress;
pub mod underground;

pub use athletic::generate_athletic;
pub use classic::generate_classic;
pub use fortress::generate_fortress;
pub use underground::generate_underground;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grid::Grid;
use crate::level::{Entity, LevelData};
use crate::logging::TimingSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelArchetype {
    /// World 1-1 approximation
    Classic,
    /// 1-2: brick ceiling, pipes, rescue platforms
    Underground,
    /// 1-3: mushroom platforms over gaps
    Athletic,
    /// 1-4: lava pits, maze columns, boss bridge
    Fortress,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown level archetype: {0}")]
pub struct UnknownArchetype(pub String);

impl LevelArchetype {
    pub const ALL: [LevelArchetype; 4] = [
        LevelArchetype::Classic,
        LevelArchetype::Underground,
        LevelArchetype::Athletic,
        LevelArchetype::Fortress,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Underground => "underground",
            Self::Athletic => "athletic",
            Self::Fortress => "fortress",
        }
    }

    /// Stage label the archetype stands in for
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Classic => "1-1",
            Self::Underground => "1-2",
            Self::Athletic => "1-3",
            Self::Fortress => "1-4",
        }
    }

    pub fn generate(&self) -> LevelData {
        let _span = TimingSpan::new(self.name());
        let level = match self {
            Self::Classic => generate_classic(),
            Self::Underground => generate_underground(),
            Self::Athletic => generate_athletic(),
            Self::Fortress => generate_fortress(),
        };
        debug!(
            archetype = self.name(),
            width = level.grid().width(),
            enemies = level.entities().len(),
            "Generated archetype level"
        );
        level
    }
}

impl fmt::Display for LevelArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LevelArchetype {
    type Err = UnknownArchetype;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.name() == key || a.stage() == key)
            .or(match key.as_str() {
                "overworld" => Some(Self::Classic),
                "castle" => Some(Self::Fortress),
                _ => None,
            })
            .ok_or_else(|| UnknownArchetype(s.to_string()))
    }
}

/// Walkers resting on the surface of each listed column.
///
/// Columns may be fractional (half-tile offsets); the surface is looked up in the
/// containing tile column. Ids are assigned sequentially from `first_id`.
pub(crate) fn spawn_walkers(grid: &Grid, columns: &[f32], first_id: u32, speed: f32) -> Vec<Entity> {
    columns
        .iter()
        .zip(first_id..)
        .map(|(&column, id)| {
            let row = grid.ground_level(column.floor() as i32) - 1;
            Entity::walker_on_tile(id, column, row, speed)
        })
        .collect()
}
