//! Level data model shared by the generators, the repair pass and the simulation.
//!
//! A [`LevelData`] can only be built inside this crate: by a deterministic
//! generator or by the repair pass. It serializes to the wire JSON the simulation
//! reads, but deliberately has no `Deserialize` impl; loaded files and external
//! responses go through [`crate::repair`] first.

pub mod entity;
pub mod tile;

pub use entity::{Entity, EntityKind, Facing, Vec2};
pub use tile::TileType;

use serde::Serialize;
use sha3::{Digest, Sha3_256};

use crate::grid::Grid;

/// Complete, validated level artifact
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    map: Grid,
    entities: Vec<Entity>,
    background_color: String,
}

impl LevelData {
    pub(crate) fn new(map: Grid, entities: Vec<Entity>, background_color: impl Into<String>) -> Self {
        Self {
            map,
            entities,
            background_color: background_color.into(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.map
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    /// Hand the level over to the simulation layer
    pub fn into_parts(self) -> (Grid, Vec<Entity>, String) {
        (self.map, self.entities, self.background_color)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Canonical SHA3-256 of dimensions, tiles and entity placement
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha3_256::new();

        hasher.update((self.map.width() as u32).to_le_bytes());
        hasher.update((self.map.height() as u32).to_le_bytes());
        for row in self.map.rows() {
            for tile in row {
                hasher.update([tile.code()]);
            }
        }

        hasher.update((self.entities.len() as u32).to_le_bytes());
        for entity in &self.entities {
            hasher.update(entity.id.to_le_bytes());
            hasher.update(entity.pos.x.to_le_bytes());
            hasher.update(entity.pos.y.to_le_bytes());
        }

        hasher.update(self.background_color.as_bytes());
        hasher.finalize().into()
    }

    pub fn fingerprint_hex(&self) -> String {
        self.fingerprint().iter().map(|b| format!("{b:02x}")).collect()
    }
}
