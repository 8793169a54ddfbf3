//! Tile codes and their fixed integer wire mapping.
//!
//! The mapping (0 = Air … 17 = Castle) is the contract between the external
//! generator, persisted level files and the repair pass. Never reorder variants.

use serde::{Deserialize, Serialize, Serializer};

/// One cell of the level grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "i64")]
#[repr(u8)]
pub enum TileType {
    #[default]
    Air = 0,
    Ground = 1,
    Brick = 2,
    QuestionBlock = 3,
    QuestionBlockHit = 4,
    HardBlock = 5,
    PipeLeft = 6,
    PipeRight = 7,
    PipeTopLeft = 8,
    PipeTopRight = 9,
    Pole = 10,
    Flag = 11,
    Coin = 12,
    InvisibleBlock = 13,
    Cloud = 14,
    Bush = 15,
    Hill = 16,
    Castle = 17,
}

impl TileType {
    /// Every tile in wire-code order
    pub const ALL: [TileType; 18] = [
        TileType::Air,
        TileType::Ground,
        TileType::Brick,
        TileType::QuestionBlock,
        TileType::QuestionBlockHit,
        TileType::HardBlock,
        TileType::PipeLeft,
        TileType::PipeRight,
        TileType::PipeTopLeft,
        TileType::PipeTopRight,
        TileType::Pole,
        TileType::Flag,
        TileType::Coin,
        TileType::InvisibleBlock,
        TileType::Cloud,
        TileType::Bush,
        TileType::Hill,
        TileType::Castle,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a wire integer. Unknown codes yield `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
    }

    /// Blocks movement and supports standing
    pub fn is_solid(self) -> bool {
        matches!(
            self,
            Self::Ground
                | Self::Brick
                | Self::QuestionBlock
                | Self::QuestionBlockHit
                | Self::HardBlock
                | Self::PipeLeft
                | Self::PipeRight
                | Self::PipeTopLeft
                | Self::PipeTopRight
        )
    }

    pub fn is_pipe(self) -> bool {
        matches!(
            self,
            Self::PipeLeft | Self::PipeRight | Self::PipeTopLeft | Self::PipeTopRight
        )
    }

    /// Human-readable legend entry (used in generator prompts)
    pub fn describe(self) -> &'static str {
        match self {
            Self::Air => "Air (empty space)",
            Self::Ground => "Ground (solid brown ground tile)",
            Self::Brick => "Brick (breakable brick block)",
            Self::QuestionBlock => "Question Block (contains power-ups or coins)",
            Self::QuestionBlockHit => "Used Question Block (already emptied)",
            Self::HardBlock => "Hard Block (indestructible gray block)",
            Self::PipeLeft => "Pipe Body Left (vertical pipe segment, left side)",
            Self::PipeRight => "Pipe Body Right (vertical pipe segment, right side)",
            Self::PipeTopLeft => "Pipe Top Left (top left corner of pipe)",
            Self::PipeTopRight => "Pipe Top Right (top right corner of pipe)",
            Self::Pole => "Pole (flagpole)",
            Self::Flag => "Flag (at top of pole)",
            Self::Coin => "Coin (floating coin)",
            Self::InvisibleBlock => "Invisible Block (hidden until bumped)",
            Self::Cloud => "Cloud (in sky)",
            Self::Bush => "Bush (on ground)",
            Self::Hill => "Hill (background hill)",
            Self::Castle => "Castle (goal decoration)",
        }
    }
}

impl TryFrom<i64> for TileType {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown tile code {code}"))
    }
}

impl Serialize for TileType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_wire_order() {
        for (idx, tile) in TileType::ALL.iter().enumerate() {
            assert_eq!(tile.code() as usize, idx);
            assert_eq!(TileType::from_code(idx as i64), Some(*tile));
        }
        assert_eq!(TileType::Castle.code(), 17);
    }

    #[test]
    fn test_unknown_codes_rejected() {
        assert_eq!(TileType::from_code(-1), None);
        assert_eq!(TileType::from_code(18), None);
        assert_eq!(TileType::from_code(i64::MAX), None);
    }

    #[test]
    fn test_solid_set() {
        let solid: Vec<u8> = TileType::ALL
            .iter()
            .filter(|t| t.is_solid())
            .map(|t| t.code())
            .collect();
        assert_eq!(solid, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert!(!TileType::Pole.is_solid());
        assert!(!TileType::InvisibleBlock.is_solid());
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&vec![TileType::Air, TileType::Flag]).unwrap();
        assert_eq!(json, "[0,11]");
    }
}
