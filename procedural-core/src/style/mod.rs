//! Style and seed selection for externally generated levels.
//!
//! Style and seed are opaque payload for the external generator's prompt; the
//! repair pass ignores both.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of prompt seeds
pub const SEED_RANGE: u64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelStyle {
    Classic,
    Hilly,
    Athletic,
    Broken,
}

impl LevelStyle {
    pub const ALL: [LevelStyle; 4] = [
        LevelStyle::Classic,
        LevelStyle::Hilly,
        LevelStyle::Athletic,
        LevelStyle::Broken,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Hilly => "Hilly",
            Self::Athletic => "Athletic",
            Self::Broken => "Broken",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Classic => "Standard Super Mario Bros 1-1 style. Balanced ground and platforms.",
            Self::Hilly => {
                "Lots of hills, verticality, and elevated ground sections. Less flat ground."
            }
            Self::Athletic => "Many platforms, gaps, and jumps. Less solid ground at the bottom.",
            Self::Broken => {
                "Fragmented ground, many small islands, requires precise jumping."
            }
        }
    }

    /// Style-specific prompt hint
    pub fn instructions(&self) -> &'static str {
        match self {
            Self::Classic => "Balance between running and jumping. Classic 1-1 feel.",
            Self::Hilly => {
                "Create rolling hills. Ground level should oscillate between row 14 and row 8."
            }
            Self::Athletic => "Focus on platforming. Use floating islands of ground. Many gaps.",
            Self::Broken => {
                "The ground is broken. Lots of small pits and small platforms. High difficulty."
            }
        }
    }

    /// Relative difficulty, 1 (easiest) to 4
    pub fn difficulty(&self) -> u8 {
        match self {
            Self::Classic => 1,
            Self::Hilly => 2,
            Self::Athletic => 3,
            Self::Broken => 4,
        }
    }
}

impl fmt::Display for LevelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSelection {
    pub style: LevelStyle,
    pub seed: u64,
}

impl StyleSelection {
    pub fn new(style: LevelStyle, seed: u64) -> Self {
        Self { style, seed }
    }

    /// Uniform style and seed from the thread RNG
    pub fn random() -> Self {
        Self::from_rng(&mut rand::thread_rng())
    }

    /// Reproducible selection for a fixed seed
    pub fn from_seed(seed: u64) -> Self {
        Self::from_rng(&mut Xoshiro256PlusPlus::seed_from_u64(seed))
    }

    pub fn from_rng(rng: &mut impl Rng) -> Self {
        let style = LevelStyle::ALL[rng.gen_range(0..LevelStyle::ALL.len())];
        let seed = rng.gen_range(0..SEED_RANGE);
        Self { style, seed }
    }
}
