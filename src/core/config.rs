//! Match configuration.
//!
//! Team size, deck composition, and log limits are fixed constants; a match
//! is configured only by its seed and starting difficulty.

use serde::{Deserialize, Serialize};

use super::state::Difficulty;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Random seed for dealing and AI decisions.
    /// `None` draws one from OS entropy.
    pub seed: Option<u64>,

    /// Starting AI difficulty (can be changed later with `SetDifficulty`).
    pub difficulty: Difficulty,
}

impl MatchConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new config with a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config with a starting difficulty.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }
}
