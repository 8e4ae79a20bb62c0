//! Game configuration.
//!
//! The rule constants are fixed: runs of five clear, each cleared run is
//! worth five points, three markers arrive per restock. `LinesConfig`
//! carries what may vary between sessions: the generator seed and the
//! number of markers on a fresh board.

use serde::{Deserialize, Serialize};

use super::coord::CELL_COUNT;
use super::error::{EngineError, Result};

/// Number of colors shown in the preview and placed per restock.
pub const PREVIEW_LEN: usize = 3;

/// Shortest run of one color that clears.
pub const MIN_RUN_LENGTH: usize = 5;

/// Points for each axis that clears a run.
pub const POINTS_PER_COMBO: u32 = 5;

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinesConfig {
    /// Seed for the session's generator.
    /// Same seed produces the same game.
    pub seed: u64,

    /// Markers dropped on the empty board at game start (default: 3).
    pub initial_markers: usize,
}

impl Default for LinesConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            initial_markers: PREVIEW_LEN,
        }
    }
}

impl LinesConfig {
    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of markers on a fresh board.
    #[must_use]
    pub fn with_initial_markers(mut self, count: usize) -> Self {
        self.initial_markers = count;
        self
    }

    /// Check that the configuration describes a playable game.
    pub fn validate(&self) -> Result<()> {
        if self.initial_markers > CELL_COUNT {
            return Err(EngineError::InvalidConfig(format!(
                "initial_markers must be <= {CELL_COUNT}, got {}",
                self.initial_markers
            )));
        }
        Ok(())
    }
}
