//! Marker spawning and the preview queue.
//!
//! The spawner owns the session's only generator. It drops markers on
//! uniformly random empty cells, both for the opening fill and for the
//! restock that follows every move that clears nothing.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::board::Grid;
use crate::core::{Color, Coord, GameRng, Result, PREVIEW_LEN};

/// The colors of the next restock, in placement order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewQueue {
    colors: [Color; PREVIEW_LEN],
}

impl PreviewQueue {
    /// Draw a fresh queue.
    pub fn random(rng: &mut GameRng) -> Self {
        Self {
            colors: std::array::from_fn(|_| Color::random(rng)),
        }
    }

    /// Queued colors, first to be placed first.
    #[must_use]
    pub fn colors(&self) -> &[Color; PREVIEW_LEN] {
        &self.colors
    }

    /// Iterate over the queued colors.
    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors.iter().copied()
    }
}

/// What a spawn attempt managed to place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnReport {
    /// Markers the spawn tried to place.
    pub requested: usize,
    /// Markers actually placed, in order.
    pub placed: SmallVec<[(Coord, Color); PREVIEW_LEN]>,
}

impl SpawnReport {
    /// Number of markers placed.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    /// True if every requested marker found a cell.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.placed.len() == self.requested
    }
}

/// Random marker placement plus the preview queue.
#[derive(Clone, Debug)]
pub struct Spawner {
    rng: GameRng,
    preview: PreviewQueue,
}

impl Spawner {
    /// Create a spawner seeded with `seed` and draw the first preview.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let preview = PreviewQueue::random(&mut rng);
        Self { rng, preview }
    }

    /// Colors of the next restock.
    #[must_use]
    pub fn preview(&self) -> &PreviewQueue {
        &self.preview
    }

    /// Replace the preview with freshly drawn colors.
    pub fn reseed_preview(&mut self) {
        self.preview = PreviewQueue::random(&mut self.rng);
    }

    /// Drop `count` randomly colored markers on the board.
    ///
    /// Bypasses the preview queue; used when a game starts.
    pub fn initial_fill(&mut self, grid: &mut Grid, count: usize) -> Result<SpawnReport> {
        let mut report = SpawnReport {
            requested: count,
            ..SpawnReport::default()
        };
        for _ in 0..count {
            let color = Color::random(&mut self.rng);
            match self.place_random(grid, color)? {
                Some(coord) => report.placed.push((coord, color)),
                None => break,
            }
        }
        trace!(placed = report.placed_count(), "initial fill");
        Ok(report)
    }

    /// Place the queued colors, then draw the next queue.
    ///
    /// Places as many markers as there are empty cells; a short report
    /// means the board filled up.
    pub fn restock(&mut self, grid: &mut Grid) -> Result<SpawnReport> {
        let mut report = SpawnReport {
            requested: PREVIEW_LEN,
            ..SpawnReport::default()
        };
        let queued = self.preview;
        for color in queued.iter() {
            match self.place_random(grid, color)? {
                Some(coord) => report.placed.push((coord, color)),
                None => break,
            }
        }
        self.preview = PreviewQueue::random(&mut self.rng);
        trace!(placed = report.placed_count(), "restock");
        Ok(report)
    }

    fn place_random(&mut self, grid: &mut Grid, color: Color) -> Result<Option<Coord>> {
        let empty = grid.empty_cells();
        let Some(&coord) = self.rng.choose(&empty) else {
            return Ok(None);
        };
        grid.set_color(coord, Some(color))?;
        Ok(Some(coord))
    }
}
