//! Run detection and clearing.
//!
//! After a marker lands, the four lines through it are examined:
//!
//! | Axis           | Line identifier | Lines |
//! |----------------|-----------------|-------|
//! | `Row`          | `y`             | 9     |
//! | `Column`       | `x`             | 9     |
//! | `Diagonal`     | `x - y + 8`     | 17    |
//! | `AntiDiagonal` | `x + y`         | 17    |
//!
//! Every line is precomputed once as an ordered list of coordinates, so
//! the scan never does index arithmetic on the flat cell array.
//!
//! On each line the cells matching the placed color (plus the placed cell
//! itself) are split into runs of consecutive positions. The longest run
//! wins, ties going to the first one in line order. If it reaches
//! [`MIN_RUN_LENGTH`], it is cleared and the axis scores one combo. The winning
//! run need not contain the placed cell.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::grid::Grid;
use crate::core::{Color, Coord, Result, BOARD_HEIGHT, BOARD_WIDTH, MIN_RUN_LENGTH, POINTS_PER_COMBO};

/// Number of lines on each diagonal axis.
const DIAGONAL_COUNT: usize = BOARD_WIDTH + BOARD_HEIGHT - 1;

/// One of the four line directions through a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// `y` fixed.
    Row,
    /// `x` fixed.
    Column,
    /// `x - y` fixed.
    Diagonal,
    /// `x + y` fixed.
    AntiDiagonal,
}

impl Axis {
    /// All axes in scan order.
    pub const ALL: [Axis; 4] = [Axis::Row, Axis::Column, Axis::Diagonal, Axis::AntiDiagonal];

    /// Index of the line on this axis passing through `coord`.
    #[must_use]
    pub const fn line_id(self, coord: Coord) -> usize {
        let (x, y) = (coord.x as usize, coord.y as usize);
        match self {
            Axis::Row => y,
            Axis::Column => x,
            Axis::Diagonal => x + (BOARD_HEIGHT - 1) - y,
            Axis::AntiDiagonal => x + y,
        }
    }
}

/// Outcome of scanning the lines through a placed marker.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveResult {
    /// Every cell emptied, without duplicates.
    pub cleared: SmallVec<[Coord; 16]>,
    /// Axes that cleared a run, in scan order.
    pub axes: SmallVec<[Axis; 4]>,
}

impl ResolveResult {
    /// Number of cells emptied.
    #[must_use]
    pub fn cleared_cell_count(&self) -> usize {
        self.cleared.len()
    }

    /// Number of axes that cleared a run (combos).
    #[must_use]
    pub fn axes_cleared(&self) -> usize {
        self.axes.len()
    }

    /// True if anything cleared, which earns a bonus turn.
    #[must_use]
    pub fn is_bonus(&self) -> bool {
        !self.axes.is_empty()
    }

    /// Score earned for this resolve: [`POINTS_PER_COMBO`] per axis.
    #[must_use]
    pub fn score_delta(&self) -> u32 {
        POINTS_PER_COMBO * self.axes.len() as u32
    }
}

/// Precomputed lines and the run-clearing rule.
#[derive(Clone, Debug)]
pub struct LineScanner {
    rows: Vec<Vec<Coord>>,
    columns: Vec<Vec<Coord>>,
    diagonals: Vec<Vec<Coord>>,
    anti_diagonals: Vec<Vec<Coord>>,
}

impl LineScanner {
    /// Build every line on the board.
    #[must_use]
    pub fn new() -> Self {
        let mut rows = vec![Vec::new(); BOARD_HEIGHT];
        let mut columns = vec![Vec::new(); BOARD_WIDTH];
        let mut diagonals = vec![Vec::new(); DIAGONAL_COUNT];
        let mut anti_diagonals = vec![Vec::new(); DIAGONAL_COUNT];

        // Column-major walk: every line comes out sorted by x, then y.
        for x in 0..BOARD_WIDTH as u8 {
            for y in 0..BOARD_HEIGHT as u8 {
                let c = Coord::new(x, y);
                rows[Axis::Row.line_id(c)].push(c);
                columns[Axis::Column.line_id(c)].push(c);
                diagonals[Axis::Diagonal.line_id(c)].push(c);
                anti_diagonals[Axis::AntiDiagonal.line_id(c)].push(c);
            }
        }

        Self {
            rows,
            columns,
            diagonals,
            anti_diagonals,
        }
    }

    /// The ordered line on `axis` through `coord`.
    #[must_use]
    pub fn line_through(&self, axis: Axis, coord: Coord) -> &[Coord] {
        let id = axis.line_id(coord);
        match axis {
            Axis::Row => &self.rows[id],
            Axis::Column => &self.columns[id],
            Axis::Diagonal => &self.diagonals[id],
            Axis::AntiDiagonal => &self.anti_diagonals[id],
        }
    }

    /// Clear qualifying runs through `placed_at` and report what went.
    ///
    /// `placed_at` must already hold `color`. Runs on all four axes are
    /// chosen against the board as it stands, then removed together.
    pub fn resolve(&self, grid: &mut Grid, placed_at: Coord, color: Color) -> Result<ResolveResult> {
        let placed_at = placed_at.ensure_in_bounds()?;
        let mut result = ResolveResult::default();

        for axis in Axis::ALL {
            let run = Self::longest_run(grid, self.line_through(axis, placed_at), placed_at, color);
            if run.len() >= MIN_RUN_LENGTH {
                for &coord in run {
                    if !result.cleared.contains(&coord) {
                        result.cleared.push(coord);
                    }
                }
                result.axes.push(axis);
            }
        }

        for &coord in &result.cleared {
            grid.set_color(coord, None)?;
        }
        Ok(result)
    }

    fn longest_run<'l>(grid: &Grid, line: &'l [Coord], placed_at: Coord, color: Color) -> &'l [Coord] {
        let matches = |c: Coord| c == placed_at || grid.cells()[c.index()].color() == Some(color);

        let (mut best_start, mut best_len) = (0, 0);
        let (mut start, mut len) = (0, 0);
        for (i, &coord) in line.iter().enumerate() {
            if matches(coord) {
                if len == 0 {
                    start = i;
                }
                len += 1;
                // Strictly longer, so the first run keeps a tie.
                if len > best_len {
                    best_start = start;
                    best_len = len;
                }
            } else {
                len = 0;
            }
        }
        &line[best_start..best_start + best_len]
    }
}

impl Default for LineScanner {
    fn default() -> Self {
        Self::new()
    }
}
