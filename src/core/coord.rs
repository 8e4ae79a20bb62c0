//! Board coordinates and dimensions.
//!
//! The board is a fixed 9×9 grid. Cells are stored row-major, so the
//! cell at `(x, y)` lives at index `y * BOARD_WIDTH + x`.
//!
//! ## Usage
//!
//! ```
//! use rust_lines::core::{Coord, BOARD_WIDTH};
//!
//! let c = Coord::new(4, 2);
//! assert_eq!(c.index(), 2 * BOARD_WIDTH + 4);
//! assert_eq!(Coord::from_index(c.index()), Some(c));
//!
//! // Coordinates outside the board are representable but not in bounds
//! assert!(!Coord::new(9, 0).in_bounds());
//! ```

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};

/// Number of columns.
pub const BOARD_WIDTH: usize = 9;

/// Number of rows.
pub const BOARD_HEIGHT: usize = 9;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// A cell position, `x` is the column and `y` is the row.
///
/// Construction is unchecked so callers can carry raw input around;
/// the grid validates coordinates on every access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    /// Create a coordinate without bounds checking.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Create a coordinate, failing if it lies outside the board.
    pub fn checked(x: usize, y: usize) -> Result<Self> {
        if x < BOARD_WIDTH && y < BOARD_HEIGHT {
            Ok(Self::new(x as u8, y as u8))
        } else {
            Err(EngineError::OutOfBounds { x, y })
        }
    }

    /// Whether this coordinate lies on the board.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        (self.x as usize) < BOARD_WIDTH && (self.y as usize) < BOARD_HEIGHT
    }

    /// Fail with `OutOfBounds` unless this coordinate lies on the board.
    pub fn ensure_in_bounds(self) -> Result<Self> {
        Self::checked(self.x as usize, self.y as usize)
    }

    /// Row-major cell index. Only meaningful for in-bounds coordinates.
    #[must_use]
    pub const fn index(self) -> usize {
        self.y as usize * BOARD_WIDTH + self.x as usize
    }

    /// Inverse of [`Coord::index`].
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < CELL_COUNT).then(|| Self::new((index % BOARD_WIDTH) as u8, (index / BOARD_WIDTH) as u8))
    }

    /// Step by `(dx, dy)`, returning `None` if the result leaves the board.
    #[must_use]
    pub fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let x = self.x as i16 + dx as i16;
        let y = self.y as i16 + dy as i16;
        if (0..BOARD_WIDTH as i16).contains(&x) && (0..BOARD_HEIGHT as i16).contains(&y) {
            Some(Self::new(x as u8, y as u8))
        } else {
            None
        }
    }

    /// Iterate over every board coordinate in index order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELL_COUNT).filter_map(Coord::from_index)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
