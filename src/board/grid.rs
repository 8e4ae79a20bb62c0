//! The 9×9 cell grid.
//!
//! `Grid` owns all 81 cells for the lifetime of a game. Coordinates are
//! fixed at creation; only colors and selection marks change.
//!
//! ## Selection invariant
//!
//! At most one cell is `Active` and at most one is `MoveTarget`. Since a
//! cell carries a single `Selection`, the two can never coincide.
//! [`Grid::mark`] refuses to create a second holder of either mark.
//!
//! ## Usage
//!
//! ```
//! use rust_lines::board::{Grid, Selection};
//! use rust_lines::core::{Color, Coord};
//!
//! let mut grid = Grid::new();
//! grid.set_color(Coord::new(2, 3), Some(Color::Red)).unwrap();
//! grid.mark(Coord::new(2, 3), Selection::Active).unwrap();
//!
//! assert_eq!(grid.active_cell(), Some(Coord::new(2, 3)));
//! assert_eq!(grid.empty_count(), 80);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{Color, Coord, EngineError, Result, BOARD_HEIGHT, BOARD_WIDTH};

/// Selection mark on a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    Unselected,
    /// Source of a pending move.
    Active,
    /// Destination of a pending move.
    MoveTarget,
}

/// One board cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    coord: Coord,
    color: Option<Color>,
    selection: Selection,
}

impl Cell {
    fn new(coord: Coord) -> Self {
        Self {
            coord,
            color: None,
            selection: Selection::Unselected,
        }
    }

    #[must_use]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[must_use]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// True if no marker sits on this cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
    }
}

/// All 81 cells, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Cell>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: Coord::all().map(Cell::new).collect(),
        }
    }

    /// All cells in index order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Look up a cell, failing if `coord` is off the board.
    pub fn cell_at(&self, coord: Coord) -> Result<&Cell> {
        let coord = coord.ensure_in_bounds()?;
        Ok(&self.cells[coord.index()])
    }

    fn cell_at_mut(&mut self, coord: Coord) -> Result<&mut Cell> {
        let coord = coord.ensure_in_bounds()?;
        Ok(&mut self.cells[coord.index()])
    }

    /// Color at `coord`.
    pub fn color_at(&self, coord: Coord) -> Result<Option<Color>> {
        Ok(self.cell_at(coord)?.color)
    }

    /// Place or remove a marker.
    pub fn set_color(&mut self, coord: Coord, color: Option<Color>) -> Result<()> {
        self.cell_at_mut(coord)?.color = color;
        Ok(())
    }

    /// True if `coord` holds no marker.
    pub fn is_empty_at(&self, coord: Coord) -> Result<bool> {
        Ok(self.cell_at(coord)?.is_empty())
    }

    /// Coordinates of every empty cell, in index order.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .filter(|c| c.is_empty())
            .map(Cell::coord)
            .collect()
    }

    /// Number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    /// True when no empty cell remains.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// The unique `Active` cell, if exactly one exists.
    #[must_use]
    pub fn active_cell(&self) -> Option<Coord> {
        self.unique(Selection::Active)
    }

    /// The unique `MoveTarget` cell, if exactly one exists.
    #[must_use]
    pub fn move_target_cell(&self) -> Option<Coord> {
        self.unique(Selection::MoveTarget)
    }

    // `None` both when nothing holds the mark and when the invariant is broken.
    fn unique(&self, selection: Selection) -> Option<Coord> {
        let mut holders = self.holders(selection);
        match (holders.next(), holders.next()) {
            (Some(coord), None) => Some(coord),
            _ => None,
        }
    }

    fn holders(&self, selection: Selection) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .filter(move |c| c.selection == selection)
            .map(Cell::coord)
    }

    /// Set the selection mark on `coord`.
    ///
    /// Marking a cell `Active` or `MoveTarget` while a different cell
    /// already holds that mark fails with `SelectionConflict`.
    pub fn mark(&mut self, coord: Coord, selection: Selection) -> Result<()> {
        let coord = coord.ensure_in_bounds()?;
        if selection != Selection::Unselected {
            if let Some(existing) = self.holders(selection).find(|&c| c != coord) {
                return Err(EngineError::SelectionConflict {
                    selection,
                    existing,
                    requested: coord,
                });
            }
        }
        self.cells[coord.index()].selection = selection;
        Ok(())
    }

    /// Reset the selection mark on `coord`.
    pub fn unmark(&mut self, coord: Coord) -> Result<()> {
        self.mark(coord, Selection::Unselected)
    }

    /// Remove `selection` from whichever cells hold it.
    pub fn clear_selection(&mut self, selection: Selection) {
        for cell in self.cells.iter_mut().filter(|c| c.selection == selection) {
            cell.selection = Selection::Unselected;
        }
    }

    /// Verify the selection invariant.
    pub fn check_invariants(&self) -> Result<()> {
        for selection in [Selection::Active, Selection::MoveTarget] {
            if self.holders(selection).count() > 1 {
                return Err(EngineError::DuplicateSelection(selection));
            }
        }
        Ok(())
    }

    /// The in-bounds 4-directional neighbors of `coord`.
    pub fn neighbors(coord: Coord) -> impl Iterator<Item = Coord> {
        [(0, -1), (0, 1), (-1, 0), (1, 0)]
            .into_iter()
            .filter_map(move |(dx, dy)| coord.offset(dx, dy))
    }

    /// Remove every marker and selection. Used on restart only.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.color = None;
            cell.selection = Selection::Unselected;
        }
    }
}

impl std::fmt::Display for Grid {
    /// One line per row: `.` for empty, the color symbol otherwise,
    /// lowercase for the active cell.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                let cell = &self.cells[y * BOARD_WIDTH + x];
                let ch = match (cell.color, cell.selection) {
                    (None, _) => '.',
                    (Some(c), Selection::Active) => c.symbol().to_ascii_lowercase(),
                    (Some(c), _) => c.symbol(),
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
