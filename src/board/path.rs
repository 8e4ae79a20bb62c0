//! Move legality: can a marker travel from one cell to another?
//!
//! A marker moves through 4-adjacent empty cells. The search is a
//! breadth-first flood fill from the source: it succeeds as soon as the
//! target is reached and fails only once every reachable empty cell has
//! been tried, so it never misses an existing route.
//!
//! The search borrows the grid immutably. Its bookkeeping lives in a
//! [`SearchState`] that is dropped when the query returns.
//!
//! ```
//! use rust_lines::board::{Grid, PathValidator};
//! use rust_lines::core::{Color, Coord};
//!
//! let mut grid = Grid::new();
//! grid.set_color(Coord::new(0, 0), Some(Color::Red)).unwrap();
//!
//! let validator = PathValidator::new(&grid);
//! assert!(validator.is_reachable(Coord::new(0, 0), Coord::new(8, 8)).unwrap());
//! ```

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use super::grid::Grid;
use crate::core::{Coord, Result};

/// Bookkeeping for one reachability query.
#[derive(Debug)]
struct SearchState {
    /// Frontier of cells still to expand.
    actual: VecDeque<Coord>,
    /// Cells already visited or rejected.
    used: FxHashSet<Coord>,
    /// Predecessor of each visited cell on its shortest route.
    parent: FxHashMap<Coord, Coord>,
}

impl SearchState {
    fn new(source: Coord) -> Self {
        let mut used = FxHashSet::default();
        used.insert(source);
        Self {
            actual: VecDeque::from([source]),
            used,
            parent: FxHashMap::default(),
        }
    }

    fn route_to(&self, target: Coord) -> Vec<Coord> {
        let mut route = vec![target];
        let mut current = target;
        while let Some(&prev) = self.parent.get(&current) {
            route.push(prev);
            current = prev;
        }
        route.reverse();
        route
    }
}

/// Reachability queries over a borrowed grid.
#[derive(Clone, Copy, Debug)]
pub struct PathValidator<'a> {
    grid: &'a Grid,
}

impl<'a> PathValidator<'a> {
    /// Create a validator for the current board.
    #[must_use]
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    /// True iff a marker at `source` can move to `target`.
    ///
    /// The source's own marker is not an obstacle. The target must be empty.
    /// `source == target` is trivially reachable.
    pub fn is_reachable(&self, source: Coord, target: Coord) -> Result<bool> {
        Ok(self.find_path(source, target)?.is_some())
    }

    /// Shortest route from `source` to `target`, both ends included.
    ///
    /// Returns `Ok(None)` when no route exists.
    pub fn find_path(&self, source: Coord, target: Coord) -> Result<Option<Vec<Coord>>> {
        let source = source.ensure_in_bounds()?;
        let target = target.ensure_in_bounds()?;

        if source == target {
            return Ok(Some(vec![source]));
        }
        if !self.grid.is_empty_at(target)? {
            return Ok(None);
        }

        let mut search = SearchState::new(source);
        while let Some(current) = search.actual.pop_front() {
            for next in Grid::neighbors(current) {
                if !search.used.insert(next) {
                    continue;
                }
                if !self.grid.is_empty_at(next)? {
                    continue;
                }
                search.parent.insert(next, current);
                if next == target {
                    let route = search.route_to(target);
                    trace!(%source, %target, visited = search.used.len(), steps = route.len() - 1, "route found");
                    return Ok(Some(route));
                }
                search.actual.push_back(next);
            }
        }

        trace!(%source, %target, visited = search.used.len(), "no route");
        Ok(None)
    }
}
