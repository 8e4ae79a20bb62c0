//! Board state and the two board algorithms.
//!
//! - `grid`: the 81 cells and their selection marks
//! - `path`: move legality by flood fill over empty cells
//! - `lines`: run detection and clearing along the four axes

pub mod grid;
pub mod path;
pub mod lines;

pub use grid::{Cell, Grid, Selection};
pub use path::PathValidator;
pub use lines::{Axis, LineScanner, ResolveResult};
