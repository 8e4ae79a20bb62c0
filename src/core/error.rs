//! Engine errors.
//!
//! Only programming errors live here. An illegal move or a full board is a
//! normal game outcome and is reported through
//! [`Activation`](crate::rules::Activation), never through `Err`.

use crate::board::Selection;

use super::coord::Coord;

/// Errors raised by the engine when it is driven incorrectly.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("coordinate ({x}, {y}) is outside the 9x9 board")]
    OutOfBounds { x: usize, y: usize },

    #[error("cannot mark {requested} as {selection:?}: {existing} already holds it")]
    SelectionConflict {
        selection: Selection,
        existing: Coord,
        requested: Coord,
    },

    #[error("more than one cell is marked {0:?}")]
    DuplicateSelection(Selection),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EngineError>;
