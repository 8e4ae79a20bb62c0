//! Core engine types: coordinates, colors, RNG, configuration, errors.
//!
//! These are the building blocks shared by the board algorithms and the
//! turn rules.

pub mod coord;
pub mod color;
pub mod rng;
pub mod config;
pub mod error;

pub use coord::{Coord, BOARD_HEIGHT, BOARD_WIDTH, CELL_COUNT};
pub use color::Color;
pub use rng::GameRng;
pub use config::{LinesConfig, MIN_RUN_LENGTH, POINTS_PER_COMBO, PREVIEW_LEN};
pub use error::{EngineError, Result};
