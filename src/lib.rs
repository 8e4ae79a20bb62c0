//! # rust-lines
//!
//! A deterministic rules engine for "Color Lines" style board puzzles.
//!
//! A 9×9 board holds colored markers. Each turn the player moves one
//! marker along a path of empty cells. Five or more in a row, column or
//! diagonal are cleared for points and earn another move; otherwise three
//! new markers drop onto the board. The game ends when the board fills.
//!
//! ## Design Principles
//!
//! 1. **Front-end agnostic**: No rendering or input handling. A front end
//!    sends clicks and reads the board back.
//!
//! 2. **Owned sessions**: Each `TurnController` owns its board, score,
//!    preview and generator. Nothing is shared between games.
//!
//! 3. **Deterministic**: One seeded generator per session; the same seed
//!    and clicks replay the same game.
//!
//! ## Modules
//!
//! - `core`: Coordinates, colors, RNG, configuration, errors
//! - `board`: Grid, path validation, run detection
//! - `rules`: Turn state machine and spawning

pub mod core;
pub mod board;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Coord, Color, GameRng, LinesConfig, EngineError, Result,
    BOARD_WIDTH, BOARD_HEIGHT, CELL_COUNT, MIN_RUN_LENGTH, POINTS_PER_COMBO, PREVIEW_LEN,
};

pub use crate::board::{Axis, Cell, Grid, LineScanner, PathValidator, ResolveResult, Selection};

pub use crate::rules::{
    Activation, BoardObserver, MoveReport, TurnController, TurnEnd, TurnPhase,
    PreviewQueue, SpawnReport, Spawner,
};
