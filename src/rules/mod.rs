//! Turn rules: the click-driven state machine and marker spawning.
//!
//! Front ends talk to [`TurnController`] only. It consults the board
//! algorithms in [`crate::board`] and the [`Spawner`] to play a turn, and
//! reports back through [`Activation`] values and the [`BoardObserver`]
//! trait.

pub mod controller;
pub mod spawner;

pub use controller::{Activation, BoardObserver, MoveReport, TurnController, TurnEnd, TurnPhase};
pub use spawner::{PreviewQueue, SpawnReport, Spawner};
