//! The turn state machine.
//!
//! `TurnController` is the engine's only entry point for a front end. It
//! owns a session's board, score, spawner and line scanner, and turns
//! clicks into moves.
//!
//! ## Click protocol
//!
//! Every click is delivered in two steps:
//!
//! 1. [`TurnController::on_cell_pre_activated`] demotes the current
//!    selection and remembers it, arming a move.
//! 2. [`TurnController::on_cell_activated`] commits the click. A colored
//!    cell becomes the new selection; an empty cell, when a move is armed,
//!    re-promotes the remembered selection and becomes the move target.
//!
//! [`TurnController::click`] runs both steps.
//!
//! ## Turn outcome
//!
//! A legal move is followed by exactly one of:
//! - a bonus turn, when the move clears at least one run (no spawn), or
//! - a restock of the previewed markers, which ends the game if it leaves
//!   no empty cell.
//!
//! An illegal move leaves the board as it was and drops the selection.
//!
//! ```
//! use rust_lines::core::{Color, Coord, LinesConfig};
//! use rust_lines::board::Grid;
//! use rust_lines::rules::{Activation, TurnController, TurnEnd};
//!
//! let mut grid = Grid::new();
//! for x in 0..4 {
//!     grid.set_color(Coord::new(x, 0), Some(Color::Red)).unwrap();
//! }
//! grid.set_color(Coord::new(4, 8), Some(Color::Red)).unwrap();
//!
//! let mut game = TurnController::with_grid(LinesConfig::default(), grid).unwrap();
//! game.click(Coord::new(4, 8)).unwrap();
//! let outcome = game.click(Coord::new(4, 0)).unwrap();
//!
//! assert!(matches!(outcome, Activation::Moved(ref m) if matches!(m.end, TurnEnd::Bonus(_))));
//! assert_eq!(game.score(), 5);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::spawner::{PreviewQueue, SpawnReport, Spawner};
use crate::board::{Grid, LineScanner, PathValidator, ResolveResult, Selection};
use crate::core::{Color, Coord, LinesConfig, Result};

/// Receives change notifications from the engine.
///
/// Front ends implement this to know when to redraw.
pub trait BoardObserver {
    /// The board changed. `demark` asks the front end to also drop any
    /// path preview it is showing.
    fn on_board_changed(&mut self, demark: bool);
}

/// Where the state machine stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Nothing selected.
    Idle,
    /// A marker is selected and waits for a destination.
    Selected(Coord),
    /// A destination was picked; the move is being checked.
    AwaitingTarget { source: Coord, target: Coord },
    /// The move happened; clearing or restocking is in progress.
    Resolved,
    /// The board filled up. No further moves are accepted.
    BoardFull,
}

/// How a legal move ended the turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEnd {
    /// Runs were cleared; no markers spawn.
    Bonus(ResolveResult),
    /// Nothing cleared; the preview was placed.
    Restocked(SpawnReport),
    /// Nothing cleared and the restock left no empty cell. Game over.
    BoardFull(SpawnReport),
}

/// A completed move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub source: Coord,
    pub target: Coord,
    pub color: Color,
    /// The route taken, both ends included.
    pub path: Vec<Coord>,
    pub end: TurnEnd,
}

/// Result of committing a click.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    /// A marker became the selection.
    Selected(Coord),
    /// An empty cell was clicked with no armed selection.
    Ignored,
    /// No route from `source` to `target`; nothing moved.
    Blocked { source: Coord, target: Coord },
    /// The marker moved.
    Moved(MoveReport),
    /// The game is over.
    GameOver,
}

/// One game session.
pub struct TurnController {
    config: LinesConfig,
    grid: Grid,
    scanner: LineScanner,
    spawner: Spawner,
    score: u32,
    phase: TurnPhase,
    /// Selection demoted by the last pre-activation.
    previous_active: Option<Coord>,
    /// Set by a pre-activation that found a selection; consumed by the click.
    allow_move: bool,
    observer: Option<Box<dyn BoardObserver>>,
}

impl TurnController {
    /// Start a new game on an empty board with the opening markers placed.
    pub fn new(config: LinesConfig) -> Result<Self> {
        let mut controller = Self::with_grid(config, Grid::new())?;
        let count = controller.config.initial_markers;
        controller.spawner.initial_fill(&mut controller.grid, count)?;
        debug!(seed = controller.config.seed, "new game");
        Ok(controller)
    }

    /// Start a game from a prepared board. No opening markers are placed.
    pub fn with_grid(config: LinesConfig, grid: Grid) -> Result<Self> {
        config.validate()?;
        grid.check_invariants()?;
        let phase = match grid.active_cell() {
            Some(active) => TurnPhase::Selected(active),
            None => TurnPhase::Idle,
        };
        Ok(Self {
            scanner: LineScanner::new(),
            spawner: Spawner::new(config.seed),
            config,
            grid,
            score: 0,
            phase,
            previous_active: None,
            allow_move: false,
            observer: None,
        })
    }

    /// Install the change observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: Box<dyn BoardObserver>) {
        self.observer = Some(observer);
    }

    #[must_use]
    pub fn config(&self) -> &LinesConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Colors of the next restock.
    #[must_use]
    pub fn preview(&self) -> &PreviewQueue {
        self.spawner.preview()
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == TurnPhase::BoardFull
    }

    /// First half of a click: demote and remember the current selection.
    ///
    /// A demoted selection stays remembered until the next activation
    /// commits, so repeated pre-activations keep the move armed.
    pub fn on_cell_pre_activated(&mut self) -> Result<()> {
        if self.is_game_over() {
            return Ok(());
        }
        if let Some(active) = self.grid.active_cell() {
            self.grid.unmark(active)?;
            self.previous_active = Some(active);
            self.allow_move = true;
        } else if !self.allow_move {
            self.previous_active = None;
            self.grid.clear_selection(Selection::MoveTarget);
        }
        trace!(previous = ?self.previous_active, armed = self.allow_move, "pre-activation");
        Ok(())
    }

    /// Second half of a click: commit it on `coord`.
    ///
    /// An off-board `coord` is an error; the selection demoted by the
    /// pre-activation is put back first.
    pub fn on_cell_activated(&mut self, coord: Coord) -> Result<Activation> {
        let coord = match coord.ensure_in_bounds() {
            Ok(coord) => coord,
            Err(err) => {
                self.restore_selection()?;
                return Err(err);
            }
        };
        if self.is_game_over() {
            return Ok(Activation::GameOver);
        }
        let armed = std::mem::take(&mut self.allow_move);

        if self.grid.color_at(coord)?.is_some() {
            return self.select(coord);
        }

        let source = match self.previous_active.take() {
            Some(source) if armed => source,
            _ => {
                self.phase = match self.grid.active_cell() {
                    Some(active) => TurnPhase::Selected(active),
                    None => TurnPhase::Idle,
                };
                trace!(%coord, "empty cell clicked with nothing armed");
                return Ok(Activation::Ignored);
            }
        };

        self.grid.mark(source, Selection::Active)?;
        self.grid.mark(coord, Selection::MoveTarget)?;
        self.phase = TurnPhase::AwaitingTarget { source, target: coord };
        self.attempt_move(source, coord)
    }

    /// Deliver a full click: pre-activation followed by activation.
    pub fn click(&mut self, coord: Coord) -> Result<Activation> {
        self.on_cell_pre_activated()?;
        self.on_cell_activated(coord)
    }

    /// Throw the current game away and start over.
    pub fn restart(&mut self) -> Result<SpawnReport> {
        self.grid.clear();
        self.score = 0;
        self.phase = TurnPhase::Idle;
        self.previous_active = None;
        self.allow_move = false;
        self.spawner.reseed_preview();
        let report = self
            .spawner
            .initial_fill(&mut self.grid, self.config.initial_markers)?;
        debug!("restart");
        self.notify(true);
        Ok(report)
    }

    fn restore_selection(&mut self) -> Result<()> {
        if std::mem::take(&mut self.allow_move) {
            if let Some(previous) = self.previous_active.take() {
                self.grid.mark(previous, Selection::Active)?;
            }
        }
        Ok(())
    }

    fn select(&mut self, coord: Coord) -> Result<Activation> {
        self.grid.clear_selection(Selection::Active);
        self.grid.mark(coord, Selection::Active)?;
        self.previous_active = None;
        self.phase = TurnPhase::Selected(coord);
        trace!(%coord, "selected");
        self.notify(false);
        Ok(Activation::Selected(coord))
    }

    fn attempt_move(&mut self, source: Coord, target: Coord) -> Result<Activation> {
        let color = self.grid.color_at(source)?;
        let path = PathValidator::new(&self.grid).find_path(source, target)?;

        self.grid.unmark(source)?;
        self.grid.unmark(target)?;

        let (Some(color), Some(path)) = (color, path) else {
            self.phase = TurnPhase::Idle;
            debug!(%source, %target, "move blocked");
            self.notify(true);
            return Ok(Activation::Blocked { source, target });
        };

        self.grid.set_color(target, Some(color))?;
        self.grid.set_color(source, None)?;
        self.phase = TurnPhase::Resolved;

        let resolved = self.scanner.resolve(&mut self.grid, target, color)?;
        let end = if resolved.is_bonus() {
            self.score = self.score.saturating_add(resolved.score_delta());
            debug!(
                %source, %target,
                combos = resolved.axes_cleared(),
                cleared = resolved.cleared_cell_count(),
                score = self.score,
                "bonus turn"
            );
            self.phase = TurnPhase::Idle;
            TurnEnd::Bonus(resolved)
        } else {
            let report = self.spawner.restock(&mut self.grid)?;
            if self.grid.is_full() {
                self.phase = TurnPhase::BoardFull;
                debug!(placed = report.placed_count(), score = self.score, "board full, game over");
                TurnEnd::BoardFull(report)
            } else {
                self.phase = TurnPhase::Idle;
                debug!(%source, %target, empty = self.grid.empty_count(), "restocked");
                TurnEnd::Restocked(report)
            }
        };

        self.notify(true);
        Ok(Activation::Moved(MoveReport {
            source,
            target,
            color,
            path,
            end,
        }))
    }

    fn notify(&mut self, demark: bool) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_board_changed(demark);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<bool>>>);

    impl BoardObserver for Recorder {
        fn on_board_changed(&mut self, demark: bool) {
            self.0.borrow_mut().push(demark);
        }
    }

    fn board(markers: &[((u8, u8), Color)]) -> Grid {
        let mut grid = Grid::new();
        for &((x, y), color) in markers {
            grid.set_color(Coord::new(x, y), Some(color)).unwrap();
        }
        grid
    }

    #[test]
    fn test_new_game_has_opening_markers() {
        let game = TurnController::new(LinesConfig::default()).unwrap();
        assert_eq!(game.grid().empty_count(), 78);
        assert_eq!(game.phase(), TurnPhase::Idle);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = LinesConfig::default().with_initial_markers(82);
        assert!(TurnController::new(config).is_err());
    }

    #[test]
    fn test_select_and_reselect() {
        let grid = board(&[((0, 0), Color::Red), ((5, 5), Color::Blue)]);
        let mut game = TurnController::with_grid(LinesConfig::default(), grid).unwrap();

        assert_eq!(game.click(Coord::new(0, 0)).unwrap(), Activation::Selected(Coord::new(0, 0)));
        assert_eq!(game.phase(), TurnPhase::Selected(Coord::new(0, 0)));

        assert_eq!(game.click(Coord::new(5, 5)).unwrap(), Activation::Selected(Coord::new(5, 5)));
        assert_eq!(game.grid().active_cell(), Some(Coord::new(5, 5)));
        assert!(game.grid().check_invariants().is_ok());

        // Clicking the selected marker again keeps it selected
        assert_eq!(game.click(Coord::new(5, 5)).unwrap(), Activation::Selected(Coord::new(5, 5)));
        assert_eq!(game.grid().active_cell(), Some(Coord::new(5, 5)));
    }

    #[test]
    fn test_empty_click_without_selection_is_ignored() {
        let grid = board(&[((0, 0), Color::Red)]);
        let mut game = TurnController::with_grid(LinesConfig::default(), grid.clone()).unwrap();

        assert_eq!(game.click(Coord::new(3, 3)).unwrap(), Activation::Ignored);
        assert_eq!(game.grid(), &grid);
        assert_eq!(game.phase(), TurnPhase::Idle);
    }

    #[test]
    fn test_activation_without_pre_activation_does_not_move() {
        let grid = board(&[((0, 0), Color::Red)]);
        let mut game = TurnController::with_grid(LinesConfig::default(), grid).unwrap();

        game.click(Coord::new(0, 0)).unwrap();
        let outcome = game.on_cell_activated(Coord::new(1, 0)).unwrap();

        assert_eq!(outcome, Activation::Ignored);
        assert_eq!(game.grid().color_at(Coord::new(0, 0)).unwrap(), Some(Color::Red));
        assert_eq!(game.phase(), TurnPhase::Selected(Coord::new(0, 0)));
    }

    #[test]
    fn test_plain_move_restocks() {
        let grid = board(&[((0, 0), Color::Red)]);
        let mut game = TurnController::with_grid(LinesConfig::default(), grid).unwrap();
        let queued: Vec<_> = game.preview().iter().collect();

        game.click(Coord::new(0, 0)).unwrap();
        let outcome = game.click(Coord::new(2, 3)).unwrap();

        let Activation::Moved(report) = outcome else {
            panic!("expected a move, got {outcome:?}");
        };
        assert_eq!(report.source, Coord::new(0, 0));
        assert_eq!(report.target, Coord::new(2, 3));
        assert_eq!(report.path.len(), 6);
        let TurnEnd::Restocked(spawn) = &report.end else {
            panic!("expected a restock, got {:?}", report.end);
        };
        let placed: Vec<_> = spawn.placed.iter().map(|&(_, c)| c).collect();
        assert_eq!(placed, queued);

        assert!(game.grid().is_empty_at(Coord::new(0, 0)).unwrap());
        assert_eq!(game.grid().color_at(Coord::new(2, 3)).unwrap(), Some(Color::Red));
        assert_eq!(game.grid().empty_count(), 81 - 4);
        assert_eq!(game.grid().active_cell(), None);
        assert_eq!(game.grid().move_target_cell(), None);
        assert_eq!(game.phase(), TurnPhase::Idle);
    }

    #[test]
    fn test_blocked_move_reverts_selection() {
        // (0,0) boxed in by (1,0) and (0,1)
        let grid = board(&[
            ((0, 0), Color::Red),
            ((1, 0), Color::Blue),
            ((0, 1), Color::Blue),
        ]);
        let mut game = TurnController::with_grid(LinesConfig::default(), grid.clone()).unwrap();

        game.click(Coord::new(0, 0)).unwrap();
        let outcome = game.click(Coord::new(8, 8)).unwrap();

        assert_eq!(
            outcome,
            Activation::Blocked {
                source: Coord::new(0, 0),
                target: Coord::new(8, 8)
            }
        );
        assert_eq!(game.grid(), &grid);
        assert_eq!(game.score(), 0);
        assert_eq!(game.phase(), TurnPhase::Idle);
    }

    #[test]
    fn test_observer_notifications() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let grid = board(&[((0, 0), Color::Red)]);
        let mut game = TurnController::with_grid(LinesConfig::default(), grid).unwrap();
        game.set_observer(Box::new(Recorder(Rc::clone(&log))));

        game.click(Coord::new(0, 0)).unwrap();
        game.click(Coord::new(1, 1)).unwrap();
        game.restart().unwrap();

        assert_eq!(*log.borrow(), vec![false, true, true]);
    }

    #[test]
    fn test_restart_resets_session() {
        let grid = board(&[
            ((0, 0), Color::Red),
            ((1, 0), Color::Red),
            ((2, 0), Color::Red),
            ((3, 0), Color::Red),
            ((4, 5), Color::Red),
        ]);
        let mut game = TurnController::with_grid(LinesConfig::default(), grid).unwrap();
        game.click(Coord::new(4, 5)).unwrap();
        game.click(Coord::new(4, 0)).unwrap();
        assert_eq!(game.score(), 5);

        let report = game.restart().unwrap();

        assert!(report.is_complete());
        assert_eq!(game.score(), 0);
        assert_eq!(game.grid().empty_count(), 78);
        assert_eq!(game.phase(), TurnPhase::Idle);
    }

    #[test]
    fn test_out_of_bounds_click_is_an_error() {
        let mut game = TurnController::new(LinesConfig::default()).unwrap();
        assert!(game.click(Coord::new(9, 0)).is_err());
    }

    #[test]
    fn test_failed_activation_restores_selection() {
        let grid = board(&[((0, 0), Color::Red)]);
        let mut game = TurnController::with_grid(LinesConfig::default(), grid).unwrap();
        game.click(Coord::new(0, 0)).unwrap();

        game.on_cell_pre_activated().unwrap();
        assert_eq!(game.grid().active_cell(), None);
        assert!(game.on_cell_activated(Coord::new(0, 9)).is_err());

        assert_eq!(game.grid().active_cell(), Some(Coord::new(0, 0)));
        assert_eq!(game.phase(), TurnPhase::Selected(Coord::new(0, 0)));

        // The selection still moves afterwards
        let outcome = game.click(Coord::new(0, 4)).unwrap();
        assert!(matches!(outcome, Activation::Moved(ref m) if m.source == Coord::new(0, 0)));
    }

    #[test]
    fn test_repeated_pre_activation_keeps_move_armed() {
        let grid = board(&[((3, 3), Color::Blue)]);
        let mut game = TurnController::with_grid(LinesConfig::default(), grid).unwrap();
        game.click(Coord::new(3, 3)).unwrap();

        game.on_cell_pre_activated().unwrap();
        game.on_cell_pre_activated().unwrap();
        let outcome = game.on_cell_activated(Coord::new(6, 3)).unwrap();

        assert!(matches!(outcome, Activation::Moved(ref m) if m.target == Coord::new(6, 3)));
        assert_eq!(game.grid().color_at(Coord::new(6, 3)).unwrap(), Some(Color::Blue));
    }

    #[test]
    fn test_restocks_over_several_turns() {
        let grid = board(&[((0, 0), Color::Red)]);
        let mut game = TurnController::with_grid(LinesConfig::default(), grid).unwrap();
        let mut marker = Coord::new(0, 0);

        for turn in 1..=5 {
            let queued: Vec<_> = game.preview().iter().collect();
            let target = game
                .grid()
                .empty_cells()
                .into_iter()
                .find(|&c| PathValidator::new(game.grid()).is_reachable(marker, c).unwrap())
                .unwrap();

            game.click(marker).unwrap();
            let outcome = game.click(target).unwrap();

            let Activation::Moved(report) = outcome else {
                panic!("expected a move, got {outcome:?}");
            };
            let TurnEnd::Restocked(spawn) = &report.end else {
                panic!("expected a restock, got {:?}", report.end);
            };
            let placed: Vec<_> = spawn.placed.iter().map(|&(_, c)| c).collect();
            assert_eq!(placed, queued);
            assert_eq!(game.grid().empty_count(), 80 - 3 * turn);
            marker = target;
        }
    }
}
