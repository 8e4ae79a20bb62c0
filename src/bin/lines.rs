//! Text shell for playing Color Lines in a terminal.
//!
//! Usage: cargo run --bin lines [--seed 7]
//!
//! Set `RUST_LOG=rust_lines=debug` to see engine decisions on stderr.

use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

use rust_lines::{
    Activation, BoardObserver, Coord, LinesConfig, TurnController, TurnEnd, BOARD_WIDTH,
};

const RULES: &str = "\
Move a marker by typing its column and row, then the column and row of an
empty cell it can reach through empty cells. Five or more of one color in a
row, column or diagonal vanish and score; you then move again. Otherwise
three new markers appear, shown in the preview. The game ends when the board
is full.";

#[derive(Parser, Debug)]
#[command(name = "lines")]
#[command(about = "Play Color Lines in the terminal", long_about = None)]
struct Args {
    /// Seed for marker colors and placement
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Click(Coord),
    Restart,
    Help,
    Quit,
}

fn parse_command(input: &str) -> Option<Command> {
    let mut words = input.split_whitespace();
    let first = words.next()?;
    match first {
        "q" | "quit" => return Some(Command::Quit),
        "r" | "restart" => return Some(Command::Restart),
        "h" | "help" => return Some(Command::Help),
        _ => {}
    }
    let x: u8 = first.parse().ok()?;
    let y: u8 = words.next()?.parse().ok()?;
    words.next().is_none().then_some(Command::Click(Coord::new(x, y)))
}

/// Marks the screen dirty when the engine reports a change.
struct Redraw(Rc<Cell<bool>>);

impl BoardObserver for Redraw {
    fn on_board_changed(&mut self, _demark: bool) {
        self.0.set(true);
    }
}

fn render(game: &TurnController) -> String {
    let mut out = String::from("  ");
    for x in 0..BOARD_WIDTH {
        out.push_str(&x.to_string());
    }
    out.push('\n');
    for (y, row) in game.grid().to_string().lines().enumerate() {
        out.push_str(&format!("{y} {row}\n"));
    }
    let preview: String = game.preview().iter().map(|c| c.symbol()).collect();
    out.push_str(&format!("score {}  next {preview}\n", game.score()));
    out
}

fn describe(outcome: &Activation) -> String {
    match outcome {
        Activation::Selected(c) => format!("selected {c}"),
        Activation::Ignored => "select a marker first".into(),
        Activation::Blocked { source, target } => format!("no path from {source} to {target}"),
        Activation::Moved(report) => match &report.end {
            TurnEnd::Bonus(cleared) => format!(
                "cleared {} markers, move again",
                cleared.cleared_cell_count()
            ),
            TurnEnd::Restocked(_) => format!("moved {} to {}", report.source, report.target),
            TurnEnd::BoardFull(_) => "board full, game over (r to restart)".into(),
        },
        Activation::GameOver => "game over (r to restart)".into(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = LinesConfig::default().with_seed(args.seed);
    let mut game = TurnController::new(config).context("failed to start game")?;

    let dirty = Rc::new(Cell::new(true));
    game.set_observer(Box::new(Redraw(Rc::clone(&dirty))));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        if dirty.replace(false) {
            write!(stdout, "{}", render(&game))?;
        }
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(Command::Help) => writeln!(stdout, "{RULES}")?,
            Some(Command::Restart) => {
                game.restart()?;
                writeln!(stdout, "new game")?;
            }
            Some(Command::Click(coord)) => match game.click(coord) {
                Ok(outcome) => writeln!(stdout, "{}", describe(&outcome))?,
                Err(err) => writeln!(stdout, "{err}")?,
            },
            None => writeln!(stdout, "commands: <x> <y>, r, h, q")?,
        }
    }

    writeln!(stdout, "final score {}", game.score())?;
    Ok(())
}
