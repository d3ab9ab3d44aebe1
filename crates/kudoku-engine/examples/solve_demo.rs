//! Example demonstrating the engine facade and the backtracking solver.
//!
//! Parses a puzzle from an 81-cell grid string (digits 1-9 for clues; `.`,
//! `_`, or `0` for empty cells) and solves it, optionally animating each
//! search step to stdout.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example solve_demo
//! cargo run --example solve_demo -- --animate --delay-ms 10
//! cargo run --example solve_demo -- "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79"
//! ```

use std::{process, time::Duration};

use clap::Parser;
use kudoku_core::Board;
use kudoku_engine::{Engine, EngineObserver};
use kudoku_solver::SolveOutcome;

const DEFAULT_PUZZLE: &str = "
    53. .7. ...
    6.. 195 ...
    .98 ... .6.
    8.. .6. ..3
    4.. 8.3 ..1
    7.. .2. ..6
    .6. ... 28.
    ... 419 ..5
    ... .8. .79
";

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Puzzle as an 81-cell grid string. Defaults to a classic puzzle.
    grid: Option<String>,

    /// Print the board after every search step.
    #[arg(long)]
    animate: bool,

    /// Pacing delay between animated steps, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 50)]
    delay_ms: u64,
}

struct StepPrinter;

impl EngineObserver for StepPrinter {
    fn board_updated(&mut self, board: &Board, _show_possible_numbers: bool) {
        println!("{}", pretty(board));
        println!();
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let grid = args.grid.as_deref().unwrap_or(DEFAULT_PUZZLE);
    let board: Board = match grid.parse() {
        Ok(board) => board,
        Err(err) => {
            eprintln!("Invalid puzzle: {err}");
            process::exit(2);
        }
    };

    println!("Puzzle:");
    println!("{}", pretty(&board));
    println!();

    let mut engine = Engine::new(board);
    engine.set_step_delay(Duration::from_millis(args.delay_ms));
    if args.animate {
        engine.add_observer(Box::new(StepPrinter));
    }

    match engine.solve(args.animate).expect("no other solve is running") {
        SolveOutcome::Solved => {
            println!("Solution:");
            println!("{}", pretty(engine.board()));
        }
        SolveOutcome::Unsolvable => {
            println!("No solution exists for this puzzle.");
            process::exit(1);
        }
        SolveOutcome::Cancelled => unreachable!("synchronous solve is never cancelled"),
    }
}

fn pretty(board: &Board) -> String {
    let flat = board.to_string();
    flat.as_bytes()
        .chunks(9)
        .map(|row| {
            row.iter()
                .map(|&b| b as char)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
