//! Command-line interface for strictly_rounds.

use clap::{Parser, Subcommand};
use strictly_rounds::Mark;

/// Strictly Rounds - tic-tac-toe with a score tally and a computer opponent
#[derive(Parser, Debug)]
#[command(name = "strictly_rounds")]
#[command(about = "Tic-tac-toe rounds in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play rounds in the terminal
    Play {
        /// Path to the TOML config file (defaults used if missing)
        #[arg(short, long, default_value = "strictly_rounds.toml")]
        config: std::path::PathBuf,

        /// Let the computer play O
        #[arg(long, conflicts_with = "two_player")]
        vs_cpu: bool,

        /// Play both marks yourself
        #[arg(long)]
        two_player: bool,

        /// Computer thinking delay in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Seed for the computer's random choices
        #[arg(long)]
        seed: Option<u64>,

        /// Print round events as JSON lines instead of a drawn board
        #[arg(long)]
        json: bool,
    },

    /// Print the cell the computer would pick on a given board
    Advise {
        /// Nine cells, row-major: X, O, or one of `_ . -` for empty
        board: String,

        /// Mark the computer plays
        #[arg(short, long, default_value = "O", value_parser = parse_mark)]
        mark: Mark,

        /// Seed for the computer's random choices
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Command {
    /// AI mode requested on the command line, if any.
    pub fn ai_override(vs_cpu: bool, two_player: bool) -> Option<bool> {
        match (vs_cpu, two_player) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

fn parse_mark(s: &str) -> Result<Mark, String> {
    match s.trim() {
        "X" | "x" => Ok(Mark::X),
        "O" | "o" => Ok(Mark::O),
        other => Err(format!("expected X or O, got {:?}", other)),
    }
}
