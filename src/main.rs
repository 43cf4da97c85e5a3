//! Strictly Rounds - terminal front end
//!
//! Plays tic-tac-toe rounds on stdin/stdout, optionally against the
//! computer.

#![warn(missing_docs)]

mod cli;
mod terminal;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_rounds::{AiAdvisor, Board, GameConfig, Position};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Play {
            config,
            vs_cpu,
            two_player,
            delay_ms,
            seed,
            json,
        } => {
            let config = GameConfig::load_or_default(&config)?.with_overrides(
                Command::ai_override(vs_cpu, two_player),
                delay_ms,
                seed,
            );
            info!(?config, "Starting terminal game");
            terminal::run(config, json).await
        }
        Command::Advise { board, mark, seed } => run_advise(&board, mark, seed),
    }
}

/// Logs go to stderr so stdout stays the game display.
fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Prints the cell the advisor picks on `board` for `mark`.
#[instrument]
fn run_advise(board: &str, mark: strictly_rounds::Mark, seed: Option<u64>) -> Result<()> {
    let board: Board = board.parse()?;
    let mut advisor = seed.map(AiAdvisor::new).unwrap_or_default();

    println!("{}\n", board.display());
    match advisor
        .choose_move(&board.snapshot(), mark, mark.opponent())
        .and_then(Position::from_index)
    {
        Some(position) => println!(
            "{} plays cell {} ({})",
            mark,
            position.to_index() + 1,
            position
        ),
        None => println!("Board is full"),
    }
    Ok(())
}
