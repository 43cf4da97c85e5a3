//! Line-based terminal presentation.
//!
//! Reads commands from stdin, forwards them to a [`GameSession`] and prints
//! the round events it emits.

use anyhow::Result;
use strictly_rounds::{
    AiAdvisor, Board, ChannelObserver, GameConfig, GameSession, Mark, Position, RoundController,
    RoundEvent,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, instrument};

const HELP: &str = "\
Commands:
  1-9 or a label (e.g. center)  place a mark
  n, new                        start a new round
  r, reset                      reset the score
  ai on | ai off                toggle the computer opponent
  b, board                      show the board
  h, help                       show this help
  q, quit                       leave";

/// A parsed line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Cell(usize),
    NewRound,
    ResetScores,
    Ai(bool),
    Board,
    Help,
    Quit,
    Unknown,
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim().to_lowercase();
        match line.as_str() {
            "n" | "new" => Input::NewRound,
            "r" | "reset" => Input::ResetScores,
            "ai on" => Input::Ai(true),
            "ai off" => Input::Ai(false),
            "b" | "board" => Input::Board,
            "h" | "help" | "?" => Input::Help,
            "q" | "quit" | "exit" => Input::Quit,
            other => match other.parse::<usize>() {
                // Cells are shown 1-based on the board.
                Ok(n) => Input::Cell(n.wrapping_sub(1)),
                Err(_) => Position::from_label(other)
                    .map(|pos| Input::Cell(pos.to_index()))
                    .unwrap_or(Input::Unknown),
            },
        }
    }
}

/// Runs an interactive session until `quit` or end of input.
#[instrument(skip(config))]
pub async fn run(config: GameConfig, json: bool) -> Result<()> {
    let (observer, mut events) = ChannelObserver::channel();
    let advisor = config.seed().map(AiAdvisor::new).unwrap_or_default();
    let mut controller = RoundController::new(observer).with_advisor(advisor);
    controller.set_ai_mode(*config.ai_enabled());
    let session = GameSession::new(controller, config.ai_delay());

    println!("{}\n", HELP);
    show_view(&session).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = Input::parse(&line);
        debug!(?input, "Input");

        match input {
            Input::Cell(index) => {
                let ai_enabled = session.view().await.ai_enabled;
                let result = if ai_enabled {
                    session.submit_move(index, Mark::X).await
                } else {
                    session.submit_current(index).await
                };
                match result {
                    Ok(outcome) => {
                        drain(&mut events, json)?;
                        if outcome.ai_ticket.is_some() {
                            println!("Computer is thinking...");
                            session.wait_for_ai().await;
                        }
                    }
                    Err(e) => println!("Rejected: {}", e),
                }
            }
            Input::NewRound => session.start_round().await,
            Input::ResetScores => session.reset_scores().await,
            Input::Ai(enabled) => {
                session.set_ai_mode(enabled).await;
                println!("Computer opponent {}", if enabled { "on" } else { "off" });
                session.wait_for_ai().await;
            }
            Input::Board => show_view(&session).await,
            Input::Help => println!("{}", HELP),
            Input::Quit => break,
            Input::Unknown => println!("Unknown command, type h for help"),
        }
        drain(&mut events, json)?;
    }

    Ok(())
}

/// Prints every event received so far.
fn drain(events: &mut UnboundedReceiver<RoundEvent>, json: bool) -> Result<()> {
    while let Ok(event) = events.try_recv() {
        if json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            render(&event);
        }
    }
    Ok(())
}

fn render(event: &RoundEvent) {
    match event {
        RoundEvent::BoardChanged { board } => println!("\n{}\n", Board::from(*board).display()),
        RoundEvent::TurnChanged { mark } => println!("Turn: {}", mark),
        RoundEvent::RoundEnded {
            result,
            winning_triple,
        } => match winning_triple {
            Some([a, b, c]) => println!("{} (cells {}-{}-{})", result, a + 1, b + 1, c + 1),
            None => println!("{}", result),
        },
        RoundEvent::ScoresChanged { tally } => println!("Score  {}", tally),
    }
}

async fn show_view(session: &GameSession) {
    let view = session.view().await;
    println!("{}\n", Board::from(view.board).display());
    println!("{}", view);
    println!("Score  {}", view.scores);
}
