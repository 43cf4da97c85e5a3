//! Strictly Rounds - tic-tac-toe round engine
//!
//! A 3x3 tic-tac-toe engine that keeps score across rounds and can play O
//! with a fixed-priority heuristic.
//!
//! # Architecture
//!
//! - **Board / rules**: cells, win and draw detection
//! - **Advisor**: rule-based computer opponent
//! - **Round controller**: turn order, round end, scoring, notifications
//! - **Session**: async driver that delays and cancels computer moves
//! - **Config**: TOML settings for a play session
//!
//! # Example
//!
//! ```
//! use strictly_rounds::{Mark, RoundController, RoundStatus};
//!
//! let mut round = RoundController::default();
//! for index in [0, 3, 1, 4, 2] {
//!     round.submit_current(index).unwrap();
//! }
//! assert!(matches!(round.status(), RoundStatus::Ended(_)));
//! assert_eq!(round.scores().wins(Mark::X), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod session;

/// Game implementations.
pub mod games;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Session
pub use session::{DEFAULT_AI_DELAY, GameSession};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    AiAdvisor, AiTicket, Board, COMPUTER_MARK, Cell, ChannelObserver, Mark, Move, MoveError,
    MoveOutcome, NullObserver, ParseBoardError, Position, RoundController, RoundEvent,
    RoundObserver, RoundResult, RoundStatus, RoundView, ScoreTally, ScoreTracker, Snapshot,
    WinningLine, choose_move,
};
