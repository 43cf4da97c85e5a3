//! Tic-tac-toe: board, rules, computer opponent and round lifecycle.

mod action;
mod advisor;
mod events;
pub mod invariants;
mod position;
mod round;
pub mod rules;
mod score;
mod types;

pub use action::{Move, MoveError};
pub use advisor::{AiAdvisor, choose_move, find_winning_move};
pub use events::{ChannelObserver, NullObserver, RoundEvent, RoundObserver};
pub use position::Position;
pub use round::{
    AiTicket, COMPUTER_MARK, MoveOutcome, RoundController, RoundResult, RoundStatus, RoundView,
};
pub use rules::{WIN_PATTERNS, WinningLine};
pub use score::{ScoreTally, ScoreTracker};
pub use types::{Board, CELL_COUNT, Cell, Mark, ParseBoardError, Snapshot, empty_indices};
