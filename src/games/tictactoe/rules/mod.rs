//! Game rules for tic-tac-toe.
//!
//! Pure functions over board snapshots. Rules are kept apart from board
//! storage so the advisor can probe hypothetical boards with them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{WIN_PATTERNS, WinningLine, evaluate, is_win_for};
