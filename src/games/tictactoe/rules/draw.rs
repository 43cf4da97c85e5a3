//! Draw detection logic for tic-tac-toe.

use super::super::{Cell, Snapshot};
use super::win::evaluate;

/// Checks if the board is full (all squares occupied).
pub fn is_full(snapshot: &Snapshot) -> bool {
    snapshot.iter().all(|c| *c != Cell::Empty)
}

/// A full board with no winner.
pub fn is_draw(snapshot: &Snapshot) -> bool {
    is_full(snapshot) && evaluate(snapshot).is_none()
}
