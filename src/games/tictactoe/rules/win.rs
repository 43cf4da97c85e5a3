//! Win detection logic for tic-tac-toe.

use super::super::{Cell, Mark, Snapshot};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The eight winning triples, scanned in this order.
pub const WIN_PATTERNS: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// A completed triple and the mark that completed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct WinningLine {
    /// The winning mark.
    pub mark: Mark,
    /// Cell indices of the triple.
    pub triple: [usize; 3],
}

/// Returns the first winning triple on the board, if any.
///
/// Patterns are checked in [`WIN_PATTERNS`] order and the first match is
/// returned.
#[instrument(level = "trace")]
pub fn evaluate(snapshot: &Snapshot) -> Option<WinningLine> {
    WIN_PATTERNS.iter().find_map(|&[a, b, c]| match snapshot[a] {
        Cell::Occupied(mark) if snapshot[b] == snapshot[a] && snapshot[c] == snapshot[a] => {
            Some(WinningLine::new(mark, [a, b, c]))
        }
        _ => None,
    })
}

/// True if `mark` holds any complete triple.
pub fn is_win_for(snapshot: &Snapshot, mark: Mark) -> bool {
    let cell = Cell::Occupied(mark);
    WIN_PATTERNS
        .iter()
        .any(|triple| triple.iter().all(|&i| snapshot[i] == cell))
}
