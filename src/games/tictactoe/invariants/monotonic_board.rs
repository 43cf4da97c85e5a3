//! Monotonic board invariant: cells never change once set.

use super::super::{Board, RoundController};
use super::Invariant;

/// Invariant: board cells are monotonic (never overwritten).
///
/// Replaying the move history onto an empty board must succeed without
/// hitting an occupied cell and must reproduce the current board.
pub struct MonotonicBoardInvariant;

impl Invariant<RoundController> for MonotonicBoardInvariant {
    fn holds(round: &RoundController) -> bool {
        let mut reconstructed = Board::new();
        for mov in round.history() {
            if reconstructed
                .place(mov.position.to_index(), mov.mark)
                .is_err()
            {
                return false;
            }
        }
        reconstructed == *round.board()
    }

    fn description() -> &'static str {
        "Board cells are monotonic (never overwritten)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Mark;

    #[test]
    fn test_holds_after_moves() {
        let mut round = RoundController::default();
        for index in [4, 0, 8] {
            round.submit_current(index).unwrap();
        }
        assert!(MonotonicBoardInvariant::holds(&round));
    }

    #[test]
    fn test_detects_tampering() {
        let mut round = RoundController::default();
        round.submit_current(4).unwrap();
        round.board_mut().reset();
        round.board_mut().place(4, Mark::O).unwrap();
        assert!(!MonotonicBoardInvariant::holds(&round));
    }
}
