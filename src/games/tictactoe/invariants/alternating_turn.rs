//! Alternating turn invariant: marks alternate X, O, X, O, ...

use super::super::{Mark, RoundController};
use super::Invariant;

/// Invariant: marks alternate turns.
///
/// Move history must show X, O, X, O, ... and, while the round is active,
/// the mark to move must follow the last one played.
pub struct AlternatingTurnInvariant;

impl Invariant<RoundController> for AlternatingTurnInvariant {
    fn holds(round: &RoundController) -> bool {
        let history = round.history();

        if history.first().is_some_and(|first| first.mark != Mark::X) {
            return false;
        }
        if history.windows(2).any(|w| w[0].mark == w[1].mark) {
            return false;
        }
        if !round.status().is_active() {
            return true;
        }

        let expected_next = if history.len() % 2 == 0 { Mark::X } else { Mark::O };
        round.turn() == expected_next
    }

    fn description() -> &'static str {
        "Marks alternate turns (X, O, X, O, ...)"
    }
}
