//! History consistency invariant: history length matches occupied cells.

use super::super::{Cell, RoundController};
use super::Invariant;

/// Invariant: history length equals number of occupied cells.
///
/// Every move in history corresponds to exactly one occupied cell.
pub struct HistoryConsistentInvariant;

impl Invariant<RoundController> for HistoryConsistentInvariant {
    fn holds(round: &RoundController) -> bool {
        let occupied_count = round
            .board()
            .snapshot()
            .iter()
            .filter(|c| **c != Cell::Empty)
            .count();

        round.history().len() == occupied_count
    }

    fn description() -> &'static str {
        "History length matches number of occupied cells"
    }
}
