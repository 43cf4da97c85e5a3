//! Rule-based computer opponent.
//!
//! The advisor never searches ahead. It walks a fixed list of priorities
//! and takes the first one that yields a cell.

use super::rules::is_win_for;
use super::types::{Cell, Mark, Snapshot, empty_indices};
use super::Position;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Picks a cell for `self_mark`, or `None` on a full board.
///
/// Priorities, first match wins:
/// 1. a cell that completes a triple for `self_mark` (lowest index)
/// 2. a cell that blocks a triple for `opponent_mark` (lowest index)
/// 3. the center
/// 4. a random empty corner
/// 5. a random empty edge
/// 6. the lowest empty cell
#[instrument(skip(snapshot, rng))]
pub fn choose_move<R: Rng + ?Sized>(
    snapshot: &Snapshot,
    self_mark: Mark,
    opponent_mark: Mark,
    rng: &mut R,
) -> Option<usize> {
    let empties = empty_indices(snapshot);
    if empties.is_empty() {
        return None;
    }

    if let Some(index) = find_winning_move(snapshot, self_mark) {
        debug!(index, "Taking winning cell");
        return Some(index);
    }
    if let Some(index) = find_winning_move(snapshot, opponent_mark) {
        debug!(index, "Blocking opponent");
        return Some(index);
    }

    let center = Position::Center.to_index();
    if snapshot[center].is_empty() {
        return Some(center);
    }

    let open = Position::open_in(snapshot);
    for group in [Position::CORNERS, Position::EDGES] {
        let candidates: Vec<usize> = group
            .iter()
            .filter(|pos| open.contains(pos))
            .map(|pos| pos.to_index())
            .collect();
        if let Some(&index) = candidates.choose(rng) {
            return Some(index);
        }
    }

    empties.first().copied()
}

/// First empty cell (ascending) that would complete a triple for `mark`.
pub fn find_winning_move(snapshot: &Snapshot, mark: Mark) -> Option<usize> {
    empty_indices(snapshot).into_iter().find(|&index| {
        let mut probe = *snapshot;
        probe[index] = Cell::Occupied(mark);
        is_win_for(&probe, mark)
    })
}

/// Advisor with its own seeded random source for tie-breaking.
#[derive(Debug, Clone)]
pub struct AiAdvisor {
    rng: StdRng,
    seed: u64,
}

impl AiAdvisor {
    /// Creates an advisor whose random choices are fixed by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates an advisor from a fresh random seed.
    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    /// Seed this advisor was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Picks a cell for `self_mark`; see [`choose_move`].
    pub fn choose_move(
        &mut self,
        snapshot: &Snapshot,
        self_mark: Mark,
        opponent_mark: Mark,
    ) -> Option<usize> {
        choose_move(snapshot, self_mark, opponent_mark, &mut self.rng)
    }
}

impl Default for AiAdvisor {
    fn default() -> Self {
        Self::from_random()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Board;

    fn snapshot(s: &str) -> Snapshot {
        s.parse::<Board>().unwrap().snapshot()
    }

    #[test]
    fn test_find_winning_move_scans_ascending() {
        // O can win at 2 (row) or 6 (column); 2 comes first.
        assert_eq!(find_winning_move(&snapshot("OO_O_____"), Mark::O), Some(2));
        assert_eq!(find_winning_move(&snapshot("OX_______"), Mark::O), None);
    }

    #[test]
    fn test_full_board_yields_none() {
        let mut advisor = AiAdvisor::new(7);
        assert_eq!(
            advisor.choose_move(&snapshot("XOXOXXOXO"), Mark::O, Mark::X),
            None
        );
    }

    #[test]
    fn test_same_seed_same_choice() {
        // Center taken, no threats: the pick is a random corner.
        let board = snapshot("____X____");
        let a = AiAdvisor::new(42).choose_move(&board, Mark::O, Mark::X);
        let b = AiAdvisor::new(42).choose_move(&board, Mark::O, Mark::X);
        assert_eq!(a, b);
        assert!(matches!(a, Some(0 | 2 | 6 | 8)));
    }
}
