//! Win/draw tally across rounds.

use super::Mark;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Read-only view of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreTally {
    /// Rounds won by X.
    pub x: u32,
    /// Rounds won by O.
    pub o: u32,
    /// Drawn rounds.
    pub draws: u32,
}

impl ScoreTally {
    /// Rounds counted since the last reset.
    pub fn total(&self) -> u32 {
        self.x + self.o + self.draws
    }

    /// Wins recorded for `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }
}

impl std::fmt::Display for ScoreTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X: {}  O: {}  Draws: {}", self.x, self.o, self.draws)
    }
}

/// Accumulates results until explicitly reset.
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    tally: ScoreTally,
}

impl ScoreTracker {
    /// Creates a tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a win for `mark`.
    #[instrument(skip(self))]
    pub fn record_win(&mut self, mark: Mark) {
        match mark {
            Mark::X => self.tally.x += 1,
            Mark::O => self.tally.o += 1,
        }
        debug!(tally = %self.tally, "Win recorded");
    }

    /// Counts a draw.
    #[instrument(skip(self))]
    pub fn record_draw(&mut self) {
        self.tally.draws += 1;
        debug!(tally = %self.tally, "Draw recorded");
    }

    /// Zeroes all counters.
    pub fn reset(&mut self) {
        self.tally = ScoreTally::default();
    }

    /// Current counters.
    pub fn snapshot(&self) -> ScoreTally {
        self.tally
    }
}
