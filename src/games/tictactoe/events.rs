//! Notifications from a round to whoever renders it.

use super::round::RoundResult;
use super::score::ScoreTally;
use super::{Mark, Snapshot};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

/// Messages sent from the round controller to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    /// Board contents changed.
    BoardChanged {
        /// Cells after the change.
        board: Snapshot,
    },
    /// A new mark is to move.
    TurnChanged {
        /// Mark to move.
        mark: Mark,
    },
    /// The round finished.
    RoundEnded {
        /// How it finished.
        result: RoundResult,
        /// Completed triple on a win.
        winning_triple: Option<[usize; 3]>,
    },
    /// The tally changed.
    ScoresChanged {
        /// Counters after the change.
        tally: ScoreTally,
    },
}

/// Receives round notifications.
///
/// Callbacks run synchronously inside the controller, so implementations
/// should hand work off rather than block.
pub trait RoundObserver: Send {
    /// Board contents changed.
    fn on_board_changed(&mut self, board: Snapshot);
    /// The round finished.
    fn on_round_ended(&mut self, result: RoundResult, winning_triple: Option<[usize; 3]>);
    /// The tally changed.
    fn on_scores_changed(&mut self, tally: ScoreTally);
    /// A new mark is to move.
    fn on_turn_changed(&mut self, mark: Mark);
}

/// Observer that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl RoundObserver for NullObserver {
    fn on_board_changed(&mut self, _board: Snapshot) {}
    fn on_round_ended(&mut self, _result: RoundResult, _winning_triple: Option<[usize; 3]>) {}
    fn on_scores_changed(&mut self, _tally: ScoreTally) {}
    fn on_turn_changed(&mut self, _mark: Mark) {}
}

/// Observer that forwards notifications as [`RoundEvent`]s over a channel.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    event_tx: mpsc::UnboundedSender<RoundEvent>,
}

impl ChannelObserver {
    /// Wraps the sending half of an event channel.
    pub fn new(event_tx: mpsc::UnboundedSender<RoundEvent>) -> Self {
        Self { event_tx }
    }

    /// Creates an observer together with its receiving half.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RoundEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        (Self::new(event_tx), event_rx)
    }

    fn send(&self, event: RoundEvent) {
        // A closed receiver only means nobody is watching any more.
        if self.event_tx.send(event).is_err() {
            warn!("Round event dropped, receiver closed");
        }
    }
}

impl RoundObserver for ChannelObserver {
    fn on_board_changed(&mut self, board: Snapshot) {
        self.send(RoundEvent::BoardChanged { board });
    }

    fn on_round_ended(&mut self, result: RoundResult, winning_triple: Option<[usize; 3]>) {
        self.send(RoundEvent::RoundEnded {
            result,
            winning_triple,
        });
    }

    fn on_scores_changed(&mut self, tally: ScoreTally) {
        self.send(RoundEvent::ScoresChanged { tally });
    }

    fn on_turn_changed(&mut self, mark: Mark) {
        self.send(RoundEvent::TurnChanged { mark });
    }
}
