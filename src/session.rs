//! Async game session: a round controller plus its deferred computer moves.

use crate::games::tictactoe::{
    AiTicket, Mark, MoveError, MoveOutcome, RoundController, RoundView,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Default pause before the computer plays.
pub const DEFAULT_AI_DELAY: Duration = Duration::from_millis(350);

/// Shared handle to a running game.
///
/// Human moves are applied immediately. When a move hands the turn to the
/// computer, a task is spawned that waits out the thinking delay and then
/// completes the controller's ticket. Starting a new round aborts that task,
/// and the controller ignores its ticket even if it has already woken.
#[derive(Debug, Clone)]
pub struct GameSession {
    controller: Arc<Mutex<RoundController>>,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
    ai_delay: Duration,
}

impl GameSession {
    /// Wraps `controller` with the given computer thinking delay.
    #[instrument(skip(controller))]
    pub fn new(controller: RoundController, ai_delay: Duration) -> Self {
        info!(?ai_delay, "Creating game session");
        Self {
            controller: Arc::new(Mutex::new(controller)),
            pending: Arc::new(Mutex::new(None)),
            ai_delay,
        }
    }

    /// Computer thinking delay.
    pub fn ai_delay(&self) -> Duration {
        self.ai_delay
    }

    /// Submits a human move; see [`RoundController::submit_move`].
    #[instrument(skip(self))]
    pub async fn submit_move(&self, index: usize, mark: Mark) -> Result<MoveOutcome, MoveError> {
        let outcome = self.controller.lock().await.submit_move(index, mark)?;
        if let Some(ticket) = outcome.ai_ticket {
            self.schedule(ticket).await;
        }
        Ok(outcome)
    }

    /// Submits a move for whichever mark is to move.
    #[instrument(skip(self))]
    pub async fn submit_current(&self, index: usize) -> Result<MoveOutcome, MoveError> {
        let outcome = self.controller.lock().await.submit_current(index)?;
        if let Some(ticket) = outcome.ai_ticket {
            self.schedule(ticket).await;
        }
        Ok(outcome)
    }

    /// Starts a new round, cancelling any pending computer move.
    #[instrument(skip(self))]
    pub async fn start_round(&self) {
        if let Some(handle) = self.pending.lock().await.take() {
            debug!("Aborting pending computer move");
            handle.abort();
        }
        self.controller.lock().await.start_round();
    }

    /// Zeroes the tally.
    pub async fn reset_scores(&self) {
        self.controller.lock().await.reset_scores();
    }

    /// Turns computer control of O on or off.
    #[instrument(skip(self))]
    pub async fn set_ai_mode(&self, enabled: bool) {
        let ticket = self.controller.lock().await.set_ai_mode(enabled);
        if let Some(ticket) = ticket {
            self.schedule(ticket).await;
        }
    }

    /// Current picture of the round.
    pub async fn view(&self) -> RoundView {
        self.controller.lock().await.view()
    }

    /// Waits until the pending computer move, if any, has run.
    pub async fn wait_for_ai(&self) {
        let handle = self.pending.lock().await.take();
        if let Some(handle) = handle
            && let Err(e) = handle.await
            && !e.is_cancelled()
        {
            warn!(error = %e, "Computer move task failed");
        }
    }

    async fn schedule(&self, ticket: AiTicket) {
        let controller = Arc::clone(&self.controller);
        let delay = self.ai_delay;
        debug!(?ticket, ?delay, "Scheduling computer move");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match controller.lock().await.complete_ai_move(ticket) {
                Ok(Some(outcome)) => debug!(played = %outcome.played, "Computer moved"),
                Ok(None) => debug!(?ticket, "Computer move discarded"),
                Err(e) => warn!(error = %e, "Computer move failed"),
            }
        });

        if let Some(previous) = self.pending.lock().await.replace(handle) {
            previous.abort();
        }
    }
}
