//! Round lifecycle: turn order, end detection, scoring and the computer turn.
//!
//! The controller is synchronous and owns every piece of round state. The
//! computer's move is deferred: when it becomes the computer's turn the
//! controller hands out an [`AiTicket`] and refuses human moves until that
//! ticket is completed with [`RoundController::complete_ai_move`]. Tickets
//! are tied to the round epoch, so a ticket issued before
//! [`RoundController::start_round`] can never touch the new board.

use super::advisor::AiAdvisor;
use super::events::{NullObserver, RoundObserver};
use super::invariants::{InvariantSet, RoundInvariants};
use super::rules::{self, WinningLine};
use super::score::{ScoreTally, ScoreTracker};
use super::{Board, Mark, Move, MoveError, Position, Snapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Mark played by the computer when AI mode is on.
pub const COMPUTER_MARK: Mark = Mark::O;

/// How a round finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundResult {
    /// A mark completed a triple.
    Winner(Mark),
    /// Board filled with no triple.
    Draw,
}

impl RoundResult {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            RoundResult::Winner(mark) => Some(*mark),
            RoundResult::Draw => None,
        }
    }
}

impl std::fmt::Display for RoundResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundResult::Winner(mark) => write!(f, "Winner: {}", mark),
            RoundResult::Draw => write!(f, "Draw!"),
        }
    }
}

/// Whether the round still accepts moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundStatus {
    /// Moves are accepted.
    Active,
    /// Round is over.
    Ended(RoundResult),
}

impl RoundStatus {
    /// True while moves are accepted.
    pub fn is_active(&self) -> bool {
        matches!(self, RoundStatus::Active)
    }

    /// The result once the round has ended.
    pub fn result(&self) -> Option<RoundResult> {
        match self {
            RoundStatus::Active => None,
            RoundStatus::Ended(result) => Some(*result),
        }
    }
}

/// Claim on a pending computer move.
///
/// Only the most recently issued ticket of the current epoch is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct AiTicket {
    /// Round epoch the ticket was issued in.
    epoch: u64,
    /// Issue counter, unique per controller.
    serial: u64,
}

/// What an accepted move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The move that was applied.
    pub played: Move,
    /// Round status after the move.
    pub status: RoundStatus,
    /// Set when the move handed the turn to the computer.
    pub ai_ticket: Option<AiTicket>,
}

/// Serializable picture of a round for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundView {
    /// Board cells.
    pub board: Snapshot,
    /// Mark to move (or the last mover once ended).
    pub turn: Mark,
    /// Round status.
    pub status: RoundStatus,
    /// Completed triple on a win.
    pub winning_triple: Option<[usize; 3]>,
    /// Tally across rounds.
    pub scores: ScoreTally,
    /// Whether O is played by the computer.
    pub ai_enabled: bool,
    /// Whether the computer is deciding.
    pub ai_thinking: bool,
    /// Round epoch.
    pub epoch: u64,
}

impl std::fmt::Display for RoundView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            RoundStatus::Active => write!(f, "Turn: {}", self.turn),
            RoundStatus::Ended(result) => write!(f, "{}", result),
        }
    }
}

/// Owns a round and the session tally.
pub struct RoundController {
    board: Board,
    turn: Mark,
    status: RoundStatus,
    winning_line: Option<WinningLine>,
    history: Vec<Move>,
    scores: ScoreTracker,
    ai_enabled: bool,
    pending_ai: Option<AiTicket>,
    epoch: u64,
    next_serial: u64,
    advisor: AiAdvisor,
    observer: Box<dyn RoundObserver>,
}

impl std::fmt::Debug for RoundController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundController")
            .field("board", &self.board)
            .field("turn", &self.turn)
            .field("status", &self.status)
            .field("history", &self.history)
            .field("scores", &self.scores)
            .field("ai_enabled", &self.ai_enabled)
            .field("pending_ai", &self.pending_ai)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl Default for RoundController {
    fn default() -> Self {
        Self::new(NullObserver)
    }
}

impl RoundController {
    /// Creates a controller with an active round, X to move, AI mode off.
    #[instrument(skip(observer))]
    pub fn new(observer: impl RoundObserver + 'static) -> Self {
        Self {
            board: Board::new(),
            turn: Mark::X,
            status: RoundStatus::Active,
            winning_line: None,
            history: Vec::new(),
            scores: ScoreTracker::new(),
            ai_enabled: false,
            pending_ai: None,
            epoch: 0,
            next_serial: 0,
            advisor: AiAdvisor::default(),
            observer: Box::new(observer),
        }
    }

    /// Replaces the advisor, e.g. with a seeded one.
    pub fn with_advisor(mut self, advisor: AiAdvisor) -> Self {
        self.advisor = advisor;
        self
    }

    // ─────────────────────────────────────────────────────────────
    //  Inbound operations
    // ─────────────────────────────────────────────────────────────

    /// Abandons the current round and starts a fresh one with X to move.
    ///
    /// Any outstanding [`AiTicket`] becomes stale.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn start_round(&mut self) {
        self.epoch += 1;
        self.pending_ai = None;
        self.board.reset();
        self.history.clear();
        self.turn = Mark::X;
        self.status = RoundStatus::Active;
        self.winning_line = None;
        info!(epoch = self.epoch, "Round started");

        self.observer.on_board_changed(self.board.snapshot());
        self.observer.on_turn_changed(self.turn);
    }

    /// Places `acting_mark` at `index`.
    ///
    /// With AI mode on, `acting_mark` must be the mark to move and can never
    /// be [`COMPUTER_MARK`]. With AI mode off the mark is taken from the turn
    /// and `acting_mark` is not checked.
    #[instrument(skip(self), fields(turn = %self.turn, ai = self.ai_enabled))]
    pub fn submit_move(
        &mut self,
        index: usize,
        acting_mark: Mark,
    ) -> Result<MoveOutcome, MoveError> {
        if self.pending_ai.is_some() {
            warn!(index, "Move rejected, computer is thinking");
            return Err(MoveError::AiTurnInProgress);
        }
        if !self.status.is_active() {
            warn!(index, "Move rejected, round is over");
            return Err(MoveError::RoundNotActive);
        }
        let position = Position::from_index(index).ok_or_else(|| {
            warn!(index, "Move rejected, index out of range");
            MoveError::OutOfRange(index)
        })?;

        let mark = if self.ai_enabled {
            if acting_mark == COMPUTER_MARK || acting_mark != self.turn {
                warn!(%acting_mark, "Move rejected, wrong turn");
                return Err(MoveError::WrongTurn(acting_mark));
            }
            acting_mark
        } else {
            self.turn
        };

        self.apply_move(Move::new(mark, position))
    }

    /// Places the mark whose turn it is at `index`.
    pub fn submit_current(&mut self, index: usize) -> Result<MoveOutcome, MoveError> {
        self.submit_move(index, self.turn)
    }

    /// Plays the computer's move for `ticket`.
    ///
    /// Returns `Ok(None)` without touching anything if the ticket is stale:
    /// issued before the last [`start_round`](Self::start_round), superseded,
    /// or cancelled by turning AI mode off.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn complete_ai_move(&mut self, ticket: AiTicket) -> Result<Option<MoveOutcome>, MoveError> {
        if self.pending_ai != Some(ticket) {
            debug!(?ticket, current = ?self.pending_ai, "Ignoring stale computer move");
            return Ok(None);
        }
        self.pending_ai = None;

        if !self.status.is_active() || !self.ai_enabled || self.turn != COMPUTER_MARK {
            debug!("Computer turn no longer applies");
            return Ok(None);
        }

        let snapshot = self.board.snapshot();
        let Some(index) = self
            .advisor
            .choose_move(&snapshot, COMPUTER_MARK, COMPUTER_MARK.opponent())
        else {
            return Ok(None);
        };
        let position = Position::from_index(index).ok_or(MoveError::OutOfRange(index))?;
        info!(%position, "Computer chose cell");

        self.apply_move(Move::new(COMPUTER_MARK, position)).map(Some)
    }

    /// Turns computer control of O on or off.
    ///
    /// Enabling while O is to move in an active round starts the computer
    /// turn at once and returns its ticket. Disabling cancels any pending
    /// computer turn.
    #[instrument(skip(self))]
    pub fn set_ai_mode(&mut self, enabled: bool) -> Option<AiTicket> {
        self.ai_enabled = enabled;
        info!(enabled, "AI mode changed");

        if !enabled {
            self.pending_ai = None;
            return None;
        }
        if self.status.is_active() && self.turn == COMPUTER_MARK && self.pending_ai.is_none() {
            return Some(self.begin_ai_turn());
        }
        None
    }

    /// Zeroes the tally.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        self.scores.reset();
        info!("Scores reset");
        self.observer.on_scores_changed(self.scores.snapshot());
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark to move (the last mover once the round has ended).
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Round status.
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// Completed triple of a won round.
    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winning_line
    }

    /// Tally across rounds.
    pub fn scores(&self) -> ScoreTally {
        self.scores.snapshot()
    }

    /// Moves played this round.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Number of rounds started so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether O is played by the computer.
    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    /// Whether a computer move is pending.
    pub fn is_ai_thinking(&self) -> bool {
        self.pending_ai.is_some()
    }

    /// The pending computer move, if any.
    pub fn pending_ai(&self) -> Option<AiTicket> {
        self.pending_ai
    }

    /// Serializable picture of the round.
    pub fn view(&self) -> RoundView {
        RoundView {
            board: self.board.snapshot(),
            turn: self.turn,
            status: self.status,
            winning_triple: self.winning_line.map(|line| line.triple),
            scores: self.scores.snapshot(),
            ai_enabled: self.ai_enabled,
            ai_thinking: self.is_ai_thinking(),
            epoch: self.epoch,
        }
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    /// Applies a validated move and runs end-of-move evaluation.
    fn apply_move(&mut self, action: Move) -> Result<MoveOutcome, MoveError> {
        self.board
            .place(action.position.to_index(), action.mark)
            .inspect_err(|e| warn!(%action, error = %e, "Move rejected"))?;
        self.history.push(action);
        debug!(%action, "Move applied");
        self.observer.on_board_changed(self.board.snapshot());

        let snapshot = self.board.snapshot();
        let mut ai_ticket = None;
        if let Some(line) = rules::evaluate(&snapshot) {
            self.winning_line = Some(line);
            self.end_round(RoundResult::Winner(line.mark));
        } else if self.board.is_full() {
            self.end_round(RoundResult::Draw);
        } else {
            self.turn = self.turn.opponent();
            self.observer.on_turn_changed(self.turn);
            if self.ai_enabled && self.turn == COMPUTER_MARK {
                ai_ticket = Some(self.begin_ai_turn());
            }
        }

        #[cfg(debug_assertions)]
        RoundInvariants::check_all(self).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        Ok(MoveOutcome {
            played: action,
            status: self.status,
            ai_ticket,
        })
    }

    fn end_round(&mut self, result: RoundResult) {
        self.status = RoundStatus::Ended(result);
        match result {
            RoundResult::Winner(mark) => self.scores.record_win(mark),
            RoundResult::Draw => self.scores.record_draw(),
        }
        info!(%result, epoch = self.epoch, "Round ended");

        self.observer
            .on_round_ended(result, self.winning_line.map(|line| line.triple));
        self.observer.on_scores_changed(self.scores.snapshot());
    }

    fn begin_ai_turn(&mut self) -> AiTicket {
        let ticket = AiTicket {
            epoch: self.epoch,
            serial: self.next_serial,
        };
        self.next_serial += 1;
        self.pending_ai = Some(ticket);
        debug!(?ticket, "Computer turn pending");
        ticket
    }
}
