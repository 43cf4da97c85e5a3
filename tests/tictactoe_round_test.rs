//! Tests for the round lifecycle and score tally.

use strictly_rounds::{
    AiAdvisor, ChannelObserver, Mark, MoveError, RoundController, RoundEvent, RoundResult,
    RoundStatus, ScoreTally,
};

/// X O X / X O O / O X X, played without an earlier triple.
const DRAW_SEQUENCE: [usize; 9] = [0, 1, 2, 4, 3, 5, 7, 6, 8];

/// X takes the top row.
const X_WINS: [usize; 5] = [0, 3, 1, 4, 2];

/// O takes the middle row.
const O_WINS: [usize; 6] = [0, 3, 1, 4, 8, 5];

fn play(round: &mut RoundController, moves: &[usize]) {
    for &index in moves {
        round.submit_current(index).expect("legal move");
    }
}

#[test]
fn test_full_board_without_triple_is_a_draw() {
    let mut round = RoundController::default();
    play(&mut round, &DRAW_SEQUENCE[..8]);
    assert_eq!(round.scores().draws, 0);

    let outcome = round.submit_current(DRAW_SEQUENCE[8]).unwrap();
    assert_eq!(outcome.status, RoundStatus::Ended(RoundResult::Draw));
    assert_eq!(round.scores().draws, 1);
    assert_eq!(round.winning_line(), None);
    assert_eq!(round.view().to_string(), "Draw!");
}

#[test]
fn test_round_ends_exactly_once() {
    let mut round = RoundController::default();
    play(&mut round, &X_WINS);
    assert_eq!(round.submit_current(8), Err(MoveError::RoundNotActive));
    assert_eq!(round.submit_move(8, Mark::O), Err(MoveError::RoundNotActive));
    assert_eq!(round.scores().total(), 1);
}

#[test]
fn test_tally_accumulates_across_rounds_then_resets() {
    let mut round = RoundController::default();
    for _ in 0..3 {
        round.start_round();
        play(&mut round, &X_WINS);
    }
    for _ in 0..2 {
        round.start_round();
        play(&mut round, &O_WINS);
    }
    round.start_round();
    play(&mut round, &DRAW_SEQUENCE);

    assert_eq!(
        round.scores(),
        ScoreTally {
            x: 3,
            o: 2,
            draws: 1
        }
    );
    assert_eq!(round.scores().total(), 6);

    round.reset_scores();
    assert_eq!(round.scores(), ScoreTally::default());
}

#[test]
fn test_start_round_resets_board_and_turn() {
    let mut round = RoundController::default();
    play(&mut round, &[4, 0, 8]);
    let epoch = round.epoch();

    round.start_round();
    assert_eq!(round.epoch(), epoch + 1);
    assert_eq!(round.turn(), Mark::X);
    assert_eq!(round.status(), RoundStatus::Active);
    assert_eq!(round.board().empty_indices().len(), 9);
}

#[test]
fn test_start_round_discards_pending_computer_move() {
    let mut round = RoundController::default().with_advisor(AiAdvisor::new(3));
    round.set_ai_mode(true);
    let ticket = round
        .submit_move(4, Mark::X)
        .unwrap()
        .ai_ticket
        .expect("computer turn");

    round.start_round();
    assert!(!round.is_ai_thinking());
    assert_eq!(round.complete_ai_move(ticket), Ok(None));
    assert_eq!(round.board().empty_indices().len(), 9);
    assert!(round.history().is_empty());

    // The new round accepts the human straight away.
    assert!(round.submit_move(0, Mark::X).is_ok());
}

#[test]
fn test_ai_mode_requires_turn_mark() {
    let mut round = RoundController::default().with_advisor(AiAdvisor::new(3));
    round.set_ai_mode(true);
    let ticket = round.submit_move(4, Mark::X).unwrap().ai_ticket.unwrap();
    round.complete_ai_move(ticket).unwrap();

    // X to move again; O is the computer's.
    assert_eq!(round.turn(), Mark::X);
    assert_eq!(round.submit_move(0, Mark::O), Err(MoveError::WrongTurn(Mark::O)));
}

#[test]
fn test_games_against_computer_never_double_fill() {
    for seed in 0..32 {
        let mut round = RoundController::default().with_advisor(AiAdvisor::new(seed));
        round.set_ai_mode(true);

        while round.status().is_active() {
            // Human plays the highest free cell.
            let index = *round.board().empty_indices().last().expect("open cell");
            let outcome = round.submit_move(index, Mark::X).expect("legal move");
            if let Some(ticket) = outcome.ai_ticket {
                round.complete_ai_move(ticket).expect("computer move");
            }
        }

        let mut cells: Vec<usize> = round
            .history()
            .iter()
            .map(|m| m.position.to_index())
            .collect();
        let played = cells.len();
        cells.sort_unstable();
        cells.dedup();
        assert_eq!(cells.len(), played, "seed {} reused a cell", seed);
        assert_eq!(round.scores().total(), 1);
    }
}

#[test]
fn test_events_for_winning_move() {
    let (observer, mut events) = ChannelObserver::channel();
    let mut round = RoundController::new(observer);
    play(&mut round, &X_WINS[..4]);
    while events.try_recv().is_ok() {}

    round.submit_current(X_WINS[4]).unwrap();
    let received: Vec<RoundEvent> = std::iter::from_fn(|| events.try_recv().ok()).collect();

    assert_eq!(received.len(), 3);
    assert!(matches!(received[0], RoundEvent::BoardChanged { .. }));
    assert_eq!(
        received[1],
        RoundEvent::RoundEnded {
            result: RoundResult::Winner(Mark::X),
            winning_triple: Some([0, 1, 2]),
        }
    );
    assert_eq!(
        received[2],
        RoundEvent::ScoresChanged {
            tally: ScoreTally {
                x: 1,
                o: 0,
                draws: 0
            }
        }
    );
}
