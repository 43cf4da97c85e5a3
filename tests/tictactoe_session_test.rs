//! Tests for the async session and its deferred computer moves.

use std::time::Duration;
use strictly_rounds::{
    AiAdvisor, ChannelObserver, GameSession, Mark, MoveError, RoundController, RoundEvent,
};

fn vs_computer(delay_ms: u64) -> GameSession {
    let mut controller = RoundController::default().with_advisor(AiAdvisor::new(11));
    controller.set_ai_mode(true);
    GameSession::new(controller, Duration::from_millis(delay_ms))
}

fn marks_on(board: &[strictly_rounds::Cell]) -> usize {
    board.iter().filter(|cell| !cell.is_empty()).count()
}

#[tokio::test]
async fn test_computer_replies_after_delay() {
    let session = vs_computer(20);

    let outcome = session.submit_move(4, Mark::X).await.unwrap();
    assert!(outcome.ai_ticket.is_some());
    assert!(session.view().await.ai_thinking);

    session.wait_for_ai().await;
    let view = session.view().await;
    assert!(!view.ai_thinking);
    assert_eq!(view.turn, Mark::X);
    assert_eq!(marks_on(&view.board), 2);
}

#[tokio::test]
async fn test_human_moves_rejected_while_computer_thinks() {
    let session = vs_computer(50);
    session.submit_move(4, Mark::X).await.unwrap();

    assert_eq!(
        session.submit_move(0, Mark::X).await,
        Err(MoveError::AiTurnInProgress)
    );

    session.wait_for_ai().await;
    let view = session.view().await;
    let open = view
        .board
        .iter()
        .position(|cell| cell.is_empty())
        .expect("open cell");
    assert!(session.submit_move(open, Mark::X).await.is_ok());
}

#[tokio::test]
async fn test_new_round_cancels_pending_computer_move() {
    let session = vs_computer(200);
    session.submit_move(4, Mark::X).await.unwrap();

    session.start_round().await;
    tokio::time::sleep(Duration::from_millis(300)).await;

    let view = session.view().await;
    assert_eq!(marks_on(&view.board), 0);
    assert_eq!(view.turn, Mark::X);
    assert!(!view.ai_thinking);
    assert!(session.submit_move(0, Mark::X).await.is_ok());
}

#[tokio::test]
async fn test_enabling_ai_on_o_turn_starts_computer() {
    let controller = RoundController::default().with_advisor(AiAdvisor::new(2));
    let session = GameSession::new(controller, Duration::from_millis(10));
    session.submit_current(4).await.unwrap();
    assert_eq!(session.view().await.turn, Mark::O);

    session.set_ai_mode(true).await;
    session.wait_for_ai().await;

    let view = session.view().await;
    assert_eq!(view.turn, Mark::X);
    assert_eq!(marks_on(&view.board), 2);
}

#[tokio::test]
async fn test_events_reach_channel_observer() {
    let (observer, mut events) = ChannelObserver::channel();
    let mut controller = RoundController::new(observer).with_advisor(AiAdvisor::new(4));
    controller.set_ai_mode(true);
    let session = GameSession::new(controller, Duration::from_millis(10));

    session.submit_move(4, Mark::X).await.unwrap();
    session.wait_for_ai().await;

    let received: Vec<RoundEvent> = std::iter::from_fn(|| events.try_recv().ok()).collect();
    assert_eq!(received.len(), 4);
    assert!(matches!(received[0], RoundEvent::BoardChanged { .. }));
    assert_eq!(received[1], RoundEvent::TurnChanged { mark: Mark::O });
    assert!(matches!(received[2], RoundEvent::BoardChanged { .. }));
    assert_eq!(received[3], RoundEvent::TurnChanged { mark: Mark::X });
}
