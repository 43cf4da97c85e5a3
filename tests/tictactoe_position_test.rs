//! Tests for tic-tac-toe positions and board basics.

use strictly_rounds::{Board, Cell, Mark, MoveError, Position, RoundController};

#[test]
fn test_position_to_index() {
    assert_eq!(Position::TopLeft.to_index(), 0);
    assert_eq!(Position::Center.to_index(), 4);
    assert_eq!(Position::BottomRight.to_index(), 8);
}

#[test]
fn test_position_from_index() {
    assert_eq!(Position::from_index(0), Some(Position::TopLeft));
    assert_eq!(Position::from_index(4), Some(Position::Center));
    assert_eq!(Position::from_index(8), Some(Position::BottomRight));
    assert_eq!(Position::from_index(9), None);
}

#[test]
fn test_valid_moves_empty_board() {
    let board = Board::new();
    assert_eq!(Position::valid_moves(&board).len(), 9);
}

#[test]
fn test_valid_moves_filters_occupied() {
    let mut board = Board::new();
    board.place(0, Mark::X).unwrap();
    board.place(4, Mark::O).unwrap();

    let valid = Position::valid_moves(&board);
    assert_eq!(valid.len(), 7);
    assert!(!valid.contains(&Position::TopLeft));
    assert!(!valid.contains(&Position::Center));
    assert!(valid.contains(&Position::BottomRight));
}

#[test]
fn test_out_of_range_move_leaves_board_unchanged() {
    let mut round = RoundController::default();
    round.submit_current(4).unwrap();
    let before = round.board().clone();

    assert_eq!(round.submit_current(9), Err(MoveError::OutOfRange(9)));
    assert_eq!(round.submit_move(42, Mark::O), Err(MoveError::OutOfRange(42)));
    assert_eq!(*round.board(), before);
    assert_eq!(round.turn(), Mark::O);
}

#[test]
fn test_occupied_cell_rejected_without_turn_change() {
    let mut round = RoundController::default();
    round.submit_current(4).unwrap();
    assert_eq!(round.submit_current(4), Err(MoveError::CellOccupied(4)));
    assert_eq!(round.turn(), Mark::O);
    assert_eq!(round.board().get(4), Ok(Cell::Occupied(Mark::X)));
    assert_eq!(round.history().len(), 1);
}
