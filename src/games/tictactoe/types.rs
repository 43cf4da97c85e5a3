//! Core domain types for tic-tac-toe.

use super::action::MoveError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// A symbol placed on the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Mark {
    /// Mark X (always opens a round).
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing placed yet.
    #[default]
    Empty,
    /// Cell holds a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }

    /// True if nothing has been placed here.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        Cell::Occupied(mark)
    }
}

/// Read-only copy of all nine cells in row-major order.
pub type Snapshot = [Cell; CELL_COUNT];

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: Snapshot,
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Returns the cell at `index`.
    ///
    /// # Errors
    ///
    /// [`MoveError::OutOfRange`] if `index` is not in `0..=8`.
    pub fn get(&self, index: usize) -> Result<Cell, MoveError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(MoveError::OutOfRange(index))
    }

    /// Places `mark` at `index`.
    ///
    /// Only succeeds on an empty cell; on failure the board is untouched.
    #[instrument(skip(self))]
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), MoveError> {
        if !self.get(index)?.is_empty() {
            return Err(MoveError::CellOccupied(index));
        }
        self.cells[index] = Cell::Occupied(mark);
        Ok(())
    }

    /// True if no cell is empty.
    pub fn is_full(&self) -> bool {
        super::rules::is_full(&self.cells)
    }

    /// Returns a copy of the cells.
    pub fn snapshot(&self) -> Snapshot {
        self.cells
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
    }

    /// Indices of empty cells in ascending order.
    pub fn empty_indices(&self) -> Vec<usize> {
        empty_indices(&self.cells)
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty cells show their 1-based number so a player can type it.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.cells[pos] {
                    Cell::Empty => (pos + 1).to_string(),
                    Cell::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl From<Snapshot> for Board {
    fn from(cells: Snapshot) -> Self {
        Self { cells }
    }
}

/// Indices of empty cells in a snapshot, ascending.
pub fn empty_indices(snapshot: &Snapshot) -> Vec<usize> {
    snapshot
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_empty())
        .map(|(index, _)| index)
        .collect()
}

/// Failure to read a board from text.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseBoardError {
    /// Wrong number of cell characters.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(usize),
    /// Unrecognised cell character.
    #[display("Unexpected cell character {:?}", _0)]
    BadCell(char),
}

impl std::error::Error for ParseBoardError {}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Reads nine cells: `X`/`O` (any case) or one of `_ . -` for empty.
    /// Whitespace, `|` and `,` are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|' && *c != ',')
            .map(|c| match c {
                'X' | 'x' => Ok(Cell::Occupied(Mark::X)),
                'O' | 'o' => Ok(Cell::Occupied(Mark::O)),
                '_' | '.' | '-' => Ok(Cell::Empty),
                other => Err(ParseBoardError::BadCell(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let cells: Snapshot = cells
            .try_into()
            .map_err(|v: Vec<Cell>| ParseBoardError::WrongLength(v.len()))?;
        Ok(Self { cells })
    }
}
