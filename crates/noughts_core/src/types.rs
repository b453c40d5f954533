//! Core domain types for tic-tac-toe.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// A player's mark.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, strum::EnumIter,
)]
pub enum Mark {
    /// First mark, always opens a session.
    X,
    /// Second mark, played by the computer in AI mode.
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

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell holding a mark.
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
}

/// 3x3 tic-tac-toe board.
///
/// Cells are stored row-major (0-8). An inactive board belongs to a
/// concluded game and rejects every move until [`Board::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
    active: bool,
}

impl Board {
    /// Creates a new empty, active board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
            active: true,
        }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Gets the mark at the given index, `None` when empty or out of range.
    pub fn mark_at(&self, index: usize) -> Option<Mark> {
        self.get(index).and_then(Cell::mark)
    }

    /// Checks if a cell exists and is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Places `mark` at `index`.
    ///
    /// Returns `false` without touching the board if the index is out of
    /// range, the cell is taken, or the board is inactive.
    #[instrument(level = "trace", skip(self))]
    pub fn apply_move(&mut self, index: usize, mark: Mark) -> bool {
        if !self.active || !self.is_empty(index) {
            return false;
        }
        self.cells[index] = Cell::Occupied(mark);
        true
    }

    /// True iff no empty cells remain.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// Clears every cell and reactivates the board.
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
        self.active = true;
    }

    /// Whether the board still accepts moves.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Marks the board as belonging to a concluded game.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Indices of empty cells in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| i)
    }

    /// Number of marks on the board.
    pub fn mark_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    // Lookahead writes go through these two so the search can work on a
    // concluded copy without flipping `active`.
    pub(crate) fn place(&mut self, index: usize, mark: Mark) {
        self.cells[index] = Cell::Occupied(mark);
    }

    pub(crate) fn clear(&mut self, index: usize) {
        self.cells[index] = Cell::Empty;
    }

    /// Formats the board as a human-readable grid. Empty cells show their
    /// 1-based number.
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

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Error parsing a board layout string.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseBoardError {
    /// A character that is neither a mark nor an empty-cell marker.
    #[display("Unexpected character {:?} in board layout", _0)]
    UnexpectedChar(#[error(not(source))] char),

    /// The layout does not describe exactly nine cells.
    #[display("Board layout has {} cells, expected 9", _0)]
    WrongLength(#[error(not(source))] usize),
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses a layout such as `"XO. .X. ..O"`.
    ///
    /// `X`/`O` are marks; `.`, `-`, `_` and digits are empty cells;
    /// whitespace, `|` and `/` are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(CELL_COUNT);
        for ch in s.chars() {
            match ch {
                'X' | 'x' => cells.push(Cell::Occupied(Mark::X)),
                'O' | 'o' => cells.push(Cell::Occupied(Mark::O)),
                '.' | '-' | '_' => cells.push(Cell::Empty),
                c if c.is_ascii_digit() => cells.push(Cell::Empty),
                c if c.is_whitespace() || c == '|' || c == '/' => {}
                c => return Err(ParseBoardError::UnexpectedChar(c)),
            }
        }
        let cells: [Cell; CELL_COUNT] = cells
            .try_into()
            .map_err(|v: Vec<Cell>| ParseBoardError::WrongLength(v.len()))?;
        Ok(Self {
            cells,
            active: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_move_sets_cell() {
        let mut board = Board::new();
        assert!(board.apply_move(4, Mark::X));
        assert_eq!(board.get(4), Some(Cell::Occupied(Mark::X)));
        assert_eq!(board.mark_count(), 1);
    }

    #[test]
    fn test_apply_move_rejects_occupied() {
        let mut board = Board::new();
        assert!(board.apply_move(0, Mark::X));
        assert!(!board.apply_move(0, Mark::O));
        assert_eq!(board.mark_at(0), Some(Mark::X));
    }

    #[test]
    fn test_apply_move_rejects_out_of_range() {
        let mut board = Board::new();
        assert!(!board.apply_move(9, Mark::X));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_inactive_board_rejects_moves() {
        let mut board = Board::new();
        board.deactivate();
        assert!(!board.apply_move(0, Mark::X));
        assert_eq!(board.mark_count(), 0);
    }

    #[test]
    fn test_reset_clears_and_reactivates() {
        let mut board: Board = "XOX OXO ...".parse().unwrap();
        board.deactivate();
        board.reset();
        assert!(board.is_active());
        assert_eq!(board.mark_count(), 0);
    }

    #[test]
    fn test_is_full() {
        let board: Board = "XOX XOO OXX".parse().unwrap();
        assert!(board.is_full());
        let board: Board = "XOX XOO OX.".parse().unwrap();
        assert!(!board.is_full());
    }

    #[test]
    fn test_empty_cells_in_index_order() {
        let board: Board = "X.O .X. O..".parse().unwrap();
        assert_eq!(board.empty_cells().collect::<Vec<_>>(), vec![1, 3, 5, 7, 8]);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "XO?......".parse::<Board>(),
            Err(ParseBoardError::UnexpectedChar('?'))
        );
        assert_eq!(
            "XO.".parse::<Board>(),
            Err(ParseBoardError::WrongLength(3))
        );
    }

    #[test]
    fn test_display_numbers_empty_cells() {
        let board: Board = "X.. .O. ...".parse().unwrap();
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }
}
