//! Win detection logic for tic-tac-toe.

use crate::{Board, Mark};

/// Three cell indices that win when held by one mark.
pub type Triple = [usize; 3];

/// The 8 winning triples in canonical order: rows, columns, diagonals.
pub const TRIPLES: [Triple; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the winning mark and the first completed triple in canonical
/// order, or `None`.
pub fn check_winner(board: &Board) -> Option<(Mark, Triple)> {
    TRIPLES.iter().find_map(|&[a, b, c]| {
        let mark = board.mark_at(a)?;
        (board.mark_at(b) == Some(mark) && board.mark_at(c) == Some(mark))
            .then_some((mark, [a, b, c]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_every_triple_wins_for_both_marks() {
        for mark in [Mark::X, Mark::O] {
            for triple in TRIPLES {
                let mut board = Board::new();
                for i in triple {
                    board.apply_move(i, mark);
                }
                assert_eq!(check_winner(&board), Some((mark, triple)));
            }
        }
    }

    #[test]
    fn test_first_triple_in_canonical_order_is_reported() {
        // X holds the top row and the left column.
        let board: Board = "XXX XOO XOO".parse().unwrap();
        assert_eq!(check_winner(&board), Some((Mark::X, [0, 1, 2])));

        // Left column and main diagonal, no row.
        let board: Board = "XOO XXO XOX".parse().unwrap();
        assert_eq!(check_winner(&board), Some((Mark::X, [0, 3, 6])));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board: Board = "XX. OO. ...".parse().unwrap();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_mixed_triple_does_not_win() {
        let board: Board = "XOX ... ...".parse().unwrap();
        assert_eq!(check_winner(&board), None);
    }
}
