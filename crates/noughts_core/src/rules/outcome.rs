//! Unified board evaluation.

use super::win::{Triple, check_winner};
use crate::{Board, Mark};
use serde::{Deserialize, Serialize};

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No winner and at least one empty cell.
    Ongoing,
    /// `mark` holds every cell of `triple`.
    Win {
        /// The winning mark.
        mark: Mark,
        /// First completed triple in canonical order.
        triple: Triple,
    },
    /// Full board, no winner.
    Draw,
}

impl Outcome {
    /// True for `Win` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win { mark, .. } => Some(*mark),
            _ => None,
        }
    }

    /// Returns the winning triple if there is one.
    pub fn triple(&self) -> Option<Triple> {
        match self {
            Outcome::Win { triple, .. } => Some(*triple),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "In progress"),
            Outcome::Win { mark, .. } => write!(f, "{} wins", mark),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Evaluates `board`: a win (first triple in canonical order), then a
/// draw on a full board, otherwise ongoing.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((mark, triple)) = check_winner(board) {
        return Outcome::Win { mark, triple };
    }
    if board.is_full() {
        return Outcome::Draw;
    }
    Outcome::Ongoing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_is_ongoing() {
        assert_eq!(evaluate(&Board::new()), Outcome::Ongoing);
    }

    #[test]
    fn test_win_takes_priority_over_full_board() {
        let board: Board = "XOO OXX OXX".parse().unwrap();
        assert_eq!(
            evaluate(&board),
            Outcome::Win {
                mark: Mark::X,
                triple: [0, 4, 8]
            }
        );
    }

    #[test]
    fn test_full_board_without_triple_is_draw() {
        let board: Board = "XOX XOO OXX".parse().unwrap();
        assert_eq!(evaluate(&board), Outcome::Draw);
        assert!(evaluate(&board).is_terminal());
        assert_eq!(evaluate(&board).winner(), None);
    }

    #[test]
    fn test_evaluate_does_not_mutate() {
        let board: Board = "XO. .X. ..O".parse().unwrap();
        let before = board.clone();
        let first = evaluate(&board);
        assert_eq!(evaluate(&board), first);
        assert_eq!(board, before);
    }

    #[test]
    fn test_outcome_serializes() {
        let outcome = Outcome::Win {
            mark: Mark::O,
            triple: [2, 4, 6],
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"Win":{"mark":"O","triple":[2,4,6]}}"#);
    }
}
