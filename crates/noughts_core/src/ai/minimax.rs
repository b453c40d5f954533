//! Full-depth minimax search.
//!
//! The 3x3 tree is small enough (at most 9! leaves) that the search
//! runs without pruning or memoization. Every public entry point clones
//! the caller's board and explores the clone, so the live board is never
//! touched.

use crate::rules::{Outcome, evaluate};
use crate::{Board, Mark};
use tracing::{debug, instrument};

/// Score of an immediate win. Deeper wins score `WIN_SCORE - depth`.
pub const WIN_SCORE: i32 = 10;

/// Minimax player for one mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimaxAi {
    ai_mark: Mark,
}

impl MinimaxAi {
    /// Creates a searcher playing `ai_mark` against its opponent.
    pub fn new(ai_mark: Mark) -> Self {
        Self { ai_mark }
    }

    /// Mark this searcher plays.
    pub fn ai_mark(&self) -> Mark {
        self.ai_mark
    }

    /// Mark of the opponent.
    pub fn human_mark(&self) -> Mark {
        self.ai_mark.opponent()
    }

    /// Picks the highest scoring empty cell.
    ///
    /// Ties go to the lowest index. Returns `None` only when the board
    /// has no empty cells.
    #[instrument(skip(self, board), fields(ai_mark = ?self.ai_mark, marks = board.mark_count()))]
    pub fn find_best_move(&self, board: &Board) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;
        for (cell, score) in self.score_moves(board) {
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((cell, score));
            }
        }
        debug!(?best, "Search finished");
        best.map(|(cell, _)| cell)
    }

    /// Scores every empty cell for the AI, in index order.
    pub fn score_moves(&self, board: &Board) -> Vec<(usize, i32)> {
        let mut work = board.clone();
        let empty: Vec<usize> = work.empty_cells().collect();
        empty
            .into_iter()
            .map(|cell| {
                work.place(cell, self.ai_mark);
                let score = self.search(&mut work, 0, false);
                work.clear(cell);
                (cell, score)
            })
            .collect()
    }

    /// Minimax value of `board` from the AI's point of view.
    ///
    /// `depth` is the number of plies already made below the root move;
    /// it shifts terminal scores so faster wins and slower losses rank
    /// higher.
    pub fn minimax(&self, board: &Board, depth: i32, is_maximizing: bool) -> i32 {
        let mut work = board.clone();
        self.search(&mut work, depth, is_maximizing)
    }

    fn search(&self, board: &mut Board, depth: i32, is_maximizing: bool) -> i32 {
        match evaluate(board) {
            Outcome::Win { mark, .. } if mark == self.ai_mark => return WIN_SCORE - depth,
            Outcome::Win { .. } => return depth - WIN_SCORE,
            Outcome::Draw => return 0,
            Outcome::Ongoing => {}
        }

        let (mark, mut best) = if is_maximizing {
            (self.ai_mark, i32::MIN)
        } else {
            (self.human_mark(), i32::MAX)
        };

        for cell in 0..board.cells().len() {
            if !board.is_empty(cell) {
                continue;
            }
            board.place(cell, mark);
            let score = self.search(board, depth + 1, !is_maximizing);
            board.clear(cell);

            best = if is_maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_board_has_no_move() {
        let board: Board = "XOX XOO OXX".parse().unwrap();
        assert_eq!(MinimaxAi::new(Mark::O).find_best_move(&board), None);
    }

    #[test]
    fn test_terminal_scores() {
        let ai = MinimaxAi::new(Mark::O);
        let o_won: Board = "OOO XX. X..".parse().unwrap();
        let x_won: Board = "XXX OO. ...".parse().unwrap();
        let draw: Board = "XOX XOO OXX".parse().unwrap();
        assert_eq!(ai.minimax(&o_won, 3, true), 7);
        assert_eq!(ai.minimax(&x_won, 3, true), -7);
        assert_eq!(ai.minimax(&draw, 3, false), 0);
    }

    #[test]
    fn test_prefers_faster_win() {
        // O can win now at 5 or set up a slower win elsewhere.
        let board: Board = "XX. OO. X..".parse().unwrap();
        let ai = MinimaxAi::new(Mark::O);
        assert_eq!(ai.find_best_move(&board), Some(5));
        let scores = ai.score_moves(&board);
        assert!(scores.contains(&(5, WIN_SCORE)));
    }

    #[test]
    fn test_score_moves_covers_every_empty_cell() {
        let board: Board = "X.. .O. ..X".parse().unwrap();
        let cells: Vec<usize> = MinimaxAi::new(Mark::O)
            .score_moves(&board)
            .into_iter()
            .map(|(cell, _)| cell)
            .collect();
        assert_eq!(cells, vec![1, 2, 3, 5, 6, 7]);
    }
}
