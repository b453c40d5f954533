//! Pure tic-tac-toe game logic.
//!
//! - [`Board`]: nine cells, move validation, activity flag
//! - [`rules`]: winning triples and [`Outcome`] evaluation
//! - [`MinimaxAi`]: exhaustive minimax for the computer player
//!
//! Nothing in this crate performs I/O.
//!
//! ```
//! use noughts_core::{Board, Mark, MinimaxAi, Outcome, evaluate};
//!
//! let board: Board = "XX. OO. X..".parse().unwrap();
//! assert_eq!(evaluate(&board), Outcome::Ongoing);
//! // O to move wins on the middle row.
//! assert_eq!(MinimaxAi::new(Mark::O).find_best_move(&board), Some(5));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ai;
mod position;
pub mod rules;
mod types;

pub use ai::{MinimaxAi, WIN_SCORE};
pub use position::Position;
pub use rules::{Outcome, TRIPLES, Triple, check_winner, evaluate};
pub use types::{Board, CELL_COUNT, Cell, Mark, ParseBoardError};
