//! Computer opponent.

mod minimax;

pub use minimax::{MinimaxAi, WIN_SCORE};
