//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Nothing here holds
//! state, so the search engine can call them freely during lookahead.

mod draw;
mod outcome;
mod win;

pub use draw::{is_draw, is_full};
pub use outcome::{Outcome, evaluate};
pub use win::{TRIPLES, Triple, check_winner};
