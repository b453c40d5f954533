//! Noughts - tic-tac-toe session layer.
//!
//! Game rules and the minimax opponent live in [`noughts_core`]; this
//! crate adds everything around a game:
//!
//! - **Session**: [`SessionController`] sequences turns, schedules the
//!   computer's moves and keeps the [`ScoreLedger`]
//! - **Driver**: [`GameDriver`] runs the controller on a single-threaded
//!   async event loop with a pacing delay for computer moves
//! - **Collaborators**: [`Presenter`] render hooks and [`ScoreStore`]
//!   persistence
//! - **Console**: a line-based terminal frontend
//!
//! # Example
//!
//! ```
//! use noughts::{ChannelPresenter, GameMode, MemoryStore, MoveOutcome, SessionConfig, SessionController};
//!
//! let (presenter, _events) = ChannelPresenter::new();
//! let mut session = SessionController::new(presenter, MemoryStore::new());
//! session.start_session(SessionConfig::new(GameMode::HumanVsAi, "Ada", ""));
//!
//! let MoveOutcome::AiScheduled(ticket) = session.submit_move(4) else {
//!     panic!("computer should answer");
//! };
//! session.request_ai_move(ticket);
//! assert_eq!(session.board().mark_count(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod console;
mod driver;
mod ledger;
mod presenter;
mod session;
mod store;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, GameMode, NameDefaults, SessionConfig};

// Crate-level exports - Score keeping
pub use ledger::ScoreLedger;
pub use store::{JsonFileStore, MemoryStore, ScoreStore, StoreError};

// Crate-level exports - Presentation contract
pub use console::{ConsolePresenter, HELP, parse_command};
pub use presenter::{ChannelPresenter, GameReport, Presenter, UiCommand, UiEvent};

// Crate-level exports - Session control
pub use driver::GameDriver;
pub use session::{AiTicket, MoveOutcome, Rejection, SessionController, SessionToken, Stage};

// Crate-level exports - Game types
pub use noughts_core::{Board, Cell, Mark, MinimaxAi, Outcome, Position, Triple};
