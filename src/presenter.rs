//! Contract with the presentation layer.
//!
//! Inbound requests arrive as [`UiCommand`]s; outbound updates go through
//! the [`Presenter`] hooks.

use crate::config::GameMode;
use crate::ledger::ScoreLedger;
use noughts_core::{Mark, Outcome, Position, Triple};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

/// Requests from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiCommand {
    /// A board cell (0-8) was activated.
    CellActivated(usize),
    /// Setup finished; start playing.
    StartSession {
        /// Who plays the second mark.
        mode: GameMode,
        /// Name entered for X.
        name_x: String,
        /// Name entered for O.
        name_o: String,
    },
    /// Clear the board and play again with the same configuration.
    Reset,
    /// Zero the score ledger.
    ResetScores {
        /// Whether the user confirmed.
        confirmed: bool,
    },
    /// Go back to setup.
    ReturnToSetup {
        /// Whether the user confirmed.
        confirmed: bool,
    },
    /// Suggest a move for the player to act.
    Hint,
    /// Stop the event loop.
    Quit,
}

/// End-of-game summary shown to the players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    /// How the game ended.
    pub outcome: Outcome,
    /// Display name of the winner, `None` for a draw.
    pub winner_name: Option<String>,
}

impl std::fmt::Display for GameReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.outcome, &self.winner_name) {
            (Outcome::Win { mark, .. }, Some(name)) => write!(f, "{} ({}) wins!", name, mark),
            (Outcome::Draw, _) => write!(f, "It's a draw!"),
            (outcome, _) => write!(f, "{}", outcome),
        }
    }
}

/// Render hooks the controller drives.
pub trait Presenter {
    /// Shows `mark` in `cell`, or clears it.
    fn render_cell(&mut self, cell: usize, mark: Option<Mark>);

    /// Shows whose turn it is.
    fn render_turn(&mut self, mark: Mark, name: &str);

    /// Shows the score ledger.
    fn render_scores(&mut self, ledger: &ScoreLedger);

    /// Highlights the winning triple.
    fn highlight_triple(&mut self, triple: Triple);

    /// Shows the end-of-game dialog.
    fn show_result(&mut self, report: &GameReport);

    /// Enables or disables board input.
    fn set_input_enabled(&mut self, enabled: bool);

    /// Shows the setup stage.
    fn show_setup(&mut self);

    /// Suggests a cell to the player.
    fn show_hint(&mut self, position: Position);
}

/// One outbound render update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiEvent {
    /// See [`Presenter::render_cell`].
    Cell {
        /// Cell index.
        cell: usize,
        /// Mark shown, `None` when cleared.
        mark: Option<Mark>,
    },
    /// See [`Presenter::render_turn`].
    Turn {
        /// Mark to move.
        mark: Mark,
        /// Display name of the player to move.
        name: String,
    },
    /// See [`Presenter::render_scores`].
    Scores(ScoreLedger),
    /// See [`Presenter::highlight_triple`].
    Highlight(Triple),
    /// See [`Presenter::show_result`].
    Result(GameReport),
    /// See [`Presenter::set_input_enabled`].
    InputEnabled(bool),
    /// See [`Presenter::show_setup`].
    Setup,
    /// See [`Presenter::show_hint`].
    Hint(Position),
}

/// Presenter that forwards every hook as a [`UiEvent`].
#[derive(Debug, Clone)]
pub struct ChannelPresenter {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl ChannelPresenter {
    /// Creates a presenter and the receiver for its events.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            warn!("UI event receiver dropped");
        }
    }
}

impl Presenter for ChannelPresenter {
    fn render_cell(&mut self, cell: usize, mark: Option<Mark>) {
        self.send(UiEvent::Cell { cell, mark });
    }

    fn render_turn(&mut self, mark: Mark, name: &str) {
        self.send(UiEvent::Turn {
            mark,
            name: name.to_string(),
        });
    }

    fn render_scores(&mut self, ledger: &ScoreLedger) {
        self.send(UiEvent::Scores(*ledger));
    }

    fn highlight_triple(&mut self, triple: Triple) {
        self.send(UiEvent::Highlight(triple));
    }

    fn show_result(&mut self, report: &GameReport) {
        self.send(UiEvent::Result(report.clone()));
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.send(UiEvent::InputEnabled(enabled));
    }

    fn show_setup(&mut self) {
        self.send(UiEvent::Setup);
    }

    fn show_hint(&mut self, position: Position) {
        self.send(UiEvent::Hint(position));
    }
}
