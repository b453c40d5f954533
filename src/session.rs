//! Game session controller.
//!
//! Owns the live board, turn, score ledger and the collaborators, and is
//! the only place game state changes. Stage machine:
//!
//! ```text
//! Setup -> Playing -> Concluded -> Playing   (reset_session)
//!                               -> Setup     (return_to_setup)
//! ```
//!
//! Computer moves are deferred: when the turn passes to the AI the
//! controller issues an [`AiTicket`] and disables input. Whoever drives
//! the controller redeems the ticket with [`SessionController::request_ai_move`]
//! after its pacing delay. Any reset in between bumps the session token,
//! so a late ticket is rejected instead of playing into a new game.

use crate::config::{GameMode, NameDefaults, SessionConfig};
use crate::ledger::ScoreLedger;
use crate::presenter::{GameReport, Presenter};
use crate::store::ScoreStore;
use derive_more::Display;
use noughts_core::{Board, CELL_COUNT, Mark, MinimaxAi, Outcome, Position, evaluate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Lifecycle stage of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Stage {
    /// Waiting for a configuration.
    Setup,
    /// Accepting moves.
    Playing,
    /// Game over; waiting for a reset or a return to setup.
    Concluded,
}

/// Generation counter identifying one game on the board.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[display("session#{}", _0)]
pub struct SessionToken(u64);

impl SessionToken {
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A scheduled computer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AiTicket {
    /// Game the move was scheduled for.
    pub token: SessionToken,
    /// Mark the computer will play.
    pub mark: Mark,
    /// Marks on the board when the move was scheduled.
    pub move_number: usize,
}

/// Why a move request did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Rejection {
    /// The session is in setup or concluded.
    #[display("not playing")]
    NotPlaying,
    /// The computer owns the current turn.
    #[display("computer's turn")]
    AiTurn,
    /// Input is disabled while a computer move is pending.
    #[display("input disabled")]
    InputDisabled,
    /// Out of range or occupied cell.
    #[display("invalid cell")]
    InvalidCell,
    /// The AI ticket no longer matches the session.
    #[display("stale AI ticket")]
    StaleTicket,
    /// The board had no empty cell for the computer.
    #[display("no move available")]
    NoMoveAvailable,
}

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Nothing changed.
    Ignored(Rejection),
    /// Move applied; `next` is to move.
    Continued {
        /// Mark to move next.
        next: Mark,
    },
    /// Move applied; the computer moves next once the ticket is redeemed.
    AiScheduled(AiTicket),
    /// Move applied and the game is over.
    Concluded(Outcome),
}

/// Drives one board through setup, play and conclusion.
#[derive(Debug)]
pub struct SessionController<P, S> {
    stage: Stage,
    config: Option<SessionConfig>,
    names: NameDefaults,
    board: Board,
    turn: Mark,
    ledger: ScoreLedger,
    token: SessionToken,
    pending_ai: Option<AiTicket>,
    input_enabled: bool,
    last_outcome: Option<Outcome>,
    presenter: P,
    store: S,
}

impl<P: Presenter, S: ScoreStore> SessionController<P, S> {
    /// Creates a controller in the setup stage.
    ///
    /// The ledger is loaded from `store`; a missing or unreadable ledger
    /// starts from zero.
    #[instrument(skip(presenter, store))]
    pub fn new(mut presenter: P, mut store: S) -> Self {
        let ledger = match store.load_scores() {
            Ok(Some(ledger)) => ledger,
            Ok(None) => ScoreLedger::default(),
            Err(e) => {
                warn!(error = %e, "Failed to load scores, starting from zero");
                ScoreLedger::default()
            }
        };
        info!(%ledger, "Creating session controller");

        presenter.render_scores(&ledger);
        presenter.show_setup();
        presenter.set_input_enabled(false);

        Self {
            stage: Stage::Setup,
            config: None,
            names: NameDefaults::default(),
            board: Board::new(),
            turn: Mark::X,
            ledger,
            token: SessionToken::default(),
            pending_ai: None,
            input_enabled: false,
            last_outcome: None,
            presenter,
            store,
        }
    }

    /// Replaces the names used for blank setup fields.
    pub fn with_name_defaults(mut self, names: NameDefaults) -> Self {
        self.names = names;
        self
    }

    /// Starts playing with `config`.
    ///
    /// Only valid from [`Stage::Setup`]; returns `false` otherwise. Names
    /// are re-validated and the AI mark fixed for the mode. The ledger is
    /// untouched.
    #[instrument(skip(self, config), fields(token = %self.token))]
    pub fn start_session(&mut self, config: SessionConfig) -> bool {
        if self.stage != Stage::Setup {
            debug!(stage = %self.stage, "Ignoring start request outside setup");
            return false;
        }

        let config = SessionConfig::with_defaults(
            *config.mode(),
            config.name_x().as_str(),
            config.name_o().as_str(),
            &self.names,
        );
        info!(
            mode = ?config.mode(),
            name_x = %config.name_x(),
            name_o = %config.name_o(),
            "Starting session"
        );
        self.config = Some(config);
        self.begin_game();
        true
    }

    /// Starts playing with names as typed at setup.
    ///
    /// Blank names take this controller's name defaults.
    pub fn start_with_names(
        &mut self,
        mode: GameMode,
        name_x: impl Into<String>,
        name_o: impl Into<String>,
    ) -> bool {
        let config = SessionConfig::with_defaults(mode, name_x, name_o, &self.names);
        self.start_session(config)
    }

    /// Plays the current human's mark at `cell`.
    ///
    /// Stray input (wrong stage, computer's turn, disabled input, bad
    /// cell) is ignored and reported as [`MoveOutcome::Ignored`].
    #[instrument(skip(self), fields(token = %self.token, turn = %self.turn))]
    pub fn submit_move(&mut self, cell: usize) -> MoveOutcome {
        if self.stage != Stage::Playing {
            return self.ignore(Rejection::NotPlaying);
        }
        if self.is_ai_turn() {
            return self.ignore(Rejection::AiTurn);
        }
        if !self.input_enabled {
            return self.ignore(Rejection::InputDisabled);
        }
        self.play(cell, self.turn)
    }

    /// Redeems a scheduled computer move.
    ///
    /// A ticket from an earlier game, or one that was already redeemed, is
    /// a no-op.
    #[instrument(skip(self), fields(token = %self.token))]
    pub fn request_ai_move(&mut self, ticket: AiTicket) -> MoveOutcome {
        let current = self.pending_ai == Some(ticket)
            && ticket.token == self.token
            && self.stage == Stage::Playing
            && self.turn == ticket.mark
            && self.is_ai_turn()
            && self.board.mark_count() == ticket.move_number;
        if !current {
            return self.ignore(Rejection::StaleTicket);
        }
        self.pending_ai = None;

        let Some(cell) = MinimaxAi::new(ticket.mark).find_best_move(&self.board) else {
            return self.ignore(Rejection::NoMoveAvailable);
        };
        info!(cell, mark = %ticket.mark, "Computer moves");

        let outcome = self.play(cell, ticket.mark);
        if let MoveOutcome::Continued { .. } = outcome {
            self.set_input(true);
        }
        outcome
    }

    /// Clears the board for a new game with the same configuration.
    ///
    /// Returns `false` in setup, where there is no configuration yet.
    #[instrument(skip(self), fields(token = %self.token))]
    pub fn reset_session(&mut self) -> bool {
        if self.stage == Stage::Setup {
            debug!("Ignoring reset during setup");
            return false;
        }
        info!("Resetting session");
        self.begin_game();
        true
    }

    /// Zeroes and saves the score ledger.
    ///
    /// The presentation layer is expected to have confirmed first.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        info!(previous = %self.ledger, "Resetting scores");
        self.ledger.reset();
        self.persist();
        self.presenter.render_scores(&self.ledger);
    }

    /// Abandons the current game and goes back to setup.
    #[instrument(skip(self), fields(token = %self.token))]
    pub fn return_to_setup(&mut self) {
        info!("Returning to setup");
        self.clear_board();
        self.token = self.token.next();
        self.config = None;
        self.stage = Stage::Setup;
        self.presenter.show_setup();
        self.set_input(false);
    }

    /// Best cell for the human to move, also sent to the presenter.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn hint(&mut self) -> Option<Position> {
        if self.stage != Stage::Playing || self.is_ai_turn() || !self.input_enabled {
            debug!("No hint outside a human turn");
            return None;
        }
        let position = MinimaxAi::new(self.turn)
            .find_best_move(&self.board)
            .and_then(Position::from_index)?;
        self.presenter.show_hint(position);
        Some(position)
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark to move.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Score ledger.
    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    /// Active configuration, `None` during setup.
    pub fn config(&self) -> Option<&SessionConfig> {
        self.config.as_ref()
    }

    /// Current session token.
    pub fn token(&self) -> SessionToken {
        self.token
    }

    /// Computer move waiting to be redeemed.
    pub fn pending_ai(&self) -> Option<AiTicket> {
        self.pending_ai
    }

    /// Whether board input is accepted.
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Outcome of the last concluded game on this board.
    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    /// Display name for `mark`.
    pub fn name_for(&self, mark: Mark) -> &str {
        match (&self.config, mark) {
            (Some(config), _) => config.name_for(mark),
            (None, Mark::X) => self.names.name_x(),
            (None, Mark::O) => self.names.name_o(),
        }
    }

    /// Presentation collaborator.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Persistence collaborator.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn is_ai_turn(&self) -> bool {
        self.config.as_ref().is_some_and(|c| c.is_ai(self.turn))
    }

    fn ignore(&self, reason: Rejection) -> MoveOutcome {
        debug!(%reason, stage = %self.stage, "Move ignored");
        MoveOutcome::Ignored(reason)
    }

    fn play(&mut self, cell: usize, mark: Mark) -> MoveOutcome {
        if !self.board.apply_move(cell, mark) {
            return self.ignore(Rejection::InvalidCell);
        }
        self.presenter.render_cell(cell, Some(mark));
        debug!(cell, %mark, board = %self.board.display(), "Move applied");

        let outcome = evaluate(&self.board);
        if outcome.is_terminal() {
            self.conclude(outcome);
            return MoveOutcome::Concluded(outcome);
        }

        self.turn = mark.opponent();
        self.render_turn();
        match self.schedule_ai() {
            Some(ticket) => MoveOutcome::AiScheduled(ticket),
            None => MoveOutcome::Continued { next: self.turn },
        }
    }

    fn schedule_ai(&mut self) -> Option<AiTicket> {
        if self.stage != Stage::Playing || !self.is_ai_turn() {
            return None;
        }
        let ticket = AiTicket {
            token: self.token,
            mark: self.turn,
            move_number: self.board.mark_count(),
        };
        debug!(?ticket, "Computer move scheduled");
        self.pending_ai = Some(ticket);
        self.set_input(false);
        Some(ticket)
    }

    fn conclude(&mut self, outcome: Outcome) {
        self.stage = Stage::Concluded;
        self.board.deactivate();
        self.pending_ai = None;
        self.last_outcome = Some(outcome);

        self.ledger.record(&outcome);
        self.persist();

        if let Some(triple) = outcome.triple() {
            self.presenter.highlight_triple(triple);
        }
        self.presenter.render_scores(&self.ledger);

        let report = GameReport {
            outcome,
            winner_name: outcome.winner().map(|mark| self.name_for(mark).to_string()),
        };
        info!(%report, ledger = %self.ledger, "Game concluded");
        self.presenter.show_result(&report);
        self.set_input(false);
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save_scores(&self.ledger) {
            warn!(error = %e, "Failed to save scores, keeping them in memory");
        }
    }

    fn begin_game(&mut self) {
        self.clear_board();
        self.token = self.token.next();
        self.stage = Stage::Playing;
        self.render_turn();
        self.set_input(true);
        self.schedule_ai();
    }

    fn clear_board(&mut self) {
        self.board.reset();
        self.turn = Mark::X;
        self.pending_ai = None;
        self.last_outcome = None;
        for cell in 0..CELL_COUNT {
            self.presenter.render_cell(cell, None);
        }
    }

    fn render_turn(&mut self) {
        let name = self.name_for(self.turn).to_string();
        self.presenter.render_turn(self.turn, &name);
    }

    fn set_input(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        self.presenter.set_input_enabled(enabled);
    }
}
