//! Single-threaded event loop around the session controller.

use crate::presenter::{Presenter, UiCommand};
use crate::session::{AiTicket, MoveOutcome, SessionController};
use crate::store::ScoreStore;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, instrument};

/// Feeds [`UiCommand`]s into a [`SessionController`] and fires deferred
/// computer moves after a pacing delay.
///
/// The pending computer move is a deadline held next to its ticket. A
/// reset or return to setup clears the controller's ticket, which drops
/// the deadline on the next turn of the loop; a deadline that fires for
/// an outdated ticket is rejected by the controller.
#[derive(Debug)]
pub struct GameDriver<P, S> {
    controller: SessionController<P, S>,
    ai_delay: Duration,
    scheduled: Option<(AiTicket, Instant)>,
}

impl<P: Presenter, S: ScoreStore> GameDriver<P, S> {
    /// Wraps `controller`, pausing `ai_delay` before each computer move.
    #[instrument(skip(controller))]
    pub fn new(controller: SessionController<P, S>, ai_delay: Duration) -> Self {
        Self {
            controller,
            ai_delay,
            scheduled: None,
        }
    }

    /// The wrapped controller.
    pub fn controller(&self) -> &SessionController<P, S> {
        &self.controller
    }

    /// Runs until [`UiCommand::Quit`] or until every sender is dropped,
    /// then hands the controller back.
    #[instrument(skip_all)]
    pub async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<UiCommand>,
    ) -> SessionController<P, S> {
        info!(ai_delay = ?self.ai_delay, "Starting game loop");

        loop {
            self.sync_schedule();
            let deadline = self.scheduled.map(|(_, at)| at);

            tokio::select! {
                command = commands.recv() => match command {
                    None | Some(UiCommand::Quit) => break,
                    Some(command) => self.dispatch(command),
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some((ticket, _)) = self.scheduled.take() {
                        self.fire(ticket);
                    }
                }
            }
        }

        info!("Game loop stopped");
        self.controller
    }

    /// Applies one inbound command.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, command: UiCommand) {
        match command {
            UiCommand::CellActivated(cell) => {
                self.controller.submit_move(cell);
            }
            UiCommand::StartSession {
                mode,
                name_x,
                name_o,
            } => {
                self.controller.start_with_names(mode, name_x, name_o);
            }
            UiCommand::Reset => {
                self.controller.reset_session();
            }
            UiCommand::ResetScores { confirmed } => {
                if confirmed {
                    self.controller.reset_scores();
                } else {
                    debug!("Score reset not confirmed");
                }
            }
            UiCommand::ReturnToSetup { confirmed } => {
                if confirmed {
                    self.controller.return_to_setup();
                } else {
                    debug!("Return to setup not confirmed");
                }
            }
            UiCommand::Hint => {
                self.controller.hint();
            }
            UiCommand::Quit => {}
        }
    }

    fn sync_schedule(&mut self) {
        let pending = self.controller.pending_ai();
        match (pending, self.scheduled) {
            (Some(ticket), Some((scheduled, _))) if ticket == scheduled => {}
            (Some(ticket), _) => {
                debug!(?ticket, "Arming computer move");
                self.scheduled = Some((ticket, Instant::now() + self.ai_delay));
            }
            (None, Some((ticket, _))) => {
                debug!(?ticket, "Computer move cancelled");
                self.scheduled = None;
            }
            (None, None) => {}
        }
    }

    fn fire(&mut self, ticket: AiTicket) -> MoveOutcome {
        let outcome = self.controller.request_ai_move(ticket);
        debug!(?outcome, "Computer move fired");
        outcome
    }
}
