//! Line-oriented terminal frontend.

use crate::config::GameMode;
use crate::ledger::ScoreLedger;
use crate::presenter::{GameReport, Presenter, UiCommand};
use noughts_core::{Board, CELL_COUNT, Mark, Position, Triple};
use std::io::Write;
use tracing::{instrument, warn};

/// Help text listing console commands.
pub const HELP: &str = "\
Commands:
  new ai [name]            play X against the computer
  new hvh [name_x] [name_o]  two players on one board
  1-9 | <cell name>        play a cell (e.g. 5, center, top-left)
  hint                     suggest a move
  reset                    clear the board, same players
  reset-scores yes         zero the score ledger
  setup yes                back to setup
  quit";

/// Parses one line of console input.
///
/// Returns `Err` with a message for the player when the line is not a
/// command.
#[instrument]
pub fn parse_command(line: &str) -> Result<UiCommand, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("Type a command, or `help`.".to_string());
    };
    let rest: Vec<&str> = words.collect();
    let confirmed = matches!(rest.first(), Some(&"yes" | &"y"));

    match head.to_lowercase().as_str() {
        "new" | "start" => {
            let mode = rest
                .first()
                .and_then(|m| GameMode::parse(m))
                .ok_or_else(|| "Usage: new ai|hvh [name_x] [name_o]".to_string())?;
            let name_x = rest.get(1).copied().unwrap_or_default().to_string();
            let name_o = rest.get(2).copied().unwrap_or_default().to_string();
            Ok(UiCommand::StartSession {
                mode,
                name_x,
                name_o,
            })
        }
        "reset" | "again" => Ok(UiCommand::Reset),
        "reset-scores" => Ok(UiCommand::ResetScores { confirmed }),
        "setup" => Ok(UiCommand::ReturnToSetup { confirmed }),
        "hint" => Ok(UiCommand::Hint),
        "quit" | "exit" | "q" => Ok(UiCommand::Quit),
        _ => Position::parse_input(line)
            .map(|pos| UiCommand::CellActivated(pos.to_index()))
            .ok_or_else(|| format!("Unknown command {:?}. Type `help`.", line.trim())),
    }
}

/// Presenter printing to a writer, normally stdout.
#[derive(Debug)]
pub struct ConsolePresenter<W> {
    out: W,
    board: Board,
    highlight: Option<Triple>,
    input_enabled: bool,
}

impl ConsolePresenter<std::io::Stdout> {
    /// Presenter writing to stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsolePresenter<W> {
    /// Presenter writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            board: Board::new(),
            highlight: None,
            input_enabled: false,
        }
    }

    /// The writer.
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn line(&mut self, text: impl std::fmt::Display) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!(error = %e, "Console write failed");
        }
    }

    fn draw_board(&mut self) {
        let mut grid = self.board.display();
        if let Some(triple) = self.highlight {
            let marks: Vec<String> = triple.iter().map(|i| (i + 1).to_string()).collect();
            grid.push_str(&format!("\n(winning cells {})", marks.join(", ")));
        }
        self.line(grid);
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn render_cell(&mut self, cell: usize, mark: Option<Mark>) {
        if cell >= CELL_COUNT {
            return;
        }
        match mark {
            Some(mark) => {
                self.board.apply_move(cell, mark);
            }
            // Cells are only cleared all at once, for a fresh board.
            None => {
                self.board.reset();
                self.highlight = None;
            }
        }
    }

    fn render_turn(&mut self, mark: Mark, name: &str) {
        self.draw_board();
        self.line(format!("{} to move ({})", name, mark));
    }

    fn render_scores(&mut self, ledger: &ScoreLedger) {
        self.line(format!("Scores: {}", ledger));
    }

    fn highlight_triple(&mut self, triple: Triple) {
        self.highlight = Some(triple);
    }

    fn show_result(&mut self, report: &GameReport) {
        self.draw_board();
        self.line(format!("*** {} ***", report));
        self.line("`reset` to play again, `setup yes` to change players.");
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        if !enabled && self.input_enabled {
            self.line("...");
        }
        self.input_enabled = enabled;
    }

    fn show_setup(&mut self) {
        self.line("Setup: `new ai [name]` or `new hvh [name_x] [name_o]`.");
    }

    fn show_hint(&mut self, position: Position) {
        self.line(format!("Hint: {} ({})", position, position.to_index() + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cells() {
        assert_eq!(parse_command("5"), Ok(UiCommand::CellActivated(4)));
        assert_eq!(parse_command("top-left"), Ok(UiCommand::CellActivated(0)));
        assert_eq!(parse_command("bottom right"), Ok(UiCommand::CellActivated(8)));
        assert!(parse_command("12").is_err());
    }

    #[test]
    fn test_parse_new_session() {
        assert_eq!(
            parse_command("new ai Ada"),
            Ok(UiCommand::StartSession {
                mode: GameMode::HumanVsAi,
                name_x: "Ada".to_string(),
                name_o: String::new(),
            })
        );
        assert!(parse_command("new chess").is_err());
    }

    #[test]
    fn test_confirmation_words() {
        assert_eq!(
            parse_command("reset-scores yes"),
            Ok(UiCommand::ResetScores { confirmed: true })
        );
        assert_eq!(
            parse_command("reset-scores"),
            Ok(UiCommand::ResetScores { confirmed: false })
        );
        assert_eq!(
            parse_command("setup y"),
            Ok(UiCommand::ReturnToSetup { confirmed: true })
        );
    }

    #[test]
    fn test_presenter_draws_result() {
        let mut presenter = ConsolePresenter::new(Vec::new());
        for cell in [0, 1, 2] {
            presenter.render_cell(cell, Some(Mark::X));
        }
        presenter.highlight_triple([0, 1, 2]);
        presenter.show_result(&GameReport {
            outcome: noughts_core::Outcome::Win {
                mark: Mark::X,
                triple: [0, 1, 2],
            },
            winner_name: Some("Ada".to_string()),
        });
        let text = String::from_utf8(presenter.writer().clone()).unwrap();
        assert!(text.starts_with("X|X|X"));
        assert!(text.contains("winning cells 1, 2, 3"));
        assert!(text.contains("Ada (X) wins!"));
    }
}
