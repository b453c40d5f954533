//! Persistent win/draw counters.

use derive_new::new;
use noughts_core::{Mark, Outcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Win and draw counts across sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct ScoreLedger {
    /// Games won by X.
    #[serde(default)]
    pub x_wins: u32,
    /// Games won by O.
    #[serde(default)]
    pub o_wins: u32,
    /// Drawn games.
    #[serde(default)]
    pub draws: u32,
}

impl ScoreLedger {
    /// Counts a finished game. Ongoing outcomes are ignored.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Win { mark: Mark::X, .. } => self.x_wins = self.x_wins.saturating_add(1),
            Outcome::Win { mark: Mark::O, .. } => self.o_wins = self.o_wins.saturating_add(1),
            Outcome::Draw => self.draws = self.draws.saturating_add(1),
            Outcome::Ongoing => return,
        }
        debug!(ledger = ?self, "Outcome recorded");
    }

    /// Wins for `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
        }
    }

    /// Total finished games, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.x_wins
            .saturating_add(self.o_wins)
            .saturating_add(self.draws)
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Display for ScoreLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X {} | O {} | Draws {}", self.x_wins, self.o_wins, self.draws)
    }
}
