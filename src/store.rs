//! Score ledger persistence.
//!
//! The controller treats every store as best-effort: errors are logged
//! and play continues with the in-memory ledger.

use crate::ledger::ScoreLedger;
use derive_more::{Display, Error};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Load/save contract for the score ledger.
pub trait ScoreStore {
    /// Reads the saved ledger. `Ok(None)` means nothing was saved yet.
    fn load_scores(&mut self) -> Result<Option<ScoreLedger>, StoreError>;

    /// Replaces the saved ledger.
    fn save_scores(&mut self, ledger: &ScoreLedger) -> Result<(), StoreError>;
}

/// Score store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}

/// Stores the ledger as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by `path`. The file is created on first save.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        debug!("Creating JsonFileStore");
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load_scores(&mut self) -> Result<Option<ScoreLedger>, StoreError> {
        if !self.path.exists() {
            debug!("No saved scores");
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let ledger: ScoreLedger = serde_json::from_str(&content)?;
        info!(%ledger, "Scores loaded");
        Ok(Some(ledger))
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn save_scores(&mut self, ledger: &ScoreLedger) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(ledger)?;
        std::fs::write(&self.path, content)?;
        debug!(%ledger, "Scores saved");
        Ok(())
    }
}

/// Keeps the ledger in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Option<ScoreLedger>,
    saves: usize,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `ledger`.
    pub fn with_scores(ledger: ScoreLedger) -> Self {
        Self {
            saved: Some(ledger),
            saves: 0,
        }
    }

    /// Last saved ledger.
    pub fn saved(&self) -> Option<&ScoreLedger> {
        self.saved.as_ref()
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ScoreStore for MemoryStore {
    fn load_scores(&mut self) -> Result<Option<ScoreLedger>, StoreError> {
        Ok(self.saved)
    }

    fn save_scores(&mut self, ledger: &ScoreLedger) -> Result<(), StoreError> {
        self.saved = Some(*ledger);
        self.saves += 1;
        Ok(())
    }
}
