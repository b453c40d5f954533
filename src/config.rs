//! Session and application configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_core::Mark;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Who controls the second mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Two people share the board.
    HumanVsHuman,
    /// The computer plays the second mark.
    #[default]
    HumanVsAi,
}

impl GameMode {
    /// Returns the display label for this mode.
    pub fn label(self) -> &'static str {
        match self {
            Self::HumanVsHuman => "Human vs Human",
            Self::HumanVsAi => "Human vs Computer",
        }
    }

    /// Parses a short mode name (`ai`, `hvh`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ai" | "cpu" | "computer" | "hvc" | "human_vs_ai" => Some(Self::HumanVsAi),
            "hvh" | "pvp" | "human" | "human_vs_human" => Some(Self::HumanVsHuman),
            _ => None,
        }
    }
}

/// Display-name defaults used when a player leaves a name blank.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct NameDefaults {
    /// Default name for X.
    #[serde(default = "default_name_x")]
    name_x: String,
    /// Default name for a human O.
    #[serde(default = "default_name_o")]
    name_o: String,
    /// Default name for a computer O.
    #[serde(default = "default_ai_name")]
    ai_name: String,
}

fn default_name_x() -> String {
    "Player X".to_string()
}

fn default_name_o() -> String {
    "Player O".to_string()
}

fn default_ai_name() -> String {
    "Computer".to_string()
}

impl Default for NameDefaults {
    fn default() -> Self {
        Self {
            name_x: default_name_x(),
            name_o: default_name_o(),
            ai_name: default_ai_name(),
        }
    }
}

/// Configuration for one session, fixed between setup and the next
/// return to setup.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Who controls the second mark.
    mode: GameMode,
    /// Display name for X.
    name_x: String,
    /// Display name for O.
    name_o: String,
    /// Mark played by the computer, if any.
    ai_mark: Option<Mark>,
}

impl SessionConfig {
    /// Builds a configuration from setup input.
    ///
    /// Names are trimmed; blank names take the stock defaults. In AI mode
    /// the computer always plays O.
    #[instrument(skip(name_x, name_o))]
    pub fn new(mode: GameMode, name_x: impl Into<String>, name_o: impl Into<String>) -> Self {
        Self::with_defaults(mode, name_x, name_o, &NameDefaults::default())
    }

    /// Like [`SessionConfig::new`] with custom default names.
    #[instrument(skip(name_x, name_o, defaults))]
    pub fn with_defaults(
        mode: GameMode,
        name_x: impl Into<String>,
        name_o: impl Into<String>,
        defaults: &NameDefaults,
    ) -> Self {
        let ai_mark = match mode {
            GameMode::HumanVsAi => Some(Mark::O),
            GameMode::HumanVsHuman => None,
        };
        let fallback_o = if ai_mark.is_some() {
            defaults.ai_name()
        } else {
            defaults.name_o()
        };
        let config = Self {
            mode,
            name_x: or_default(name_x.into(), defaults.name_x()),
            name_o: or_default(name_o.into(), fallback_o),
            ai_mark,
        };
        debug!(?config, "Session configured");
        config
    }

    /// Display name of the player holding `mark`.
    pub fn name_for(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => &self.name_x,
            Mark::O => &self.name_o,
        }
    }

    /// Whether the computer plays `mark`.
    pub fn is_ai(&self, mark: Mark) -> bool {
        self.ai_mark == Some(mark)
    }
}

fn or_default(name: String, fallback: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Application settings, loadable from a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Pause before the computer's move is applied, in milliseconds.
    #[serde(default = "default_ai_delay_ms")]
    ai_delay_ms: u64,

    /// Where the score ledger is stored.
    #[serde(default = "default_scores_path")]
    scores_path: PathBuf,

    /// Names used for blank setup fields.
    #[serde(default)]
    names: NameDefaults,
}

fn default_ai_delay_ms() -> u64 {
    500
}

fn default_scores_path() -> PathBuf {
    PathBuf::from("scores.json")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ai_delay_ms: default_ai_delay_ms(),
            scores_path: default_scores_path(),
            names: NameDefaults::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(ai_delay_ms = config.ai_delay_ms, scores = %config.scores_path.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Pacing delay before an AI move.
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }

    /// Overrides the AI delay.
    pub fn set_ai_delay_ms(&mut self, ms: u64) {
        self.ai_delay_ms = ms;
    }

    /// Overrides the score file location.
    pub fn set_scores_path(&mut self, path: PathBuf) {
        self.scores_path = path;
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
