//! Command-line interface for noughts.

use clap::Parser;
use std::path::PathBuf;

/// Noughts - tic-tac-toe against a friend or a perfect computer opponent
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe with a minimax opponent and a persistent score ledger", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, default_value = "noughts.toml")]
    pub config: PathBuf,

    /// Score ledger file (overrides the config file)
    #[arg(long)]
    pub scores: Option<PathBuf>,

    /// Pause before the computer moves, in milliseconds (overrides the config file)
    #[arg(long)]
    pub ai_delay_ms: Option<u64>,
}
