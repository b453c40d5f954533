//! Noughts - terminal tic-tac-toe.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use noughts::{
    AppConfig, ConsolePresenter, GameDriver, HELP, JsonFileStore, SessionController, UiCommand,
    parse_command,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    let config = load_config(&cli)?;
    let store = JsonFileStore::new(config.scores_path());
    let controller = SessionController::new(ConsolePresenter::stdout(), store)
        .with_name_defaults(config.names().clone());
    let driver = GameDriver::new(controller, config.ai_delay());

    println!("{}", HELP);
    let (tx, rx) = mpsc::unbounded_channel();
    let input = tokio::spawn(read_commands(tx));

    let controller = driver.run(rx).await;
    info!(ledger = %controller.ledger(), "Exiting");
    input.abort();
    Ok(())
}

/// Loads the config file if present, then applies CLI overrides.
#[instrument(skip(cli), fields(path = %cli.config.display()))]
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = if cli.config.exists() {
        AppConfig::from_file(&cli.config)?
    } else {
        debug!("Config file not found, using defaults");
        AppConfig::default()
    };

    if let Some(path) = &cli.scores {
        config.set_scores_path(path.clone());
    }
    if let Some(ms) = cli.ai_delay_ms {
        config.set_ai_delay_ms(ms);
    }
    Ok(config)
}

/// Reads stdin lines and forwards them as commands until `quit` or EOF.
async fn read_commands(tx: mpsc::UnboundedSender<UiCommand>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().eq_ignore_ascii_case("help") {
            println!("{}", HELP);
            continue;
        }
        match parse_command(&line) {
            Ok(command) => {
                let quit = command == UiCommand::Quit;
                if tx.send(command).is_err() || quit {
                    return Ok(());
                }
            }
            Err(message) => println!("{}", message),
        }
    }

    debug!("stdin closed");
    tx.send(UiCommand::Quit).ok();
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
