//! memo: command-line front end for StickyMemo.
//!
//! Opens a session on the configured data directory, unlocks it when a
//! password is given, and runs one subcommand.

mod cli;
mod commands;
mod logging;

use anyhow::{bail, Result};
use clap::Parser;
use memo_store::{Session, StoreConfig};
use std::process::ExitCode;
use tracing::debug;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let _log_guard = logging::init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn store_config(cli: &Cli) -> StoreConfig {
    let mut config = StoreConfig::from_env();
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(dir) = &cli.config_dir {
        config.config_dir = dir.clone();
    }
    config
}

async fn run(cli: Cli) -> Result<()> {
    let config = store_config(&cli);
    debug!(data_dir = %config.data_dir.display(), config_dir = %config.config_dir.display(), "Opening session");
    let mut session = Session::open(config).await;

    // Unlock before any command so user switches inside the command start
    // from a consistent state.
    if let Some(password) = cli.password.as_deref() {
        if session.is_encryption_enabled() && !session.unlock(password) {
            bail!("wrong password for '{}'", session.username());
        }
    }

    match cli.command {
        Commands::Users(cmd) => commands::users(&mut session, cmd).await,
        Commands::Notes(cmd) => commands::notes(&session, cmd).await,
        Commands::Password(cmd) => commands::password(&mut session, cmd).await,
        Commands::Path(cmd) => commands::path(&session, cmd).await,
        Commands::Settings(cmd) => commands::settings(&session, cmd).await,
        Commands::Backup(cmd) => commands::backup(&mut session, cmd).await,
    }
}
