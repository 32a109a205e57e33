//! `shelf`: interactive personal library catalog.
//!
//! # Responsibility
//! - Resolve configuration from command-line arguments.
//! - Start file logging, open the catalog and run the menu session.

mod menu;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use menu::MenuSession;
use shelf_core::{flush_logging, init_logging, CatalogStore, ShelfConfig};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Keep a personal book catalog in a JSON file.
#[derive(Debug, Parser)]
#[command(name = "shelf", version, about)]
struct Cli {
    /// Backing file for the catalog (defaults to `library.json`).
    data_file: Option<PathBuf>,

    /// Directory for rotating log files (defaults to `logs/` next to the data file).
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    };
    flush_logging();
    code
}

fn run(cli: Cli) -> Result<()> {
    let config = ShelfConfig::resolve(cli.data_file, cli.log_dir, cli.log_level.as_deref())
        .context("invalid configuration")?;

    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("Warning: file logging disabled: {err}");
    }

    let mut store = CatalogStore::open_file(&config.data_file).with_context(|| {
        format!(
            "failed to load catalog from `{}`",
            config.data_file.display()
        )
    })?;
    info!(
        "event=session_start module=cli status=ok count={}",
        store.len()
    );

    let stdin = io::stdin();
    MenuSession::new(&mut store, stdin.lock(), io::stdout()).run()?;

    info!(
        "event=session_end module=cli status=ok count={}",
        store.len()
    );
    Ok(())
}
