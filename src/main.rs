//! Stockroom - Inventory Tracker
//!
//! Keeps a list of products in a flat text file and offers a numbered
//! console menu to add, list, update and delete them, plus a low-stock report.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stockroom::application::App;
use stockroom::infrastructure::{Logger, DEFAULT_INVENTORY_FILE};
use stockroom::presentation::InputHandler;
use tracing::{warn, Level};

#[derive(Parser)]
#[command(name = "stockroom", about = "Single-user inventory tracker")]
struct Cli {
    /// Inventory file to load at startup and save on exit
    #[arg(short, long, default_value = DEFAULT_INVENTORY_FILE)]
    file: PathBuf,

    /// Log level for diagnostics written to stderr
    #[arg(long, default_value = "warn")]
    log_level: Level,
}

/// Entry point for the inventory tracker.
///
/// Loads the inventory file, runs the menu loop on stdin/stdout and saves on
/// exit.
///
/// # Errors
///
/// Returns an error if the console cannot be read or written. A failed final
/// save has already been reported on the console and still exits cleanly.
fn main() -> Result<()> {
    let cli = Cli::parse();
    Logger::init(cli.log_level);

    let mut app = App::load(cli.file);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    let saved = InputHandler::run(&mut app, &mut input, &mut output)
        .context("console input/output failed")?;
    if !saved {
        warn!(path = %app.path().display(), "exiting without a saved inventory");
    }
    Ok(())
}
