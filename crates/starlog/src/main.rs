//! starlog: change log extraction from StarTeam history output
//!
//! Reads the text printed by StarTeam's history command from a file or stdin
//! and prints the reassembled change entries, newest first.

use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use starlog::app;
use starlog::config::{Config, InputSource};

fn main() -> Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    config.validate()?;
    debug!(?config, "Starting starlog");

    let stdout = io::stdout().lock();
    match config.input_source() {
        InputSource::File(path) => {
            let file = File::open(&path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            app::run(&config, BufReader::new(file), stdout)?;
        }
        InputSource::Stdin => {
            app::run(&config, io::stdin().lock(), stdout)?;
        }
    }

    Ok(())
}
