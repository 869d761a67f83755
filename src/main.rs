//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `page_details` library that handles:
//! - Command-line argument parsing and settings file loading
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, warn};
use std::process;

use page_details::config::Opt;
use page_details::error_handling::ConfigFileError;
use page_details::initialization::{init_crypto_provider, init_logger_with};
use page_details::{run_extraction, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let (config, file_error) = Config::from_cli(Opt::parse());

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match file_error {
        Some(e @ ConfigFileError::NotFound { .. }) => {
            warn!("{}. Using default settings.", e);
        }
        Some(e) => error!("{}. Using default settings.", e),
        None => {}
    }

    // Must run before the first TLS connection is made
    init_crypto_provider();

    match run_extraction(config).await {
        Ok(report) => {
            if report.processed < report.total_urls {
                println!(
                    "Stopped early: {} of {} URLs processed",
                    report.processed, report.total_urls
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("page_details error: {:#}", e);
            process::exit(1);
        }
    }
}
