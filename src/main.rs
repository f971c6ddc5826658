// src/main.rs

use anyhow::Result;
use clap::Parser;
use gitree::cli::Cli;
use gitree::config::ConfigBuilder;
use gitree::errors::Error;
use gitree::report::LogReporter;

fn main() -> Result<()> {
    // Initialize logging. Default to 'info' if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    log::debug!("Starting gitree v{}...", env!("CARGO_PKG_VERSION"));

    // --- Configuration & Execution ---
    let args = Cli::parse();
    let config = match ConfigBuilder::from_cli(args).build() {
        Ok(config) => config,
        Err(e @ Error::Config(_)) | Err(e @ Error::Io { .. }) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    log::debug!("Configuration built successfully: {:?}", config);

    let result = gitree::run(&config, &LogReporter);

    // --- Error Handling ---
    match result {
        Ok(summary) => {
            if summary.downloaded == 0 && summary.failed == 0 {
                log::warn!("No files were found to download.");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
