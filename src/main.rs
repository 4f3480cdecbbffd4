//! Main entry point for locip
//!
//! Looks up IP addresses in a local GeoLite2 database, on ipinfo.io, or on
//! AbuseIPDB, depending on the shape of the arguments.

use clap::Parser;
use log::info;
use std::io;
use std::process::ExitCode;

mod backend;
mod batch;
mod cli;
mod config;
mod credential;
mod error;
mod output;
mod utils;

use cli::Cli;
use config::AppConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command line arguments
    let cli = Cli::parse();

    info!("Starting locip v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {:#}, using defaults", e);
        AppConfig::default()
    });

    // Execute CLI logic
    match cli.run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = cli::report_failure(&e, &mut io::stdout(), &mut io::stderr());
            ExitCode::FAILURE
        }
    }
}
