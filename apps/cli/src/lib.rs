//! # Prescale CLI
//!
//! Thin front end over `prescale-core`.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CLI Startup Sequence                              │
//! │                                                                         │
//! │  1. Parse arguments (clap)           usage error → exit 2               │
//! │  2. Load CliConfig                   config error → exit 2              │
//! │  3. Initialize tracing (stderr)                                         │
//! │  4. Dispatch command                                                    │
//! │     ├── Resolution → stdout          exit 0                             │
//! │     └── ApiError   → stdout / stderr exit 1                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::commands::Outcome;
use crate::config::CliConfig;

/// Exit status for configuration and startup failures (same as clap usage errors).
const EXIT_CONFIG: u8 = 2;

/// Runs the CLI and maps the outcome to a process exit status.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(EXIT_CONFIG)
        }
    }
}

fn execute(cli: Cli) -> anyhow::Result<Outcome> {
    let config = CliConfig::load(cli.config.clone())
        .context("Failed to load configuration")?
        .with_format(cli.format);

    init_tracing(&config.log_filter);
    debug!(output = %config.output, log_filter = %config.log_filter, "Configuration loaded");

    let stdout = io::stdout();
    let stderr = io::stderr();
    commands::dispatch(
        &cli.command,
        config.output,
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
    .context("Failed to write output")
}

/// Initializes the tracing subscriber.
///
/// ## Filter
/// `RUST_LOG` wins when set; otherwise `default_filter` (from config).
///
/// Logs go to stderr so stdout carries nothing but results.
///
/// Call once per process: installing a second global subscriber panics.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
