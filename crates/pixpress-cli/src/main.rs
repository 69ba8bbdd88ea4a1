//! Pixpress CLI entrypoint.
//!
//! Parses arguments, sets up logging, runs one command and maps the result
//! to the process exit code. For programmatic use, call `pixpress_core`
//! directly.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod args;
mod config;
mod errors;
mod runner;

fn main() -> ExitCode {
    let args = args::CliArgs::parse();
    init_logging(args.verbose);

    match runner::run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "pixpress=debug,pixpress_core=debug"
    } else {
        "pixpress=info,pixpress_core=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
