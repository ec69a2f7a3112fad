//! samp CLI - Raw PCM Sample Manipulation
//!
//! Command-line interface for the samp sample buffer library.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::debug;

use samp::cli::{commands, normalize_args, usage_error_text, Cli};

fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            // Usage errors go to stdout with the usage text
            println!("{}", usage_error_text(&err));
            return ExitCode::FAILURE;
        }
        Err(err) => err.exit(),
    };

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("samp v{}", env!("CARGO_PKG_VERSION"));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            if let Some(samp_err) = err.downcast_ref::<samp::SampError>() {
                for suggestion in samp_err.recovery_suggestions() {
                    eprintln!("  hint: {}", suggestion);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    commands::run(cli).with_context(|| format!("{} failed", cli.operation.name()))
}
