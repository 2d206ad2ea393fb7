mod ban;
mod cli;
mod dedup;
mod error;
mod merge;
mod parse;

use anyhow::{Result, anyhow};
use clap::Parser;
use cli::Args;
use error::MergeError;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log to stderr; `RUST_LOG` overrides the level picked by `--verbose`
fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(
            EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    match merge::run(&args) {
        Ok(summary) => {
            tracing::debug!(
                files = summary.files,
                entries = summary.entries,
                bytes = summary.bytes,
                output = %summary.output.display(),
                "merge complete"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(MergeError::Usage) => {
            println!("{}", cli::usage(&cli::program_name(), &args.output));
            Ok(ExitCode::FAILURE)
        }
        Err(err) => {
            tracing::error!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}
