//! xax CLI
//!
//! Splits raw CD-ROM XA tracks into one file per interleaved stream.

use std::process::ExitCode;

use clap::Parser;

mod cli_types;
mod commands;
mod error;
mod logging;
mod progress;
mod report;

use cli_types::{Cli, Commands, write_mode};
pub(crate) use error::CliError;

/// Emit an empty info line, used to space out report sections.
pub(crate) fn log_blank() {
    log::info!("");
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Extract {
            track,
            directory,
            append,
        } => commands::extract::run_extract(
            &track,
            directory,
            write_mode(append),
            cli.quiet,
            cli.verbose,
        ),
        Commands::Scan { track } => commands::scan::run_scan(&track, cli.quiet, cli.verbose),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_broken_pipe() => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
