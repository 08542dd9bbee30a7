use std::process::ExitCode;

use sitemill_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() -> ExitCode {
    // Log to the state dir; stderr if that isn't writable.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable: {:#}", err);
    }

    match CliCommand::run_from_args() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("sitemill error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
