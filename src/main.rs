//! Codeprompt: prompt-building nodes for node-graph hosts.
//!
//! This is the main entry point for the `codeprompt` CLI. It parses arguments,
//! initializes logging, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.

use codeprompt::cli::Cli;
use codeprompt::{commands, exit_codes, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.log_level.as_deref());

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
