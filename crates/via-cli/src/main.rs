use via_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Logging is a side channel: an unwritable state dir must not stop the CLI.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("via error: {:#}", err);
        std::process::exit(1);
    }
}
