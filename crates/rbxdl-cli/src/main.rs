use rbxdl_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Initialize logging as early as possible; stderr if the log file is unavailable.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, logging to stderr: {:#}", err);
    }

    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("rbxdl error: {:#}", err);
        std::process::exit(1);
    }
}
