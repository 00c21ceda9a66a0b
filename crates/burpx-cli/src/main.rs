use burpx_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    let log_path = match logging::init_logging() {
        Ok(path) => Some(path),
        Err(err) => {
            logging::init_logging_stderr();
            tracing::warn!("file logging unavailable, using stderr: {:#}", err);
            None
        }
    };

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args() {
        tracing::error!("{:#}", err);
        eprintln!("burpx error: {:#}", err);
        if let Some(path) = log_path {
            eprintln!("see {} for details", path.display());
        }
        std::process::exit(1);
    }
}
