//! `genpass` binary: one-shot derivation from the terminal, or a JSON-lines
//! bridge that plays the generator side of the bookmarklet protocol.

use genpass_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Stdout carries passwords and bridge messages, so logs go to a file or stderr.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {err:#}");
    }

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("genpass error: {:#}", err);
        std::process::exit(1);
    }
}
