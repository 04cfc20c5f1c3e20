//! CLI entry point for the photomosaic builder

use clap::Parser;
use std::process::ExitCode;
use tilemosaic::algorithm::cancellation::CancellationToken;
use tilemosaic::io::cli::{Cli, MosaicRunner};
use tilemosaic::io::logging::init_logging;

// Allow print for the final user-facing result and error lines
#[allow(clippy::print_stdout, clippy::print_stderr)]
fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = init_logging(cli.log_level()) {
        eprintln!("error: {error}");
        return ExitCode::FAILURE;
    }

    let cancel = CancellationToken::new();
    if let Err(error) = cancel.install_interrupt_handler() {
        log::warn!("{error}; Ctrl-C will abort without saving");
    }

    let mut runner = MosaicRunner::new(cli);
    match runner.process(&cancel) {
        Ok(output) => {
            println!("Finished, output is in {}", output.display());
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
