//! Terminal logger setup

use crate::io::error::{MosaicError, Result};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// Log level for the given verbosity flags
///
/// Quiet wins over verbose when both are set.
pub const fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the process-wide terminal logger on stderr
///
/// # Errors
///
/// Returns an error if a logger has already been installed
pub fn init_logging(level: LevelFilter) -> Result<()> {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
        .map_err(|source| MosaicError::Logging { source })
}
