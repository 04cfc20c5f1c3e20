//! Input/output plumbing around the mosaic core

/// Command-line parsing and the run driver
pub mod cli;
/// Defaults and validated run configuration
pub mod configuration;
/// Error type and path context
pub mod error;
/// Image decoding, cropping, resampling and export
pub mod image;
/// Terminal logger setup
pub mod logging;
/// Progress bars for loading and placement
pub mod progress;
