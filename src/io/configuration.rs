//! Mosaic constants and validated run configuration

use crate::io::error::{Result, invalid_parameter};
use std::num::NonZeroUsize;
use std::thread;

// Default values for configurable parameters
/// Height and width of mosaic tiles in pixels
pub const DEFAULT_TILE_SIZE: u32 = 50;

/// Tile matching resolution (higher values give better fit but require more processing)
pub const DEFAULT_TILE_MATCH_RES: u32 = 5;

/// The mosaic will be this many times wider and taller than the original
pub const DEFAULT_ENLARGEMENT: u32 = 2;

// Output settings
/// Output path used when none is given
pub const DEFAULT_OUTPUT: &str = "mosaic.jpeg";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Number of matching workers for this machine
///
/// One core is left for the dispatcher and assembler; never fewer than one worker
pub fn default_worker_count() -> usize {
    thread::available_parallelism()
        .map_or(1, NonZeroUsize::get)
        .saturating_sub(1)
        .max(1)
}

/// Tunable parameters threaded through one mosaic run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MosaicConfig {
    /// Side of a full resolution tile in pixels
    pub tile_size: u32,
    /// Side of a coarse tile used for matching, clamped into `[1, tile_size]`
    pub match_resolution: u32,
    /// Scale factor applied to the target before tiling
    pub enlargement: u32,
    /// Number of parallel matching workers
    pub workers: usize,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            match_resolution: DEFAULT_TILE_MATCH_RES,
            enlargement: DEFAULT_ENLARGEMENT,
            workers: default_worker_count(),
        }
    }
}

impl MosaicConfig {
    /// Check every parameter can drive a run
    ///
    /// Match resolution is not checked here: zero or oversized values are clamped.
    ///
    /// # Errors
    ///
    /// Returns an error if tile size, enlargement or worker count is zero
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &"must be at least one pixel",
            ));
        }
        if self.enlargement == 0 {
            return Err(invalid_parameter(
                "enlargement",
                &self.enlargement,
                &"must be at least 1",
            ));
        }
        if self.workers == 0 {
            return Err(invalid_parameter(
                "workers",
                &self.workers,
                &"at least one matching worker is required",
            ));
        }
        Ok(())
    }
}
