//! Photomosaic builder that replaces every cell of a target image with the best matching tile
//!
//! Tiles and the target are reduced to a coarse resolution for matching. A pool
//! of workers searches the tile library for each cell in parallel while a single
//! assembler pastes the chosen full resolution tiles into the output canvas.

#![forbid(unsafe_code)]

/// Best-fit search and the dispatcher, worker and assembler pipeline
pub mod algorithm;
/// Tile library building and target image preparation
pub mod analysis;
/// Command line, configuration, errors, image primitives, logging and progress
pub mod io;
/// Cell grid and match scale arithmetic
pub mod spatial;

pub use io::error::{MosaicError, Result};
