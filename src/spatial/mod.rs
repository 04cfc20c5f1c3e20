//! Spatial arithmetic for the mosaic cell grid
//!
//! This module keeps the full resolution and coarse matching canvases in
//! lockstep: tile block size, cell boxes and cell lookup.

/// Match scale, cell grid and pixel box arithmetic
pub mod grid;

pub use grid::{Cell, CellGrid, MatchScale, PixelBox};
