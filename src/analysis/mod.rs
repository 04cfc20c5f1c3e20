//! Preparation of the read-only tile and target data consumed by matching

/// Tile library loading and per-tile preprocessing
pub mod library;
/// Target image enlargement, alignment and coarse canvas
pub mod target;
