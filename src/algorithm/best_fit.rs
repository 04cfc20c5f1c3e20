//! Best-fit tile search with an early-exit bound
//!
//! Pixel data is a flat RGB byte sequence, three channels per pixel, as
//! produced by `RgbImage::as_raw`. Both the cell and every candidate are
//! compared pixel by pixel; pixels beyond the shorter sequence are ignored.

use std::ops::Deref;

/// Bytes per RGB pixel
const CHANNELS: usize = 3;

/// Squared colour distance between two pixels, summed over channels
fn pixel_difference(a: &[u8], b: &[u8]) -> u64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| u64::from(x.abs_diff(y)).pow(2))
        .sum()
}

/// Full sum of squared per-channel differences between two pixel sequences
pub fn sum_of_squared_differences(a: &[u8], b: &[u8]) -> u64 {
    a.chunks_exact(CHANNELS)
        .zip(b.chunks_exact(CHANNELS))
        .map(|(pa, pb)| pixel_difference(pa, pb))
        .sum()
}

// Stops as soon as the running total exceeds `bail_out_value`: the candidate
// is then known to be worse, and the partial total is returned instead.
fn bounded_difference(cell: &[u8], candidate: &[u8], bail_out_value: u64) -> u64 {
    let mut diff = 0u64;
    for (pc, pt) in cell
        .chunks_exact(CHANNELS)
        .zip(candidate.chunks_exact(CHANNELS))
    {
        diff += pixel_difference(pc, pt);
        if diff > bail_out_value {
            return diff;
        }
    }
    diff
}

/// Index of the candidate closest to `cell`, or `None` when there are no candidates
///
/// Ties go to the lowest index, so repeated searches over the same inputs
/// always agree.
pub fn best_fit<C>(cell: &[u8], candidates: &[C]) -> Option<usize>
where
    C: Deref<Target = [u8]>,
{
    let mut best_index = None;
    let mut min_diff = u64::MAX;

    for (index, candidate) in candidates.iter().enumerate() {
        let diff = bounded_difference(cell, candidate, min_diff);
        if diff < min_diff {
            min_diff = diff;
            best_index = Some(index);
        }
    }

    best_index
}
