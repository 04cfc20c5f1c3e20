//! Progress display for tile loading and cell placement

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg:>12}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{prefix}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress bars for the two long running phases of a run
///
/// The cell bar is shared with the assembler thread once composing starts,
/// so every update takes `&self`.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    tile_bar: Option<ProgressBar>,
    cell_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no active bars
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            tile_bar: None,
            cell_bar: None,
        }
    }

    /// Show the tile loading bar for `file_count` candidate files
    pub fn start_tiles(&mut self, file_count: usize) {
        let bar = ProgressBar::new(file_count as u64)
            .with_style(PROGRESS_STYLE.clone())
            .with_message("Reading tiles");
        self.tile_bar = Some(self.multi_progress.add(bar));
    }

    /// Advance the tile bar past `path`
    pub fn tile_processed(&self, path: &Path) {
        if let Some(ref bar) = self.tile_bar {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            bar.set_prefix(name.to_string());
            bar.inc(1);
        }
    }

    /// Close the tile bar, reporting how many tiles were usable
    pub fn finish_tiles(&self, usable: usize) {
        if let Some(ref bar) = self.tile_bar {
            bar.set_prefix(format!("{usable} usable"));
            bar.finish();
        }
    }

    /// Show the placement bar for `cell_count` cells
    pub fn start_cells(&mut self, cell_count: usize) {
        let bar = ProgressBar::new(cell_count as u64)
            .with_style(PROGRESS_STYLE.clone())
            .with_message("Placing");
        self.cell_bar = Some(self.multi_progress.add(bar));
    }

    /// Record one placed cell
    pub fn cell_placed(&self) {
        if let Some(ref bar) = self.cell_bar {
            bar.inc(1);
        }
    }

    /// Number of cells recorded on the placement bar
    pub fn cells_placed(&self) -> u64 {
        self.cell_bar.as_ref().map_or(0, ProgressBar::position)
    }

    /// Clean up all progress displays
    ///
    /// A placement bar that stopped short is left showing how far it got.
    pub fn finish(&self) {
        if let Some(ref bar) = self.cell_bar {
            if bar.length().is_some_and(|total| self.cells_placed() < total) {
                bar.abandon_with_message("Partial");
            } else {
                bar.finish();
            }
        }
        let _ = self.multi_progress.clear();
    }
}
