//! Mosaic assembler: sole writer of the output canvas

use crate::algorithm::messages::{Placement, ResultMessage};
use crate::analysis::library::TileLibrary;
use crate::io::error::{MosaicError, Result, pipeline_error};
use crate::io::image::save_image;
use crate::io::progress::ProgressManager;
use crate::spatial::CellGrid;
use image::{RgbImage, imageops};
use std::path::Path;
use std::sync::mpsc::Receiver;

/// Output canvas together with a per-cell write count
#[derive(Debug, Clone)]
pub struct MosaicImage {
    canvas: RgbImage,
    grid: CellGrid,
    writes: Vec<u32>,
}

impl MosaicImage {
    /// Blank canvas covering every cell of `grid`
    pub fn new(grid: CellGrid) -> Self {
        let (width, height) = grid.large_dimensions();
        Self {
            canvas: RgbImage::new(width, height),
            grid,
            writes: vec![0; grid.cell_count()],
        }
    }

    /// Replace the pixels under `placement` with the full resolution tile
    ///
    /// Each cell accepts exactly one placement.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The box is not a cell of this grid
    /// - The tile index is not in `library`
    /// - The cell has already been painted
    pub fn paste(&mut self, placement: Placement, library: &TileLibrary) -> Result<()> {
        let cell = self.grid.cell_at(placement.large_box).ok_or_else(|| {
            pipeline_error(
                "assembler",
                &format!("box {:?} is not a cell of the mosaic", placement.large_box),
            )
        })?;
        let tile = library.large_tile(placement.tile_index).ok_or_else(|| {
            pipeline_error(
                "assembler",
                &format!(
                    "tile index {} is out of bounds (library holds {})",
                    placement.tile_index,
                    library.len()
                ),
            )
        })?;
        let count = self
            .writes
            .get_mut(self.grid.index_of(cell))
            .ok_or_else(|| pipeline_error("assembler", &format!("{cell:?} has no write slot")))?;
        if *count > 0 {
            return Err(pipeline_error("assembler", &format!("{cell:?} was already painted")));
        }

        imageops::replace(
            &mut self.canvas,
            tile,
            i64::from(placement.large_box.left),
            i64::from(placement.large_box.top),
        );
        *count += 1;

        Ok(())
    }

    /// Painted canvas
    pub const fn canvas(&self) -> &RgbImage {
        &self.canvas
    }

    /// Cell partition of the canvas
    pub const fn grid(&self) -> CellGrid {
        self.grid
    }

    /// Times each cell was painted, in row-major order
    pub fn write_counts(&self) -> &[u32] {
        &self.writes
    }

    /// Number of painted cells
    pub fn painted_cells(&self) -> usize {
        self.write_counts().iter().filter(|&&count| count > 0).count()
    }

    /// Save the canvas, choosing the format from the path extension
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be encoded or written
    pub fn save(&self, path: &Path) -> Result<()> {
        save_image(&self.canvas, path)
    }
}

/// What the assembler received before finishing
#[derive(Debug, Clone)]
pub struct Assembly {
    /// The painted output
    pub mosaic: MosaicImage,
    /// Placements applied
    pub placed: usize,
    /// Worker sentinels received
    pub sentinels: usize,
}

/// Consumer side of the pipeline
pub struct MosaicAssembler<'a> {
    library: &'a TileLibrary,
    mosaic: MosaicImage,
    worker_count: usize,
}

impl<'a> MosaicAssembler<'a> {
    /// Create an assembler painting `grid` from `library`, expecting `worker_count` sentinels
    pub fn new(grid: CellGrid, library: &'a TileLibrary, worker_count: usize) -> Self {
        Self {
            library,
            mosaic: MosaicImage::new(grid),
            worker_count,
        }
    }

    /// Paste placements until every worker has sent its sentinel
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The result queue closes while workers are still active
    /// - A placement names an unknown box or tile
    pub fn run(
        mut self,
        results: &Receiver<ResultMessage>,
        progress: Option<&ProgressManager>,
    ) -> Result<Assembly> {
        let mut active_workers = self.worker_count;
        let mut placed = 0;

        while active_workers > 0 {
            let message = results.recv().map_err(|e| MosaicError::Pipeline {
                stage: "assembler",
                reason: format!("result queue closed with {active_workers} workers active: {e}"),
            })?;

            match message {
                ResultMessage::Placed(placement) => {
                    self.mosaic.paste(placement, self.library)?;
                    placed += 1;
                    if let Some(pm) = progress {
                        pm.cell_placed();
                    }
                }
                ResultMessage::WorkerFinished { worker } => {
                    log::debug!("Assembler received sentinel from worker {worker}");
                    active_workers -= 1;
                }
            }
        }

        Ok(Assembly {
            mosaic: self.mosaic,
            placed,
            sentinels: self.worker_count,
        })
    }
}
