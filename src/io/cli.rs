//! Command-line interface for building a photomosaic from a target image and a tile directory

use crate::algorithm::cancellation::CancellationToken;
use crate::algorithm::executor::Composer;
use crate::analysis::library::TileLibrary;
use crate::analysis::target::TargetCanvas;
use crate::io::configuration::{
    DEFAULT_ENLARGEMENT, DEFAULT_OUTPUT, DEFAULT_TILE_MATCH_RES, DEFAULT_TILE_SIZE, MosaicConfig,
    default_worker_count,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::logging::level_for;
use crate::io::progress::ProgressManager;
use crate::spatial::MatchScale;
use clap::Parser;
use simplelog::LevelFilter;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "tilemosaic")]
#[command(
    author,
    version,
    about = "Compose an image out of tiles taken from an image library"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// The image to compose using provided tiles
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// The directory with image tiles
    #[arg(value_name = "TILE_DIR")]
    pub tile_dir: PathBuf,

    /// Output image path; the format follows the extension
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Height/width of mosaic tiles in pixels
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: u32,

    /// Tile matching resolution (higher values give better fit but require more processing)
    #[arg(short = 'r', long, default_value_t = DEFAULT_TILE_MATCH_RES)]
    pub tile_match_res: u32,

    /// The mosaic image will be this many times wider and taller than the original
    #[arg(short, long, default_value_t = DEFAULT_ENLARGEMENT)]
    pub enlargement: u32,

    /// Number of matching workers (defaults to one less than the available cores)
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Suppress progress output and informational logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level selected by the verbosity flags
    pub const fn log_level(&self) -> LevelFilter {
        level_for(self.quiet, self.verbose)
    }

    /// Run configuration described by the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter fails validation
    pub fn config(&self) -> Result<MosaicConfig> {
        let config = MosaicConfig {
            tile_size: self.tile_size,
            match_resolution: self.tile_match_res,
            enlargement: self.enlargement,
            workers: self.workers.unwrap_or_else(default_worker_count),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Drives one mosaic run from parsed arguments
pub struct MosaicRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl MosaicRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Build the mosaic and save it, returning the output path
    ///
    /// An interrupted run still saves the partial canvas, unless the interrupt
    /// arrived before matching started.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target is not an existing file or the tile directory not a directory
    /// - A parameter is invalid
    /// - The target cannot be decoded or prepared
    /// - The tile directory holds no usable tiles
    /// - Composition or saving fails
    pub fn process(&mut self, cancel: &CancellationToken) -> Result<PathBuf> {
        let start_time = Instant::now();
        self.validate_inputs()?;

        let config = self.cli.config()?;
        let scale = MatchScale::new(config.tile_size, config.match_resolution)?;
        log::debug!(
            "Tile size {}, match resolution {}, tile block size {:.3}",
            scale.tile_size(),
            scale.small_tile_side(),
            scale.tile_block_size()
        );

        let target = TargetCanvas::prepare(&self.cli.target, config.enlargement, scale)?;
        let library = TileLibrary::load(
            &self.cli.tile_dir,
            scale,
            cancel,
            self.progress_manager.as_mut(),
        )?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_cells(target.grid().cell_count());
        }

        let composer = Composer::new(&target, &library, config.workers)?;
        let composition = composer.compose(cancel, self.progress_manager.as_ref())?;

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        if composition.report.interrupted {
            log::warn!("Saving partial image to {}", self.cli.output.display());
        }
        composition.mosaic.save(&self.cli.output)?;
        log::info!(
            "Saved {} in {:.1?}",
            self.cli.output.display(),
            start_time.elapsed()
        );

        Ok(self.cli.output.clone())
    }

    fn validate_inputs(&self) -> Result<()> {
        if !self.cli.target.is_file() {
            return Err(invalid_parameter(
                "target",
                &display(&self.cli.target),
                &"must be an existing image file",
            ));
        }
        if !self.cli.tile_dir.is_dir() {
            return Err(invalid_parameter(
                "tile_dir",
                &display(&self.cli.tile_dir),
                &"must be an existing directory",
            ));
        }
        Ok(())
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
