//! Target image preparation: enlarge, align to whole tiles, derive the coarse canvas

use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::{center_crop_to_multiple, crop, open_image, resize_exact};
use crate::spatial::{Cell, CellGrid, MatchScale};
use image::{DynamicImage, Limits, RgbImage};
use std::path::Path;

/// Bytes per RGB pixel
const CHANNELS: u64 = 3;

/// Source image at mosaic size, in full resolution and coarse form
///
/// Both canvases are immutable once prepared and shared read-only with every worker.
#[derive(Debug, Clone)]
pub struct TargetCanvas {
    large: RgbImage,
    small: RgbImage,
    grid: CellGrid,
}

impl TargetCanvas {
    /// Decode the image at `path` and prepare it for matching
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be decoded, or see [`Self::from_image`]
    pub fn prepare(path: &Path, enlargement: u32, scale: MatchScale) -> Result<Self> {
        log::info!("Processing main image {}", path.display());
        let image = open_image(path)?;
        let target = Self::from_image(&image, enlargement, scale)?;
        log::info!(
            "Main image processed: {}x{} cells",
            target.grid.columns(),
            target.grid.rows()
        );
        Ok(target)
    }

    /// Prepare an already decoded image
    ///
    /// The image is scaled by `enlargement`, then centre-cropped so both sides are
    /// whole multiples of the tile size. The coarse canvas is resampled from the
    /// cropped image.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The enlarged size overflows or exceeds the decoder allocation limit
    /// - The enlarged image is smaller than one tile in either dimension
    pub fn from_image(image: &DynamicImage, enlargement: u32, scale: MatchScale) -> Result<Self> {
        let source = image.to_rgb8();
        let (width, height) = source.dimensions();

        let enlarged_width = width.checked_mul(enlargement).ok_or_else(|| {
            invalid_parameter("enlargement", &enlargement, &"enlarged width overflows")
        })?;
        let enlarged_height = height.checked_mul(enlargement).ok_or_else(|| {
            invalid_parameter("enlargement", &enlargement, &"enlarged height overflows")
        })?;

        let enlarged_bytes = (u64::from(enlarged_width) * u64::from(enlarged_height))
            .saturating_mul(CHANNELS);
        let budget = Limits::default().max_alloc.unwrap_or(u64::MAX);
        if enlarged_bytes > budget {
            return Err(invalid_parameter(
                "enlargement",
                &enlargement,
                &format!(
                    "enlarged image {enlarged_width}x{enlarged_height} needs {enlarged_bytes} bytes, over the {budget} byte limit"
                ),
            ));
        }

        let tile_size = scale.tile_size();
        if enlarged_width < tile_size || enlarged_height < tile_size {
            return Err(MosaicError::InvalidSourceData {
                reason: format!(
                    "enlarged image {enlarged_width}x{enlarged_height} is smaller than one {tile_size}px tile"
                ),
            });
        }

        let enlarged = resize_exact(&source, enlarged_width, enlarged_height);
        let large = center_crop_to_multiple(&enlarged, tile_size);

        let grid = CellGrid::for_canvas(large.width(), large.height(), scale);
        let (small_width, small_height) = grid.small_dimensions();
        let small = resize_exact(&large, small_width, small_height);

        Ok(Self { large, small, grid })
    }

    /// Full resolution canvas, a whole number of tiles on each side
    pub const fn large(&self) -> &RgbImage {
        &self.large
    }

    /// Coarse canvas used for matching
    pub const fn small(&self) -> &RgbImage {
        &self.small
    }

    /// Cell partition shared by both canvases
    pub const fn grid(&self) -> CellGrid {
        self.grid
    }

    /// Flat RGB data of `cell` cut from the coarse canvas
    pub fn cell_pixels(&self, cell: Cell) -> Vec<u8> {
        let region = self.grid.small_box(cell);
        crop(
            &self.small,
            region.left,
            region.top,
            region.width(),
            region.height(),
        )
        .into_raw()
    }
}
