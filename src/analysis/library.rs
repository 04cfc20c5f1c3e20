//! Tile library: square full resolution and coarse versions of every usable tile image

use crate::algorithm::cancellation::CancellationToken;
use crate::io::error::{MosaicError, Result};
use crate::io::image::{center_crop_square, open_oriented, resize_exact};
use crate::io::progress::ProgressManager;
use crate::spatial::MatchScale;
use image::{DynamicImage, RgbImage};
use std::path::{Path, PathBuf};

/// Both representations of one library image
#[derive(Debug, Clone)]
pub struct Tile {
    /// `tile_size` square used for painting
    pub large: RgbImage,
    /// `small_tile_side` square used for matching
    pub small: RgbImage,
}

impl Tile {
    /// Build both representations from a decoded image
    ///
    /// The image is centre-cropped to its largest square, then resampled twice
    /// from that crop.
    pub fn from_image(image: &DynamicImage, scale: MatchScale) -> Self {
        let square = center_crop_square(&image.to_rgb8());
        let tile_size = scale.tile_size();
        let small_side = scale.small_tile_side();

        Self {
            large: resize_exact(&square, tile_size, tile_size),
            small: resize_exact(&square, small_side, small_side),
        }
    }

    /// Decode, orient and build the tile at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded as an image
    pub fn load(path: &Path, scale: MatchScale) -> Result<Self> {
        let image = open_oriented(path)?;
        Ok(Self::from_image(&image, scale))
    }
}

/// Index-aligned sequences of tile representations
///
/// Never empty: construction fails instead. Tile `i` is `large()[i]` and `small()[i]`.
#[derive(Debug, Clone)]
pub struct TileLibrary {
    large: Vec<RgbImage>,
    small: Vec<RgbImage>,
    scale: MatchScale,
}

impl TileLibrary {
    /// Load every decodable image directly inside `directory`
    ///
    /// Files are visited in sorted path order so tile indices are stable.
    /// Unreadable files are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory cannot be listed
    /// - Cancellation is requested while loading
    /// - No file yields a usable tile
    pub fn load(
        directory: &Path,
        scale: MatchScale,
        cancel: &CancellationToken,
        mut progress: Option<&mut ProgressManager>,
    ) -> Result<Self> {
        let files = tile_files(directory)?;
        log::info!(
            "Reading {} candidate tiles from {}",
            files.len(),
            directory.display()
        );

        if let Some(pm) = progress.as_deref_mut() {
            pm.start_tiles(files.len());
        }

        let mut tiles = Vec::with_capacity(files.len());
        for path in &files {
            if cancel.is_cancelled() {
                return Err(MosaicError::Interrupted);
            }

            match Tile::load(path, scale) {
                Ok(tile) => tiles.push(tile),
                Err(error) => log::warn!("Skipping tile: {error}"),
            }

            if let Some(pm) = progress.as_deref() {
                pm.tile_processed(path);
            }
        }

        if let Some(pm) = progress.as_deref() {
            pm.finish_tiles(tiles.len());
        }

        let library = Self::from_tiles(tiles, scale).ok_or_else(|| MosaicError::NoUsableTiles {
            directory: directory.to_path_buf(),
        })?;
        log::info!("Processed {} tiles", library.len());

        Ok(library)
    }

    /// Assemble a library from prepared tiles, or `None` if there are none
    pub fn from_tiles(tiles: Vec<Tile>, scale: MatchScale) -> Option<Self> {
        if tiles.is_empty() {
            return None;
        }

        let (large, small) = tiles
            .into_iter()
            .map(|tile| (tile.large, tile.small))
            .unzip();

        Some(Self {
            large,
            small,
            scale,
        })
    }

    /// Number of tiles
    pub const fn len(&self) -> usize {
        self.large.len()
    }

    /// Whether the library holds no tiles
    pub const fn is_empty(&self) -> bool {
        self.large.is_empty()
    }

    /// Full resolution tiles in index order
    pub fn large(&self) -> &[RgbImage] {
        &self.large
    }

    /// Coarse tiles in index order
    pub fn small(&self) -> &[RgbImage] {
        &self.small
    }

    /// Full resolution tile at `index`
    pub fn large_tile(&self, index: usize) -> Option<&RgbImage> {
        self.large.get(index)
    }

    /// Scale the tiles were built with
    pub const fn scale(&self) -> MatchScale {
        self.scale
    }
}

/// Regular files directly inside `directory`, sorted by path
///
/// # Errors
///
/// Returns an error if the directory or one of its entries cannot be read
pub fn tile_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let read_error = |source| MosaicError::FileSystem {
        path: directory.to_path_buf(),
        operation: "list tile directory",
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(directory).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}
