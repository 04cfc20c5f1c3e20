//! Cell grid arithmetic shared by the full resolution and coarse canvases
//!
//! Every conversion between the two resolutions goes through [`MatchScale`],
//! so the boxes cut from the coarse canvas for matching always correspond to
//! the boxes painted on the full resolution canvas.

use crate::io::error::{Result, invalid_parameter};

/// Downscaling ratio between full resolution and coarse representations
///
/// The ratio is kept as the exact fraction `resolution / tile_size` instead of
/// a floating point `tile_block_size`, so boxes never drift by a pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchScale {
    tile_size: u32,
    resolution: u32,
}

impl MatchScale {
    /// Create a scale for tiles of `tile_size` pixels matched at `match_resolution`
    ///
    /// The resolution is clamped into `[1, tile_size]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `tile_size` is zero
    pub fn new(tile_size: u32, match_resolution: u32) -> Result<Self> {
        if tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &"must be at least one pixel",
            ));
        }

        Ok(Self {
            tile_size,
            resolution: match_resolution.clamp(1, tile_size),
        })
    }

    /// Side of a full resolution tile
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Side of a coarse tile after clamping
    pub const fn small_tile_side(&self) -> u32 {
        self.resolution
    }

    /// Number of full resolution pixels folded into one coarse pixel
    pub fn tile_block_size(&self) -> f64 {
        f64::from(self.tile_size) / f64::from(self.resolution)
    }

    /// Convert a full resolution length or offset to coarse pixels, rounding down
    pub fn to_small(&self, large: u32) -> u32 {
        let scaled = u64::from(large) * u64::from(self.resolution) / u64::from(self.tile_size);
        // scaled <= large because resolution <= tile_size
        u32::try_from(scaled).unwrap_or(large)
    }
}

/// Rectangle in pixel coordinates, right and bottom exclusive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelBox {
    /// Left edge (inclusive)
    pub left: u32,
    /// Top edge (inclusive)
    pub top: u32,
    /// Right edge (exclusive)
    pub right: u32,
    /// Bottom edge (exclusive)
    pub bottom: u32,
}

impl PixelBox {
    /// Horizontal extent
    pub const fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Vertical extent
    pub const fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }
}

/// Grid position of one mosaic cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Column index
    pub x: u32,
    /// Row index
    pub y: u32,
}

/// Tile aligned partition of a target canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellGrid {
    columns: u32,
    rows: u32,
    scale: MatchScale,
}

impl CellGrid {
    /// Partition a full resolution canvas into whole tiles
    ///
    /// Any partial tile along the right or bottom edge is ignored.
    pub const fn for_canvas(width: u32, height: u32, scale: MatchScale) -> Self {
        Self {
            columns: width / scale.tile_size,
            rows: height / scale.tile_size,
            scale,
        }
    }

    /// Number of cells per row
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cells per column
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Scale shared by both canvases
    pub const fn scale(&self) -> MatchScale {
        self.scale
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Size of the full resolution canvas covered by the grid
    pub const fn large_dimensions(&self) -> (u32, u32) {
        (
            self.columns * self.scale.tile_size,
            self.rows * self.scale.tile_size,
        )
    }

    /// Size of the coarse canvas covered by the grid
    pub const fn small_dimensions(&self) -> (u32, u32) {
        (
            self.columns * self.scale.resolution,
            self.rows * self.scale.resolution,
        )
    }

    /// Every cell once, column by column
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let rows = self.rows;
        (0..self.columns).flat_map(move |x| (0..rows).map(move |y| Cell { x, y }))
    }

    /// Region of the full resolution canvas covered by `cell`
    pub const fn large_box(&self, cell: Cell) -> PixelBox {
        let size = self.scale.tile_size;
        PixelBox {
            left: cell.x * size,
            top: cell.y * size,
            right: (cell.x + 1) * size,
            bottom: (cell.y + 1) * size,
        }
    }

    /// Region of the coarse canvas covered by `cell`
    pub fn small_box(&self, cell: Cell) -> PixelBox {
        let large = self.large_box(cell);
        PixelBox {
            left: self.scale.to_small(large.left),
            top: self.scale.to_small(large.top),
            right: self.scale.to_small(large.right),
            bottom: self.scale.to_small(large.bottom),
        }
    }

    /// Cell whose full resolution box is exactly `large_box`
    pub const fn cell_at(&self, large_box: PixelBox) -> Option<Cell> {
        let size = self.scale.tile_size;
        if large_box.left % size != 0 || large_box.top % size != 0 {
            return None;
        }
        if large_box.width() != size || large_box.height() != size {
            return None;
        }

        let cell = Cell {
            x: large_box.left / size,
            y: large_box.top / size,
        };
        if cell.x < self.columns && cell.y < self.rows {
            Some(cell)
        } else {
            None
        }
    }

    /// Row-major position of `cell` in a flat per-cell table
    pub const fn index_of(&self, cell: Cell) -> usize {
        cell.y as usize * self.columns as usize + cell.x as usize
    }
}
