//! Image decoding, cropping, resampling and export

use crate::io::error::{MosaicError, Result, WithPath};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageDecoder, ImageReader, RgbImage};
use std::path::Path;

/// Resampling filter used for every resize
pub const RESAMPLING_FILTER: FilterType = FilterType::Lanczos3;

/// Decode an image, guessing the format from its contents
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a supported image
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    ImageReader::open(path)
        .map_err(|e| MosaicError::FileSystem {
            path: path.to_path_buf(),
            operation: "open image",
            source: e,
        })?
        .with_guessed_format()
        .with_path(path)?
        .decode()
        .with_path(path)
}

/// Decode an image and rotate or flip it upright using its embedded orientation
///
/// # Errors
///
/// Returns an error if the file cannot be opened, decoded, or its metadata read
pub fn open_oriented(path: &Path) -> Result<DynamicImage> {
    let mut decoder = ImageReader::open(path)
        .map_err(|e| MosaicError::FileSystem {
            path: path.to_path_buf(),
            operation: "open image",
            source: e,
        })?
        .with_guessed_format()
        .with_path(path)?
        .into_decoder()
        .with_path(path)?;

    let orientation = decoder.orientation().with_path(path)?;
    let mut image = DynamicImage::from_decoder(decoder).with_path(path)?;
    image.apply_orientation(orientation);

    Ok(image)
}

/// Crop `image` to `width` x `height` starting at (`left`, `top`)
pub fn crop(image: &RgbImage, left: u32, top: u32, width: u32, height: u32) -> RgbImage {
    imageops::crop_imm(image, left, top, width, height).to_image()
}

/// Largest centred square that fits inside `image`
///
/// When the excess is odd the extra pixel is dropped from the right or bottom edge.
pub fn center_crop_square(image: &RgbImage) -> RgbImage {
    let (width, height) = image.dimensions();
    let side = width.min(height);
    crop(image, (width - side) / 2, (height - side) / 2, side, side)
}

/// Centred crop whose sides are the largest multiples of `multiple` that fit
///
/// Returns a copy when both sides already divide evenly.
pub fn center_crop_to_multiple(image: &RgbImage, multiple: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    let multiple = multiple.max(1);
    let width_excess = width % multiple;
    let height_excess = height % multiple;

    if width_excess == 0 && height_excess == 0 {
        return image.clone();
    }

    crop(
        image,
        width_excess / 2,
        height_excess / 2,
        width - width_excess,
        height - height_excess,
    )
}

/// Resample `image` to exactly `width` x `height`
pub fn resize_exact(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, RESAMPLING_FILTER)
}

/// Save an image, choosing the encoder from the path extension
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The format is unsupported or the file cannot be written
pub fn save_image(image: &RgbImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image
        .save(output_path)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
