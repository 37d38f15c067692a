//! Region cropping.

use image::{Rgb, RgbImage};
use thiserror::Error;

use crate::bbox::PixelBox;
use crate::config::{MAX_CROP_PIXELS, OUTPUT_EXTENSION};

/// A cropped region waiting to be written.
#[derive(Clone, Debug)]
pub struct CroppedSample {
    pub image: RgbImage,
    /// Output file name, `<image_base>_<object_index>.jpg`.
    pub file_name: String,
}

impl CroppedSample {
    pub fn new(image: RgbImage, image_base: &str, object_index: usize) -> Self {
        Self {
            image,
            file_name: sample_file_name(image_base, object_index),
        }
    }
}

/// Output name for the `object_index`-th object of `image_base`.
pub fn sample_file_name(image_base: &str, object_index: usize) -> String {
    format!("{image_base}_{object_index}.{OUTPUT_EXTENSION}")
}

/// Why a bounding box could not be cropped.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CropError {
    #[error("box has no area ({width} x {height})")]
    Empty { width: i64, height: i64 },

    #[error("box extent does not fit in 64 bits")]
    Overflow,

    #[error("box is {width} x {height} pixels, more than the {max} pixel limit")]
    TooLarge { width: u64, height: u64, max: u64 },
}

/// Copy `bbox` out of `source`.
///
/// The result is always exactly `bbox.width() x bbox.height()`. Parts of the
/// box that fall outside `source` are filled with black rather than clipped,
/// so boxes that overhang the image edge keep their annotated size.
///
/// Boxes with no area, or with more than [`MAX_CROP_PIXELS`] pixels, are
/// rejected before anything is allocated.
pub fn crop_region(source: &RgbImage, bbox: &PixelBox) -> Result<RgbImage, CropError> {
    let (width, height) = match (bbox.width(), bbox.height()) {
        (Some(width), Some(height)) => (width, height),
        _ => return Err(CropError::Overflow),
    };
    if width <= 0 || height <= 0 {
        return Err(CropError::Empty { width, height });
    }

    let (width, height) = (width as u64, height as u64);
    let too_large = CropError::TooLarge {
        width,
        height,
        max: MAX_CROP_PIXELS,
    };
    match width.checked_mul(height) {
        Some(pixels) if pixels <= MAX_CROP_PIXELS => {}
        _ => return Err(too_large),
    }
    // Both sides are at most MAX_CROP_PIXELS here, well inside u32.
    let mut out = RgbImage::from_pixel(width as u32, height as u32, Rgb([0, 0, 0]));

    // Overlap of the box with the source, in source coordinates.
    let x0 = bbox.xmin.max(0);
    let y0 = bbox.ymin.max(0);
    let x1 = bbox.xmax.min(i64::from(source.width()));
    let y1 = bbox.ymax.min(i64::from(source.height()));

    for y in y0..y1 {
        for x in x0..x1 {
            let pixel = *source.get_pixel(x as u32, y as u32);
            out.put_pixel((x - bbox.xmin) as u32, (y - bbox.ymin) as u32, pixel);
        }
    }

    Ok(out)
}
