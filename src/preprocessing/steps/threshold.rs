use crate::error::ExtractionError;
use image::{DynamicImage, GrayImage, Luma};

/// Default luminance cut-off on the 0-255 scale
pub const DEFAULT_THRESHOLD: u8 = 160;

/// Apply a fixed global threshold
/// Pixels strictly brighter than `threshold` become white, everything else
/// black. Gray-level detail is discarded for good.
pub fn apply(image: DynamicImage, threshold: u8) -> Result<DynamicImage, ExtractionError> {
    let gray = image.to_luma8();
    Ok(DynamicImage::ImageLuma8(binarize(&gray, threshold)))
}

fn binarize(img: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        if img.get_pixel(x, y).0[0] > threshold {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}
