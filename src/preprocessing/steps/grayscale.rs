use crate::error::ExtractionError;
use image::{DynamicImage, Luma, Rgba};
use imageproc::map::map_colors;

/// Convert image to grayscale by averaging the red, green and blue channels
/// Unlike `to_luma8` this weights the channels equally, so colored stamps end
/// up exactly as bright as their mean intensity.
pub fn apply(image: DynamicImage) -> Result<DynamicImage, ExtractionError> {
    let rgba = image.to_rgba8();
    let gray = map_colors(&rgba, |pixel: Rgba<u8>| Luma([channel_mean(pixel)]));
    Ok(DynamicImage::ImageLuma8(gray))
}

/// Mean of the color channels, rounded up.
///
/// Rounding up keeps `mean > t` equivalent to the exact fractional mean being
/// above `t` for any integer threshold `t`.
fn channel_mean(pixel: Rgba<u8>) -> u8 {
    let [r, g, b, _] = pixel.0;
    let sum = r as u16 + g as u16 + b as u16;
    sum.div_ceil(3) as u8
}
