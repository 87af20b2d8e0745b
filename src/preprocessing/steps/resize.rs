use crate::error::ExtractionError;
use image::{imageops::FilterType, DynamicImage, GenericImageView};

/// Upscale by a fixed linear factor
/// Certificates photographed on a phone are usually below the apparent DPI the
/// recognizer works best at, so every scan is enlarged before binarization.
pub fn apply(image: DynamicImage, scale: f32) -> Result<DynamicImage, ExtractionError> {
    let (width, height) = image.dimensions();
    let (new_width, new_height) = target_dimensions(width, height, scale);

    if (new_width, new_height) == (width, height) {
        return Ok(image);
    }

    Ok(image.resize_exact(new_width, new_height, FilterType::Triangle))
}

/// Scaled dimensions, truncated like a canvas size assignment, never zero
pub fn target_dimensions(width: u32, height: u32, scale: f32) -> (u32, u32) {
    let new_width = ((width as f32 * scale) as u32).max(1);
    let new_height = ((height as f32 * scale) as u32).max(1);
    (new_width, new_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;

    #[test]
    fn test_resize_upscales_by_one_and_a_half() {
        let img = GrayImage::new(100, 40);
        let result = apply(DynamicImage::ImageLuma8(img), 1.5).unwrap();
        assert_eq!(result.dimensions(), (150, 60));
    }

    #[test]
    fn test_odd_dimensions_truncate() {
        assert_eq!(target_dimensions(3, 5, 1.5), (4, 7));
    }

    #[test]
    fn test_unit_scale_is_identity() {
        let img = GrayImage::new(33, 21);
        let result = apply(DynamicImage::ImageLuma8(img), 1.0).unwrap();
        assert_eq!(result.dimensions(), (33, 21));
    }

    #[test]
    fn test_tiny_image_never_collapses() {
        assert_eq!(target_dimensions(1, 1, 0.5), (1, 1));
    }
}
