use crate::error::ExtractionError;
use image::{DynamicImage, GrayImage, RgbaImage};
use std::path::Path;

/// A decoded photo of a certificate, held only for the duration of one scan.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    /// Decode an uploaded JPEG/PNG (or any format the `image` crate can sniff).
    pub fn decode(bytes: &[u8]) -> Result<Self, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::ImageDecode("empty image data".to_string()));
        }
        let image = image::load_from_memory(bytes)
            .map_err(|e| ExtractionError::ImageDecode(e.to_string()))?;
        Ok(Self::from_dynamic(image))
    }

    pub fn open(path: &Path) -> Result<Self, ExtractionError> {
        let image = image::open(path).map_err(|e| {
            ExtractionError::ImageDecode(format!("{}: {}", path.display(), e))
        })?;
        Ok(Self::from_dynamic(image))
    }

    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            pixels: image.into_rgba8(),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn into_dynamic(self) -> DynamicImage {
        DynamicImage::ImageRgba8(self.pixels)
    }
}

impl From<RgbaImage> for SourceImage {
    fn from(pixels: RgbaImage) -> Self {
        Self { pixels }
    }
}

/// Binarized, upscaled bitmap handed to the OCR engine.
///
/// Every pixel is either 0 or 255. The bitmap cannot be modified after
/// construction.
#[derive(Debug, Clone)]
pub struct PreprocessedImage {
    bitmap: GrayImage,
}

impl PreprocessedImage {
    pub(crate) fn new(bitmap: GrayImage) -> Self {
        Self { bitmap }
    }

    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    pub fn as_luma(&self) -> &GrayImage {
        &self.bitmap
    }

    pub fn to_dynamic(&self) -> DynamicImage {
        DynamicImage::ImageLuma8(self.bitmap.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    #[test]
    fn test_decode_png_bytes() {
        let img = RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let source = SourceImage::decode(&bytes).unwrap();
        assert_eq!((source.width(), source.height()), (4, 3));
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        let err = SourceImage::decode(b"definitely not a picture").unwrap_err();
        assert!(matches!(err, ExtractionError::ImageDecode(_)), "got {:?}", err);
    }

    #[test]
    fn test_decode_empty_is_decode_error() {
        assert!(matches!(
            SourceImage::decode(&[]),
            Err(ExtractionError::ImageDecode(_))
        ));
    }
}
