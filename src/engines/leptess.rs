//! Leptess/Tesseract engine implementation
//!
//! Tesseract-based OCR engine. Better for noisy/messy images like phone photos.
//! Uses tesseract-static crate for static linking (no system dependencies).
//! Downloads tessdata (training data) automatically on first use.

use super::{cache_dir, ensure_downloaded};
use crate::config::Config;
use crate::engine::Recognizer;
use crate::error::ExtractionError;
use crate::preprocessing::PreprocessedImage;
use tesseract_static::tesseract::Tesseract;

/// Tesseract OCR Engine
pub struct LeptessEngine {
    /// Path to tessdata directory
    tessdata_path: String,
    /// Recognition language (a single Latin-script pass)
    language: String,
}

impl LeptessEngine {
    /// Create a new Tesseract-based OCR engine
    pub fn new(config: &Config) -> Result<Self, ExtractionError> {
        let language = config.default_language.clone();

        let tessdata_path = match &config.tessdata_path {
            Some(path) => path.clone(),
            None => ensure_tessdata_available(&language)?,
        };

        // Validate that tessdata is accessible by doing a test initialization
        let test_tess = Tesseract::new(Some(&tessdata_path), Some(&language)).map_err(|e| {
            ExtractionError::Initialization(format!("Failed to initialize Tesseract: {}", e))
        })?;
        drop(test_tess);

        tracing::info!(
            "Leptess engine initialized (tessdata: {}, language: {})",
            tessdata_path,
            language
        );

        Ok(Self {
            tessdata_path,
            language,
        })
    }
}

impl Recognizer for LeptessEngine {
    fn name(&self) -> &'static str {
        "leptess"
    }

    fn description(&self) -> &'static str {
        "Tesseract OCR engine - better for noisy/messy images like phone photos"
    }

    fn recognize(
        &self,
        image: &PreprocessedImage,
        progress: &dyn Fn(f32),
    ) -> Result<String, ExtractionError> {
        let (width, height) = (image.width(), image.height());

        // BMP is always supported by leptonica
        let mut bmp_data = Vec::new();
        image
            .to_dynamic()
            .write_to(&mut std::io::Cursor::new(&mut bmp_data), image::ImageFormat::Bmp)
            .map_err(|e| {
                ExtractionError::Recognition(format!("Failed to convert to BMP: {}", e))
            })?;

        tracing::debug!(
            "Processing image: {}x{}, BMP size: {} bytes",
            width,
            height,
            bmp_data.len()
        );

        let mut tess = Tesseract::new(Some(&self.tessdata_path), Some(&self.language))
            .map_err(|e| {
                ExtractionError::Recognition(format!("Failed to create Tesseract: {}", e))
            })?;

        tess = tess.set_image_from_mem(&bmp_data).map_err(|e| {
            ExtractionError::Recognition(format!(
                "Failed to set image ({}x{}, {} bytes): {}",
                width,
                height,
                bmp_data.len(),
                e
            ))
        })?;
        progress(0.1);

        tess = tess.recognize().map_err(|e| {
            ExtractionError::Recognition(format!("Failed to recognize text: {}", e))
        })?;
        progress(0.9);

        let text = tess
            .get_text()
            .map_err(|e| ExtractionError::Recognition(format!("Failed to get text: {}", e)))?;
        progress(1.0);

        Ok(text.trim().to_string())
    }
}

/// Ensure tessdata is available, downloading if needed
fn ensure_tessdata_available(language: &str) -> Result<String, ExtractionError> {
    let tessdata_dir = cache_dir()?.join("tessdata");

    std::fs::create_dir_all(&tessdata_dir).map_err(|e| {
        ExtractionError::Initialization(format!("Failed to create tessdata directory: {}", e))
    })?;

    ensure_downloaded(
        &tessdata_url(language),
        &tessdata_dir,
        &format!("{}.traineddata", language),
    )?;

    // Tesseract expects the directory, not the file
    tessdata_dir
        .to_str()
        .map(|s| s.to_string())
        .ok_or_else(|| ExtractionError::Initialization("Invalid tessdata path".to_string()))
}

/// Get tessdata download URL for a language
fn tessdata_url(language: &str) -> String {
    // tessdata_fast: smaller, faster downloads
    format!(
        "https://github.com/tesseract-ocr/tessdata_fast/raw/main/{}.traineddata",
        language
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tessdata_url_names_language() {
        assert!(tessdata_url("eng").ends_with("/eng.traineddata"));
    }
}
