//! OCRS engine implementation
//!
//! Pure Rust OCR engine using the ocrs library. No system dependencies required.
//! Downloads neural network models automatically on first use.

use super::{cache_dir, ensure_downloaded};
use crate::config::Config;
use crate::engine::Recognizer;
use crate::error::ExtractionError;
use crate::preprocessing::PreprocessedImage;
use image::DynamicImage;
use ocrs::{DecodeMethod, ImageSource, OcrEngine as OcrsOcrEngine, OcrEngineParams};
use rten::Model;

/// Default model URLs from the ocrs project
const DETECTION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-detection.rten";
const RECOGNITION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-recognition.rten";

/// Progress reported after each stage of the ocrs pipeline
const PREPARED: f32 = 0.15;
const WORDS_DETECTED: f32 = 0.5;
const LINES_GROUPED: f32 = 0.6;

/// OCR Engine wrapping the ocrs library
pub struct OcrsEngine {
    engine: OcrsOcrEngine,
}

impl OcrsEngine {
    /// Create a new engine, downloading models if needed
    pub fn new(_config: &Config) -> Result<Self, ExtractionError> {
        let models = cache_dir()?;
        let detection_model_path =
            ensure_downloaded(DETECTION_MODEL_URL, &models, "text-detection.rten")?;
        let recognition_model_path =
            ensure_downloaded(RECOGNITION_MODEL_URL, &models, "text-recognition.rten")?;

        let detection_model = Model::load_file(&detection_model_path).map_err(|e| {
            ExtractionError::Initialization(format!("Failed to load detection model: {}", e))
        })?;
        let recognition_model = Model::load_file(&recognition_model_path).map_err(|e| {
            ExtractionError::Initialization(format!("Failed to load recognition model: {}", e))
        })?;

        let engine = OcrsOcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            decode_method: DecodeMethod::Greedy,
            ..Default::default()
        })
        .map_err(|e| {
            ExtractionError::Initialization(format!("Failed to create OCR engine: {}", e))
        })?;

        tracing::info!("ocrs engine initialized successfully");

        Ok(Self { engine })
    }

    fn recognize_dynamic(
        &self,
        img: &DynamicImage,
        progress: &dyn Fn(f32),
    ) -> Result<String, ExtractionError> {
        // ImageSource::from_bytes expects HWC RGB data
        let rgb_img = img.to_rgb8();
        let dimensions = rgb_img.dimensions();

        let img_source = ImageSource::from_bytes(rgb_img.as_raw(), dimensions).map_err(|e| {
            ExtractionError::Recognition(format!("Failed to create image source: {}", e))
        })?;

        let ocr_input = self
            .engine
            .prepare_input(img_source)
            .map_err(|e| ExtractionError::Recognition(format!("Failed to prepare input: {}", e)))?;
        progress(PREPARED);

        let word_rects = self
            .engine
            .detect_words(&ocr_input)
            .map_err(|e| ExtractionError::Recognition(format!("Failed to detect words: {}", e)))?;
        progress(WORDS_DETECTED);

        let line_rects = self.engine.find_text_lines(&ocr_input, &word_rects);
        progress(LINES_GROUPED);

        let line_texts = self
            .engine
            .recognize_text(&ocr_input, &line_rects)
            .map_err(|e| {
                ExtractionError::Recognition(format!("Failed to recognize text: {}", e))
            })?;
        progress(1.0);

        // One output line per detected text line, words joined by a space
        let text = line_texts
            .iter()
            .filter_map(|line| line.as_ref())
            .map(|line| {
                line.words()
                    .map(|word| word.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(text)
    }
}

impl Recognizer for OcrsEngine {
    fn name(&self) -> &'static str {
        "ocrs"
    }

    fn description(&self) -> &'static str {
        "Pure Rust OCR engine - fast, no system dependencies required"
    }

    fn recognize(
        &self,
        image: &PreprocessedImage,
        progress: &dyn Fn(f32),
    ) -> Result<String, ExtractionError> {
        self.recognize_dynamic(&image.to_dynamic(), progress)
    }
}
