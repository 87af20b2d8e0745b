#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use pedigree_scan::engines::EngineRegistry;
use pedigree_scan::{ExtractionError, ExtractionPipeline, PreprocessOptions, PreprocessedImage, Recognizer};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

pub const SEED_TEXT: &str = "SORNRUK
Breed: Thai Ridgeback
Female
KCTH 2024-0091
Owner: Mr. Somchai
JULY 15, 2007";

/// Returns the same text for every bitmap
pub struct ScriptedRecognizer {
    pub text: String,
}

impl Recognizer for ScriptedRecognizer {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn description(&self) -> &'static str {
        "Returns a fixed transcript"
    }

    fn recognize(
        &self,
        _image: &PreprocessedImage,
        progress: &dyn Fn(f32),
    ) -> Result<String, ExtractionError> {
        progress(0.0);
        progress(0.5);
        progress(1.0);
        Ok(self.text.clone())
    }
}

/// Wide bitmaps are slow and read as `slow_text`, narrow ones are fast
pub struct WidthRecognizer {
    pub min_slow_width: u32,
    pub delay: Duration,
    pub slow_text: &'static str,
    pub fast_text: &'static str,
}

impl Recognizer for WidthRecognizer {
    fn name(&self) -> &'static str {
        "by-width"
    }

    fn description(&self) -> &'static str {
        "Picks a transcript by bitmap width"
    }

    fn recognize(
        &self,
        image: &PreprocessedImage,
        progress: &dyn Fn(f32),
    ) -> Result<String, ExtractionError> {
        let text = if image.width() >= self.min_slow_width {
            std::thread::sleep(self.delay);
            self.slow_text
        } else {
            self.fast_text
        };
        progress(1.0);
        Ok(text.to_string())
    }
}

pub fn pipeline_with(engine: impl Recognizer + 'static) -> ExtractionPipeline {
    let engine: Arc<dyn Recognizer> = Arc::new(engine);
    let registry = EngineRegistry::with_engines(vec![engine], None).unwrap();
    ExtractionPipeline::new(Arc::new(registry), PreprocessOptions::default()).unwrap()
}

pub fn scripted_pipeline(text: &str) -> ExtractionPipeline {
    pipeline_with(ScriptedRecognizer {
        text: text.to_string(),
    })
}

/// A small, almost white PNG
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([240, 240, 240, 255]));
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}
