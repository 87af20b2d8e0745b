use crate::error::ExtractionError;
use image::DynamicImage;
use serde::Serialize;
use std::time::Instant;

use super::bitmap::{PreprocessedImage, SourceImage};
use super::steps;

/// Default linear upscale factor
pub const DEFAULT_SCALE: f32 = 1.5;

/// Tunable preprocessing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PreprocessOptions {
    /// Linear resize factor applied before grayscale conversion
    pub scale: f32,
    /// Mean luminance above which a pixel becomes white
    pub threshold: u8,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            threshold: steps::threshold::DEFAULT_THRESHOLD,
        }
    }
}

/// Timing information for a single preprocessing step
#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Result of preprocessing including timing stats
#[derive(Debug, Clone)]
pub struct PreprocessingResult {
    /// Binarized image
    pub image: PreprocessedImage,
    /// Total preprocessing time in milliseconds
    pub total_time_ms: u64,
    /// Individual step timings
    pub steps: Vec<StepTiming>,
}

/// Resize, grayscale and threshold, always in that order
#[derive(Debug, Clone, Copy, Default)]
pub struct Preprocessor {
    options: PreprocessOptions,
}

impl Preprocessor {
    pub fn new(options: PreprocessOptions) -> Result<Self, ExtractionError> {
        if !options.scale.is_finite() || options.scale <= 0.0 {
            return Err(ExtractionError::Initialization(format!(
                "scale factor must be a positive number, got {}",
                options.scale
            )));
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> PreprocessOptions {
        self.options
    }

    /// Produce the OCR bitmap. Pure and deterministic for a given input.
    pub fn process(&self, source: SourceImage) -> Result<PreprocessingResult, ExtractionError> {
        let start = Instant::now();
        let mut steps_timing = Vec::new();
        let scale = self.options.scale;
        let threshold = self.options.threshold;

        let mut img = source.into_dynamic();
        img = self.run_step("resize", img, &mut steps_timing, |img| {
            steps::resize::apply(img, scale)
        })?;
        img = self.run_step("grayscale", img, &mut steps_timing, steps::grayscale::apply)?;
        img = self.run_step("threshold", img, &mut steps_timing, |img| {
            steps::threshold::apply(img, threshold)
        })?;

        Ok(PreprocessingResult {
            image: PreprocessedImage::new(img.into_luma8()),
            total_time_ms: start.elapsed().as_millis() as u64,
            steps: steps_timing,
        })
    }

    fn run_step<F>(
        &self,
        name: &str,
        img: DynamicImage,
        timings: &mut Vec<StepTiming>,
        step_fn: F,
    ) -> Result<DynamicImage, ExtractionError>
    where
        F: FnOnce(DynamicImage) -> Result<DynamicImage, ExtractionError>,
    {
        let step_start = Instant::now();
        let result = step_fn(img)?;
        let time_ms = step_start.elapsed().as_millis() as u64;
        tracing::debug!(step = name, time_ms, "preprocessing step finished");
        timings.push(StepTiming {
            name: name.to_string(),
            time_ms,
        });
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn sample_certificate() -> SourceImage {
        // Light pink background, a red stamp and a line of black "text"
        let mut img = RgbaImage::from_pixel(40, 20, Rgba([250, 220, 230, 255]));
        for x in 5..15 {
            for y in 2..6 {
                img.put_pixel(x, y, Rgba([220, 60, 60, 255]));
            }
        }
        for x in 5..35 {
            img.put_pixel(x, 12, Rgba([15, 15, 15, 255]));
        }
        SourceImage::from(img)
    }

    #[test]
    fn test_output_is_upscaled_and_binary() {
        let result = Preprocessor::default().process(sample_certificate()).unwrap();
        let bitmap = result.image.as_luma();

        assert_eq!(bitmap.dimensions(), (60, 30));
        assert!(bitmap.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
        let names: Vec<_> = result.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["resize", "grayscale", "threshold"]);
    }

    #[test]
    fn test_background_white_and_text_black() {
        let result = Preprocessor::default().process(sample_certificate()).unwrap();
        let bitmap = result.image.as_luma();

        // Background mean is 233 -> white; ink row (y=12 -> 18 after scaling) -> black
        assert_eq!(bitmap.get_pixel(55, 2).0[0], 255);
        assert_eq!(bitmap.get_pixel(30, 18).0[0], 0);
    }

    #[test]
    fn test_processing_is_deterministic() {
        let a = Preprocessor::default().process(sample_certificate()).unwrap();
        let b = Preprocessor::default().process(sample_certificate()).unwrap();
        assert_eq!(a.image.as_luma().as_raw(), b.image.as_luma().as_raw());
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        let options = PreprocessOptions {
            scale: 0.0,
            threshold: 160,
        };
        assert!(Preprocessor::new(options).is_err());
    }
}
