//! Image preprocessing for certificate OCR
//!
//! Upscales the source photo, averages it to grayscale and binarizes it with a
//! fixed luminance cut-off so that watermarks, stamps and background gradients
//! drop out before recognition.

pub mod bitmap;
pub mod pipeline;
pub mod steps;

pub use bitmap::{PreprocessedImage, SourceImage};
pub use pipeline::{PreprocessOptions, Preprocessor, PreprocessingResult, StepTiming};
