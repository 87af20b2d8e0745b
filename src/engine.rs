use crate::error::ExtractionError;
use crate::preprocessing::PreprocessedImage;

/// Trait that all OCR engines must implement
///
/// Engines are black boxes: a bitmap goes in, one text blob comes out with
/// line breaks matching the visual lines of the document.
pub trait Recognizer: Send + Sync {
    /// Returns the engine identifier (e.g., "ocrs", "leptess")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the engine
    fn description(&self) -> &'static str;

    /// Recognize the text of a preprocessed certificate.
    ///
    /// `progress` receives values in `[0, 1]` as recognition advances; the
    /// last call should be `1.0`.
    fn recognize(
        &self,
        image: &PreprocessedImage,
        progress: &dyn Fn(f32),
    ) -> Result<String, ExtractionError>;

    /// Get supported upload MIME types
    fn supported_formats(&self) -> Vec<String> {
        vec!["image/png".to_string(), "image/jpeg".to_string()]
    }
}
