use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Failed to initialize OCR engine: {0}")]
    Initialization(String),

    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    #[error("Text recognition failed: {0}")]
    Recognition(String),

    #[error("Scan was superseded by a newer attempt")]
    Superseded,

    #[error("Unknown OCR engine: {0}")]
    UnknownEngine(String),

    #[error("Image too large: {size} bytes (max: {max} bytes)")]
    ImageTooLarge { size: usize, max: usize },

    #[error("Missing file in request")]
    MissingFile,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ExtractionError {
    /// Errors after which the registration flow continues with manual entry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExtractionError::ImageDecode(_)
                | ExtractionError::Recognition(_)
                | ExtractionError::Superseded
        )
    }

    pub fn code(&self) -> &'static str {
        match self {
            ExtractionError::Initialization(_) => "INIT_ERROR",
            ExtractionError::ImageDecode(_) => "IMAGE_DECODE_ERROR",
            ExtractionError::Recognition(_) => "RECOGNITION_ERROR",
            ExtractionError::Superseded => "SUPERSEDED",
            ExtractionError::UnknownEngine(_) => "UNKNOWN_ENGINE",
            ExtractionError::ImageTooLarge { .. } => "IMAGE_TOO_LARGE",
            ExtractionError::MissingFile => "MISSING_FILE",
            ExtractionError::InvalidRequest(_) => "INVALID_REQUEST",
            ExtractionError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ExtractionError {
    fn into_response(self) -> Response {
        let status = match &self {
            ExtractionError::Initialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ExtractionError::ImageDecode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ExtractionError::Recognition(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ExtractionError::Superseded => StatusCode::CONFLICT,
            ExtractionError::UnknownEngine(_) => StatusCode::BAD_REQUEST,
            ExtractionError::ImageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ExtractionError::MissingFile => StatusCode::BAD_REQUEST,
            ExtractionError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ExtractionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors_route_to_manual_entry() {
        assert!(ExtractionError::ImageDecode("bad header".into()).is_recoverable());
        assert!(ExtractionError::Recognition("no text".into()).is_recoverable());
        assert!(ExtractionError::Superseded.is_recoverable());
        assert!(!ExtractionError::MissingFile.is_recoverable());
        assert!(!ExtractionError::Initialization("model".into()).is_recoverable());
    }

    #[test]
    fn test_error_response_status() {
        let response = ExtractionError::ImageTooLarge { size: 10, max: 5 }.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let response = ExtractionError::MissingFile.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
