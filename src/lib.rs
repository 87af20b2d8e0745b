//! Pedigree certificate scanning
//!
//! A photo of a dog's pedigree certificate goes through image preprocessing,
//! an OCR engine and a set of text heuristics; what comes out pre-fills a
//! registration form that the user reviews before submitting.

pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod extraction;
pub mod form;
pub mod orchestrator;
pub mod preprocessing;
pub mod server;

pub use engine::Recognizer;
pub use error::ExtractionError;
pub use extraction::{parse_record, Gender, ParsedRecord, PedigreeRecord};
pub use form::FormPrefill;
pub use orchestrator::{Extraction, ExtractionPipeline, ScanOutcome, ScanSession};
pub use preprocessing::{PreprocessOptions, PreprocessedImage, SourceImage};
