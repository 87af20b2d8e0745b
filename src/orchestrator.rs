//! Scan pipeline: decode, preprocess, recognize, extract
//!
//! Stages run strictly one after another. Decoding and preprocessing finish
//! before the OCR engine is called, and extraction only sees the complete
//! recognized text. Dropping an in-flight scan future abandons it; the OCR
//! engine is not told and finishes its blocking call in the background.

use crate::engine::Recognizer;
use crate::engines::EngineRegistry;
use crate::error::ExtractionError;
use crate::extraction::{parse_record, FieldSource, ParsedRecord, PedigreeRecord};
use crate::form::FormPrefill;
use crate::preprocessing::{PreprocessOptions, Preprocessor, SourceImage};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tokio::sync::mpsc;

/// Progress reported once the bitmap is ready
pub const PREPROCESSED_PERCENT: u8 = 10;

/// Share of the progress range covered by recognition
const RECOGNITION_SPAN: f32 = 90.0;

/// Outcome of one successful attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub record: PedigreeRecord,
    /// Shown to the user so they can check the extracted values against it
    pub raw_text: String,
    pub sources: Vec<FieldSource>,
    pub engine: &'static str,
}

pub struct ExtractionPipeline {
    preprocessor: Preprocessor,
    engines: Arc<EngineRegistry>,
}

impl ExtractionPipeline {
    pub fn new(
        engines: Arc<EngineRegistry>,
        options: PreprocessOptions,
    ) -> Result<Self, ExtractionError> {
        Ok(Self {
            preprocessor: Preprocessor::new(options)?,
            engines,
        })
    }

    pub fn engines(&self) -> &EngineRegistry {
        &self.engines
    }

    pub fn preprocess_options(&self) -> PreprocessOptions {
        self.preprocessor.options()
    }

    /// Scan with the default engine. `on_progress` receives percentages in
    /// `0..=100`.
    pub async fn extract<F>(
        &self,
        image: Vec<u8>,
        on_progress: F,
    ) -> Result<Extraction, ExtractionError>
    where
        F: FnMut(u8) + Send,
    {
        self.extract_with(None, image, on_progress).await
    }

    /// Scan with a named engine (`None` for the default).
    pub async fn extract_with<F>(
        &self,
        engine: Option<&str>,
        image: Vec<u8>,
        mut on_progress: F,
    ) -> Result<Extraction, ExtractionError>
    where
        F: FnMut(u8) + Send,
    {
        let start = Instant::now();
        let recognizer = self.recognizer(engine)?;

        let preprocessor = self.preprocessor;
        let preprocessed = tokio::task::spawn_blocking(move || {
            let source = SourceImage::decode(&image)?;
            preprocessor.process(source)
        })
        .await
        .map_err(|e| ExtractionError::Internal(format!("preprocessing task failed: {}", e)))??;

        tracing::debug!(
            "Preprocessed to {}x{} in {}ms",
            preprocessed.image.width(),
            preprocessed.image.height(),
            preprocessed.total_time_ms
        );
        on_progress(PREPROCESSED_PERCENT);
        let mut last_reported = PREPROCESSED_PERCENT;

        let (tx, mut rx) = mpsc::unbounded_channel::<f32>();
        let bitmap = preprocessed.image;
        let engine_handle = Arc::clone(&recognizer);
        let recognition = tokio::task::spawn_blocking(move || {
            engine_handle.recognize(&bitmap, &|fraction: f32| {
                let _ = tx.send(fraction);
            })
        });

        // Ends when the engine returns and the sender is dropped
        while let Some(fraction) = rx.recv().await {
            let percent = recognition_percent(fraction);
            tracing::trace!(percent, "recognition progress");
            on_progress(percent);
            last_reported = percent;
        }

        let raw_text = recognition
            .await
            .map_err(|e| ExtractionError::Internal(format!("recognition task failed: {}", e)))??;

        if raw_text.trim().is_empty() {
            return Err(ExtractionError::Recognition(
                "engine returned no text".to_string(),
            ));
        }

        let ParsedRecord { record, sources } = parse_record(&raw_text);
        if last_reported != 100 {
            on_progress(100);
        }

        tracing::info!(
            "Scan completed in {}ms with {}, text length: {}, fields resolved: {}",
            start.elapsed().as_millis(),
            recognizer.name(),
            raw_text.len(),
            record.resolved_count()
        );

        Ok(Extraction {
            record,
            raw_text,
            sources,
            engine: recognizer.name(),
        })
    }

    /// Extraction only, for text recognized elsewhere.
    pub fn parse_text(&self, raw_text: &str) -> ParsedRecord {
        parse_record(raw_text)
    }

    fn recognizer(&self, name: Option<&str>) -> Result<Arc<dyn Recognizer>, ExtractionError> {
        match name {
            Some(name) => self
                .engines
                .get(name)
                .ok_or_else(|| ExtractionError::UnknownEngine(name.to_string())),
            None => self.engines.default().ok_or_else(|| {
                ExtractionError::Initialization("no default OCR engine".to_string())
            }),
        }
    }
}

/// Map engine progress in `[0, 1]` onto `10..=100`.
pub fn recognition_percent(fraction: f32) -> u8 {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    PREPROCESSED_PERCENT + (fraction * RECOGNITION_SPAN).round() as u8
}

/// What the registration form receives after a scan, successful or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    pub record: PedigreeRecord,
    pub form: FormPrefill,
    pub raw_text: String,
    pub sources: Vec<FieldSource>,
    pub engine: Option<&'static str>,
    /// True when nothing could be extracted and the user fills the form in
    pub manual_entry: bool,
    pub error: Option<String>,
}

impl ScanOutcome {
    pub fn from_extraction(extraction: Extraction, today: NaiveDate) -> Self {
        Self {
            form: FormPrefill::from_record(&extraction.record, today),
            record: extraction.record,
            raw_text: extraction.raw_text,
            sources: extraction.sources,
            engine: Some(extraction.engine),
            manual_entry: false,
            error: None,
        }
    }

    pub fn manual_entry(error: &ExtractionError, today: NaiveDate) -> Self {
        Self {
            record: PedigreeRecord::default(),
            form: FormPrefill::empty(today),
            raw_text: String::new(),
            sources: Vec::new(),
            engine: None,
            manual_entry: true,
            error: Some(error.to_string()),
        }
    }

    pub fn from_result(result: Result<Extraction, ExtractionError>, today: NaiveDate) -> Self {
        match result {
            Ok(extraction) => Self::from_extraction(extraction, today),
            Err(e) => {
                tracing::warn!(code = e.code(), "Scan failed, continuing with manual entry: {}", e);
                Self::manual_entry(&e, today)
            }
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    generation: u64,
    latest: Option<Extraction>,
}

/// Scan attempts of one user. Starting a new attempt discards whatever the
/// previous one produced, including a result it has yet to deliver.
pub struct ScanSession {
    pipeline: Arc<ExtractionPipeline>,
    state: Mutex<SessionState>,
}

impl ScanSession {
    pub fn new(pipeline: Arc<ExtractionPipeline>) -> Self {
        Self {
            pipeline,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Run one attempt. Never fails: errors become a manual-entry outcome.
    pub async fn scan<F>(&self, image: Vec<u8>, on_progress: F) -> ScanOutcome
    where
        F: FnMut(u8) + Send,
    {
        let result = self.attempt(image, on_progress).await;
        ScanOutcome::from_result(result, Local::now().date_naive())
    }

    /// Run one attempt and keep its extraction if no newer attempt started.
    pub async fn attempt<F>(&self, image: Vec<u8>, on_progress: F) -> Result<Extraction, ExtractionError>
    where
        F: FnMut(u8) + Send,
    {
        let generation = self.begin();
        let extraction = self.pipeline.extract(image, on_progress).await?;
        self.complete(generation, extraction)
    }

    /// Extraction of the latest finished attempt, if it succeeded.
    pub fn latest(&self) -> Option<Extraction> {
        self.lock().latest.clone()
    }

    fn begin(&self) -> u64 {
        let mut state = self.lock();
        state.generation += 1;
        state.latest = None;
        state.generation
    }

    fn complete(&self, generation: u64, extraction: Extraction) -> Result<Extraction, ExtractionError> {
        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!(generation, current = state.generation, "discarding superseded scan");
            return Err(ExtractionError::Superseded);
        }
        state.latest = Some(extraction.clone());
        Ok(extraction)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
