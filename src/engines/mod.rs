//! OCR engine implementations
//!
//! This module contains implementations of the Recognizer trait for different
//! OCR backends. Engines are conditionally compiled based on feature flags.

#[cfg(feature = "engine-ocrs")]
pub mod ocrs;

#[cfg(feature = "engine-leptess")]
pub mod leptess;

use crate::config::Config;
use crate::engine::Recognizer;
use crate::error::ExtractionError;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Information about an available engine
#[derive(Debug, Clone, Serialize)]
pub struct EngineInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub supported_formats: Vec<String>,
}

/// Registry of available OCR engines
pub struct EngineRegistry {
    engines: Vec<Arc<dyn Recognizer>>,
    default_engine: String,
}

impl EngineRegistry {
    /// Create a new engine registry with all compiled engines initialized
    #[allow(unused_mut)]
    pub fn new(config: &Config) -> Result<Self, ExtractionError> {
        let mut engines: Vec<Arc<dyn Recognizer>> = Vec::new();

        #[cfg(feature = "engine-ocrs")]
        {
            tracing::info!("Initializing ocrs engine...");
            engines.push(Arc::new(ocrs::OcrsEngine::new(config)?));
        }

        #[cfg(feature = "engine-leptess")]
        {
            tracing::info!("Initializing leptess engine...");
            engines.push(Arc::new(leptess::LeptessEngine::new(config)?));
        }

        if engines.is_empty() {
            return Err(ExtractionError::Initialization(
                "No OCR engines available. Build with --features engine-ocrs or --features engine-leptess".to_string()
            ));
        }

        Self::with_engines(engines, config.engine.as_deref())
    }

    /// Build a registry from already constructed engines
    ///
    /// The first engine is the default unless `default` names another one.
    pub fn with_engines(
        engines: Vec<Arc<dyn Recognizer>>,
        default: Option<&str>,
    ) -> Result<Self, ExtractionError> {
        let first = engines
            .first()
            .map(|e| e.name().to_string())
            .ok_or_else(|| ExtractionError::Initialization("empty engine registry".to_string()))?;

        let default_engine = match default {
            Some(name) if engines.iter().any(|e| e.name() == name) => name.to_string(),
            Some(name) => return Err(ExtractionError::UnknownEngine(name.to_string())),
            None => first,
        };

        Ok(Self {
            engines,
            default_engine,
        })
    }

    /// Get an engine by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Recognizer>> {
        self.engines.iter().find(|e| e.name() == name).cloned()
    }

    /// Get the default engine
    pub fn default(&self) -> Option<Arc<dyn Recognizer>> {
        self.get(&self.default_engine)
    }

    /// Get the default engine name
    pub fn default_name(&self) -> &str {
        &self.default_engine
    }

    /// List all available engine names
    pub fn list(&self) -> Vec<&str> {
        self.engines.iter().map(|e| e.name()).collect()
    }

    /// Get info about all available engines
    pub fn info(&self) -> Vec<EngineInfo> {
        self.engines
            .iter()
            .map(|e| EngineInfo {
                name: e.name(),
                description: e.description(),
                supported_formats: e.supported_formats(),
            })
            .collect()
    }
}

/// Directory under the user cache dir where engines keep downloaded models
#[allow(dead_code)]
pub(crate) fn cache_dir() -> Result<PathBuf, ExtractionError> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("pedigree-scan");

    std::fs::create_dir_all(&dir).map_err(|e| {
        ExtractionError::Initialization(format!("Failed to create cache directory: {}", e))
    })?;

    Ok(dir)
}

/// Download a file from URL to path using ureq
#[allow(dead_code)]
pub(crate) fn download_file(url: &str, path: &Path) -> Result<(), ExtractionError> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| ExtractionError::Initialization(format!("Failed to download {}: {}", url, e)))?;

    // Read response body and write to file
    let buffer = response.into_body().read_to_vec().map_err(|e| {
        ExtractionError::Initialization(format!("Failed to read response body: {}", e))
    })?;

    let mut file = File::create(path).map_err(|e| {
        ExtractionError::Initialization(format!("Failed to create {}: {}", path.display(), e))
    })?;

    file.write_all(&buffer).map_err(|e| {
        ExtractionError::Initialization(format!("Failed to write {}: {}", path.display(), e))
    })?;

    Ok(())
}

/// Return the cached copy of `filename`, downloading it from `url` first if
/// it is not there yet.
#[allow(dead_code)]
pub(crate) fn ensure_downloaded(
    url: &str,
    dir: &Path,
    filename: &str,
) -> Result<PathBuf, ExtractionError> {
    let path = dir.join(filename);

    if !path.exists() {
        tracing::info!("Downloading {} (this may take a moment)...", filename);
        download_file(url, &path)?;
        tracing::info!("Downloaded {} to {:?}", filename, path);
    } else {
        tracing::info!("Using cached {} from {:?}", filename, path);
    }

    Ok(path)
}
