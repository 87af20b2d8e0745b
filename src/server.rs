use crate::config::Config;
use crate::engines::{EngineInfo, EngineRegistry};
use crate::error::ExtractionError;
use crate::extraction::ParsedRecord;
use crate::orchestrator::{ExtractionPipeline, ScanOutcome};
use crate::preprocessing::PreprocessOptions;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and headers on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ExtractionPipeline>,
    pub config: Arc<Config>,
}

/// Scan response
#[derive(Serialize)]
pub struct ScanResponse {
    #[serde(flatten)]
    pub outcome: ScanOutcome,
    pub processing_time_ms: u64,
}

#[derive(Deserialize)]
pub struct ParseRequest {
    pub text: String,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Server info response
#[derive(Serialize)]
pub struct InfoResponse {
    pub version: String,
    pub default_engine: String,
    pub available_engines: Vec<EngineInfo>,
    pub max_file_size_bytes: usize,
    pub default_language: String,
    pub preprocessing: PreprocessOptions,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_file_size + MULTIPART_OVERHEAD;

    Router::new()
        .route("/scan", post(handle_scan))
        .route("/parse", post(handle_parse))
        .route("/health", get(handle_health))
        .route("/info", get(handle_info))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server
pub async fn run(config: Config) -> anyhow::Result<()> {
    let pipeline = build_pipeline(&config)?;
    let addr = format!("{}:{}", config.host, config.port);

    let state = AppState {
        pipeline: Arc::new(pipeline),
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}

/// Initialize the compiled engines and wrap them in a pipeline
pub fn build_pipeline(config: &Config) -> Result<ExtractionPipeline, ExtractionError> {
    let registry = EngineRegistry::new(config)?;
    tracing::info!(
        "Available engines: {:?} (default: {})",
        registry.list(),
        registry.default_name()
    );
    ExtractionPipeline::new(Arc::new(registry), config.preprocess)
}

/// Handle scan requests
async fn handle_scan(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ScanResponse>, ExtractionError> {
    let start = Instant::now();
    let max = state.config.max_file_size;
    let declared_size = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<usize>().ok());
    let read_error = |e: MultipartError, context: &str| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ExtractionError::ImageTooLarge {
                size: declared_size.unwrap_or(max + 1),
                max,
            }
        } else {
            ExtractionError::InvalidRequest(format!("{}: {}", context, e))
        }
    };

    let mut file_data: Option<Bytes> = None;
    let mut engine: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| read_error(e, "Failed to parse multipart"))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                if let Some(mime) = field.content_type() {
                    if !mime.starts_with("image/") {
                        tracing::warn!("Received file with content type: {}", mime);
                    }
                }
                file_data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| read_error(e, "Failed to read file data"))?,
                );
            }
            "engine" => {
                let value = field.text().await.map_err(|e| {
                    ExtractionError::InvalidRequest(format!("Invalid engine: {}", e))
                })?;
                let value = value.trim();
                if !value.is_empty() {
                    engine = Some(value.to_string());
                }
            }
            _ => {}
        }
    }

    let data = file_data.ok_or(ExtractionError::MissingFile)?;

    if data.len() > max {
        return Err(ExtractionError::ImageTooLarge {
            size: data.len(),
            max,
        });
    }

    let result = state
        .pipeline
        .extract_with(engine.as_deref(), data.to_vec(), |percent| {
            tracing::trace!(percent, "scan progress");
        })
        .await;

    // Failures the user can recover from by typing the values in
    let outcome = match result {
        Err(e) if !e.is_recoverable() => return Err(e),
        result => ScanOutcome::from_result(result, Local::now().date_naive()),
    };

    Ok(Json(ScanResponse {
        outcome,
        processing_time_ms: start.elapsed().as_millis() as u64,
    }))
}

/// Handle extraction of already recognized text
async fn handle_parse(
    State(state): State<AppState>,
    Json(request): Json<ParseRequest>,
) -> Json<ParsedRecord> {
    Json(state.pipeline.parse_text(&request.text))
}

/// Handle health check requests
async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle info requests
async fn handle_info(State(state): State<AppState>) -> impl IntoResponse {
    let engines = state.pipeline.engines();
    Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        default_engine: engines.default_name().to_string(),
        available_engines: engines.info(),
        max_file_size_bytes: state.config.max_file_size,
        default_language: state.config.default_language.clone(),
        preprocessing: state.pipeline.preprocess_options(),
    })
}
