//! Web UI and JSON API.
//!
//! One page, one action: paste a URL, pick a language, translate. The API
//! re-runs the pipeline for the download route instead of caching the result;
//! every interaction is a fresh run.

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::language::TargetLanguage;
use crate::pipeline::TranslationPipeline;
use crate::PipelineError;

const INDEX_HTML: &str = include_str!("index.html");

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<TranslationPipeline>,
}

impl AppState {
    pub fn new(pipeline: TranslationPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub url: String,
    pub target_language: TargetLanguage,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub video_id: String,
    pub source_language: String,
    pub target_language: TargetLanguage,
    pub translated_text: String,
    pub file_name: String,
}

/// Pipeline error wrapped for HTTP transport.
pub struct ApiError(PipelineError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PipelineError::InvalidUrl(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PipelineError::SubtitlesDisabled { .. } | PipelineError::TranscriptNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            PipelineError::FetchFailed(_) | PipelineError::TranslationFailed { .. } => {
                StatusCode::BAD_GATEWAY
            }
        };

        (
            status,
            Json(json!({
                "error": self.0.to_string(),
                "kind": self.0.kind(),
            })),
        )
            .into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(error: PipelineError) -> Self {
        Self(error)
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/translate", post(translate))
        .route("/api/translate/download", get(download))
        .with_state(state)
}

/// Run the web UI until the process is stopped.
pub async fn run(config: &Config) -> crate::Result<()> {
    let pipeline = TranslationPipeline::new(config)?;
    let state = AppState::new(pipeline);

    let listener = TcpListener::bind(&config.server.bind).await?;
    tracing::info!("web UI listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> &'static str {
    "ok"
}

async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    tracing::info!(
        url = %request.url,
        target = request.target_language.code(),
        "received translate request"
    );

    let record = state
        .pipeline
        .translate_from_url(&request.url, request.target_language)
        .await
        .map_err(|error| {
            tracing::warn!(kind = error.kind(), "translate request failed: {error}");
            error
        })?;

    Ok(Json(TranslateResponse {
        file_name: record.download_file_name(),
        video_id: record.video_id,
        source_language: record.source_language,
        target_language: record.target_language,
        translated_text: record.text,
    }))
}

async fn download(
    State(state): State<AppState>,
    Query(request): Query<TranslateRequest>,
) -> Result<Response, ApiError> {
    let record = state
        .pipeline
        .translate_from_url(&request.url, request.target_language)
        .await?;

    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", record.download_file_name()),
        ),
    ];
    Ok((headers, record.text).into_response())
}
