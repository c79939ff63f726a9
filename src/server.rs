//! HTTP front end: accepts an uploaded log and returns the report as a download.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{info, warn};

use crate::error::JoblogError;
use crate::pipeline::Pipeline;

/// Multipart field carrying the uploaded log.
const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, Copy)]
struct AppState {
    pipeline: Pipeline,
}

/// Serves the upload endpoint on `bind` until the process is stopped.
pub async fn serve(pipeline: Pipeline, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Starting log report server on {}", listener.local_addr()?);
    axum::serve(listener, router(pipeline)).await?;
    Ok(())
}

pub fn router(pipeline: Pipeline) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/process-log-file/", post(process_log_file))
        // Logs can be any length.
        .layer(DefaultBodyLimit::disable())
        .with_state(Arc::new(AppState { pipeline }))
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to the Log Monitoring Application API." }))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn process_log_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, JoblogError> {
    let mut contents = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(UPLOAD_FIELD) {
            contents = Some(String::from_utf8(field.bytes().await?.to_vec())?);
            break;
        }
    }
    let contents = contents.ok_or(JoblogError::MissingUpload)?;

    let report = state.pipeline.report(&contents);
    let filename = report_file_name(Utc::now(), "txt");
    info!(bytes = contents.len(), %filename, "processed uploaded log");

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        report,
    )
        .into_response())
}

/// `<UTC YYYYMMDDHHMMSS>_log_output.<ext>`
pub fn report_file_name(now: DateTime<Utc>, extension: &str) -> String {
    format!("{}_log_output.{extension}", now.format("%Y%m%d%H%M%S"))
}

impl IntoResponse for JoblogError {
    fn into_response(self) -> Response {
        let status = match &self {
            JoblogError::MissingUpload | JoblogError::InvalidEncoding(_) => {
                StatusCode::BAD_REQUEST
            }
            JoblogError::Multipart(e) => e.status(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(%status, "rejecting upload: {self}");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
