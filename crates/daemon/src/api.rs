// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP surface: health endpoints and batch ingestion.
//!
//! Status mapping for `POST /api/logs`:
//! - 400: structural problems (empty batch, empty timestamp or message)
//! - 422: schema problems (bad JSON, unknown level/source, wrong types)
//! - 500: formatting or I/O failures (detail only in the fallback stream)

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use unilog_writer::{ingest_json, ErrorCategory, IngestError, LogWriter};

pub const SERVICE_NAME: &str = "Unified Logging API";
pub const SERVICE_ID: &str = "unified-logging-api";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error while processing logs";

/// Shared state for handlers.
#[derive(Clone)]
pub struct AppState {
    writer: Arc<LogWriter>,
}

/// Build the router with permissive CORS for the browser extension.
pub fn router(writer: Arc<LogWriter>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/logs", post(receive_logs))
        .layer(cors)
        .with_state(AppState { writer })
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct IngestResponse {
    pub status: String,
    pub message: String,
    pub processed_count: usize,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: SERVICE_NAME.to_string(),
        version: VERSION.to_string(),
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_ID.to_string(),
    })
}

/// Ingest a batch. Parsing, validation and the file append all run on the
/// blocking pool, since the writer blocks on filesystem calls.
async fn receive_logs(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<IngestResponse>, ApiError> {
    let writer = Arc::clone(&state.writer);
    let result = tokio::task::spawn_blocking(move || {
        let result = ingest_json(&writer, &body);
        match &result {
            Ok(count) => info!("Successfully processed {} log entries", count),
            Err(e) => match e.category() {
                ErrorCategory::Structural | ErrorCategory::Schema => {
                    warn!(error = %e, "rejected log batch")
                }
                ErrorCategory::Formatting | ErrorCategory::Io => {
                    error!(error = %e, "error processing log batch")
                }
            },
        }
        result
    })
    .await
    .map_err(|e| {
        error!(error = %e, "ingestion task failed");
        ApiError::internal()
    })?;

    let count = result?;
    Ok(Json(IngestResponse {
        status: "success".to_string(),
        message: format!("Successfully processed {} log entries", count),
        processed_count: count,
    }))
}

/// Error response with a JSON body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: INTERNAL_ERROR_MESSAGE.to_string(),
            details: None,
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err.category() {
            ErrorCategory::Structural => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
                details: None,
            },
            ErrorCategory::Schema => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: "Validation error".to_string(),
                details: Some(match err {
                    IngestError::Schema(detail) => detail,
                    other => other.to_string(),
                }),
            },
            ErrorCategory::Formatting | ErrorCategory::Io => Self::internal(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: "error".to_string(),
            message: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
