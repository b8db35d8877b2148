//! Shared server state, health check and error mapping

use crate::completion::CompletionError;
use crate::notes::{NoteError, NoteManager};
use crate::prompts::PromptService;
use crate::AppState;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

/// Shared server state
pub struct ServerState {
    pub notes: NoteManager,
    pub prompts: PromptService,
    /// Origins allowed by the CORS layer
    pub allowed_origins: Vec<String>,
}

/// Shared state handed to every handler
pub type NotesState = Arc<ServerState>;

impl ServerState {
    pub fn new(app: AppState) -> Self {
        Self {
            notes: NoteManager::new(app.store),
            prompts: PromptService::new(app.completion),
            allowed_origins: app.config.allowed_origins.clone(),
        }
    }
}

// ============================================================================
// Health check
// ============================================================================

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check handler. 503 + `"unhealthy"` when the note store does not answer.
pub async fn health(State(state): State<NotesState>) -> (StatusCode, Json<HealthResponse>) {
    let store_ok = state.notes.store().health_check().await.unwrap_or(false);

    let (http_status, status) = if store_ok {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

// ============================================================================
// Errors
// ============================================================================

/// API error type
#[derive(Debug)]
pub enum AppError {
    Internal(anyhow::Error),
    NotFound(String),
    BadRequest(String),
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal(e) => {
                tracing::error!(error = %format!("{:#}", e), "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<NoteError> for AppError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::NotFound(_) => AppError::NotFound(err.to_string()),
            NoteError::Validation(msg) => AppError::BadRequest(msg),
            NoteError::Store(e) => AppError::Internal(e),
        }
    }
}

impl From<CompletionError> for AppError {
    fn from(err: CompletionError) -> Self {
        AppError::ServiceUnavailable(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
