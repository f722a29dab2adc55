// ==========================================
// Medication Shortage CDS Service - API layer error types
// ==========================================
// Role: convert layer errors into distinct HTTP responses. A store failure
// ("unknown") is never allowed to look like an empty success.
// ==========================================

use crate::importer::ImportError;
use crate::repository::RepositoryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// API layer error type
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== caller errors =====
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    // ===== store reachability =====
    /// The dataset store could not be consulted; the answer is unknown,
    /// which is not the same as a negative answer.
    #[error("dataset store unavailable: {0}")]
    StoreUnavailable(String),

    // ===== update cycle =====
    #[error("export download failed: {message}")]
    DownloadFailed { message: String, log: Vec<String> },

    #[error("ledger import failed: {message}")]
    ImportFailed { message: String, log: Vec<String> },

    // ===== generic =====
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        // every repository failure makes the answer unknown; callers must
        // see a retry-worthy error, not a legitimate negative
        ApiError::StoreUnavailable(err.to_string())
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportFailed {
            message: err.to_string(),
            log: Vec::new(),
        }
    }
}

/// Result type alias
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// HTTP mapping
// ==========================================

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            ApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, None),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, None),
            ApiError::StoreUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, None),
            ApiError::DownloadFailed { log, .. } => (StatusCode::BAD_GATEWAY, Some(log.clone())),
            ApiError::ImportFailed { log, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, Some(log.clone()))
            }
            ApiError::InternalError(_) | ApiError::Other(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        let body = ErrorBody {
            status: "error",
            error: self.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
