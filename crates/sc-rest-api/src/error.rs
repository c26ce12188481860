//! HTTP error mapping for the submission facade. Three kinds only — this
//! surface intentionally does not reproduce the JSON-RPC error taxonomy
//! of a full gateway (spec §1 scope: submission and status only).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sc_batcher::BatcherError;
use serde_json::json;

/// Error returned by a route handler, mapped to an HTTP status on response.
#[derive(Debug)]
pub enum AppError {
    /// The request body or a referenced batch was malformed or invalid.
    BadRequest(String),
    /// A queried batch id has no known status.
    NotFound(String),
    /// Platform round trip or internal failure.
    Internal(String),
}

impl From<BatcherError> for AppError {
    fn from(e: BatcherError) -> Self {
        match e {
            BatcherError::BatcherKeyMismatch { .. }
            | BatcherError::MalformedTransaction(_)
            | BatcherError::EmptyBatch => AppError::BadRequest(e.to_string()),
            BatcherError::SubmitRejected(_) | BatcherError::NotCommitted { .. } => {
                AppError::BadRequest(e.to_string())
            }
            BatcherError::Platform(_) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
