//! Router and handlers for the submission facade (spec §4.4): `POST
//! /batches` signs and submits a batch; `GET /batch_statuses` polls
//! status directly without resubmitting.

use crate::error::AppError;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use prost::Message as _;
use sc_batcher::Batcher;
use sc_platform::SubmissionPort;
use sc_schema::Transaction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Shared state handed to every route handler.
#[derive(Clone)]
pub struct AppState {
    pub batcher: Arc<Batcher>,
    pub submission: Arc<dyn SubmissionPort>,
}

/// Build the submission facade's router (spec §1 scope: submission and
/// status only, no read endpoints — those live in C6's query surface).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/batches", post(submit_batch))
        .route("/batch_statuses", get(batch_statuses))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Deserialize)]
struct SubmitBatchRequest {
    /// Hex-encoded, already user-signed `Transaction` protobuf messages.
    transactions: Vec<String>,
    #[serde(default)]
    wait: bool,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    10_000
}

#[derive(Serialize)]
struct SubmitBatchResponse {
    batch_id: String,
    status: String,
}

async fn submit_batch(
    State(state): State<AppState>,
    Json(request): Json<SubmitBatchRequest>,
) -> Result<Json<SubmitBatchResponse>, AppError> {
    let transactions = request
        .transactions
        .iter()
        .map(|hex_str| {
            let bytes = hex::decode(hex_str).map_err(|e| AppError::BadRequest(format!("invalid hex: {e}")))?;
            Transaction::decode(bytes.as_slice())
                .map_err(|e| AppError::BadRequest(format!("invalid transaction: {e}")))
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    let outcome = state
        .batcher
        .submit_batch(transactions, request.wait, Duration::from_millis(request.timeout_ms))
        .await?;

    Ok(Json(SubmitBatchResponse {
        batch_id: outcome.batch_id,
        status: format!("{:?}", outcome.status).to_uppercase(),
    }))
}

#[derive(Deserialize)]
struct BatchStatusesQuery {
    ids: String,
}

async fn batch_statuses(
    State(state): State<AppState>,
    Query(query): Query<BatchStatusesQuery>,
) -> Result<Json<HashMap<String, String>>, AppError> {
    let ids: Vec<String> = query.ids.split(',').map(str::to_string).filter(|s| !s.is_empty()).collect();
    if ids.is_empty() {
        return Err(AppError::BadRequest("ids must not be empty".to_string()));
    }

    let statuses = state
        .submission
        .status(&ids, false, Duration::from_secs(0))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(
        statuses
            .into_iter()
            .map(|(id, status)| (id, format!("{status:?}").to_uppercase()))
            .collect(),
    ))
}
