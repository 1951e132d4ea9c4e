//! `/api/v1` handlers. Each parses the query, runs one bus operation under
//! a fresh request context and answers with the resulting tx.

use crate::http::{ApiError, AppState};
use crate::request::{OperatorRequest, TxQuery};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use pr_01_correction_bus::BusError;
use relayer_telemetry::{encode_metrics, record_correction_op};
use shared_types::Tx;
use tracing::warn;

fn outcome<T>(result: &Result<T, BusError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(BusError::InvalidInput(_)) => "invalid",
        Err(BusError::Store(_)) => "store_error",
    }
}

fn parse(op: &'static str, query: TxQuery) -> Result<OperatorRequest, ApiError> {
    query.parse().map_err(|e| {
        record_correction_op(op, "invalid");
        ApiError::from(e)
    })
}

fn finish<T>(op: &'static str, result: Result<T, BusError>) -> Result<T, ApiError> {
    record_correction_op(op, outcome(&result));
    result.map_err(|e| {
        warn!(op, error = %e, "[relayer] Operator request failed");
        ApiError::from(e)
    })
}

/// `GET /api/v1/patch`
pub async fn patch(
    State(state): State<AppState>,
    Query(query): Query<TxQuery>,
) -> Result<Json<Tx>, ApiError> {
    let request = parse("patch", query)?;
    let tx = request.to_tx();
    let ctx = state.request_context();
    finish("patch", state.corrections.patch(&ctx, request.chain, &tx).await)?;
    Ok(Json(tx))
}

/// `GET /api/v1/skip`
pub async fn skip(
    State(state): State<AppState>,
    Query(query): Query<TxQuery>,
) -> Result<Json<Tx>, ApiError> {
    let request = parse("skip", query)?;
    let mut tx = request.to_tx();
    let ctx = state.request_context();
    finish("skip", state.skips.skip(&ctx, request.chain, &tx).await)?;
    tx.skipped = true;
    Ok(Json(tx))
}

/// `GET /api/v1/check_skip`
pub async fn check_skip(
    State(state): State<AppState>,
    Query(query): Query<TxQuery>,
) -> Result<Json<Tx>, ApiError> {
    let request = parse("check_skip", query)?;
    let ctx = state.request_context();
    let tx = finish(
        "check_skip",
        state.skips.check(&ctx, request.chain, request.to_tx()).await,
    )?;
    Ok(Json(tx))
}

/// `GET /metrics`
pub async fn metrics() -> impl IntoResponse {
    match encode_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "poly-relayer",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
