use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::Method,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;

use crate::error::AppError;
use crate::metrics::{SUBSCRIPTIONS, UPSTREAM_FAILURES};
use crate::models::SubscribeRequest;
use crate::redact::fingerprint;
use crate::state::AppState;

pub async fn subscribe_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    if method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    // an oversized or unreadable body is reported only after the method check
    let body = body.map_err(|e| {
        tracing::warn!(error = %e, "could not read request body");
        AppError::InvalidBody
    })?;
    let payload: SubscribeRequest = serde_json::from_slice(&body).map_err(|_| AppError::InvalidBody)?;

    // minimal syntactic check only
    let email = payload
        .email
        .filter(|e| e.contains('@'))
        .ok_or_else(|| AppError::MissingField("Valid email required".into()))?;
    let url = payload.url.unwrap_or_default();

    state.waitlist.add_signup(&email, &url).await.inspect_err(|e| {
        UPSTREAM_FAILURES.inc();
        tracing::error!(email = %fingerprint(&email), error = %e, "waitlist signup failed");
    })?;

    SUBSCRIPTIONS.inc();
    tracing::info!(email = %fingerprint(&email), "waitlist signup recorded");
    Ok(Json(json!({ "success": true })).into_response())
}
