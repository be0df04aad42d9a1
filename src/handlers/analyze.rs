use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, Method, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::AppError;
use crate::metrics::{ANALYZE_REQUESTS, RATE_LIMITED, UPSTREAM_FAILURES};
use crate::models::AnalyzeRequest;
use crate::prompt::{build_prompt, strip_code_fences};
use crate::rate_limit::client_identifier;
use crate::redact::fingerprint;
use crate::state::AppState;

pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    if method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }
    ANALYZE_REQUESTS.inc();

    // an oversized or unreadable body is reported only after the method check
    let body = body.map_err(|e| {
        tracing::warn!(error = %e, "could not read request body");
        AppError::InvalidBody
    })?;
    let payload: AnalyzeRequest = serde_json::from_slice(&body).map_err(|_| AppError::InvalidBody)?;
    let url = payload
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::MissingField("URL is required".into()))?;

    let client = client_identifier(&headers);
    if !state.rate_limiter.check_and_record(&client, Instant::now()) {
        RATE_LIMITED.inc();
        tracing::warn!(client = %fingerprint(&client), "analysis rate limit reached");
        return Err(AppError::RateLimited(limit_message(
            state.rate_limiter.max_requests(),
            state.rate_limiter.window(),
        )));
    }

    // manual content wins; otherwise try the scraper, which never fails the request
    let content = match payload.page_content {
        Some(text) if !text.trim().is_empty() => text,
        _ => state.scraper.fetch_text(&url).await,
    };
    if content.is_empty() {
        tracing::info!("no page content available, grading from url only");
    }

    let prompt = build_prompt(&url, &content);
    let completion = state.model.complete(&prompt).await.inspect_err(|e| {
        UPSTREAM_FAILURES.inc();
        tracing::error!(error = %e, "model call failed");
    })?;

    let text = strip_code_fences(&completion);
    if let Err(e) = serde_json::from_str::<serde_json::Value>(text) {
        UPSTREAM_FAILURES.inc();
        tracing::error!(error = %e, "model output is not valid JSON");
        return Err(AppError::Upstream(format!("Model returned invalid JSON: {}", e)));
    }

    // relay the model's text as-is, not a re-serialization
    Ok(([(header::CONTENT_TYPE, "application/json")], text.to_string()).into_response())
}

fn limit_message(max_requests: usize, window: Duration) -> String {
    let secs = window.as_secs();
    let period = match secs {
        3600 => "per hour".to_string(),
        s if s % 3600 == 0 => format!("every {} hours", s / 3600),
        s if s % 60 == 0 => format!("every {} minutes", s / 60),
        s => format!("every {} seconds", s),
    };
    format!(
        "Rate limit reached. You can run {} analyses {}. Come back later!",
        max_requests, period
    )
}
