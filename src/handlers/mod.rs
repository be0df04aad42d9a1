mod analyze;
mod health;
mod metrics;
mod subscribe;

pub use analyze::analyze_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use subscribe::subscribe_handler;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{any, get},
};
use std::sync::Arc;

use crate::state::AppState;

// Request bodies are a url, an email or pasted page copy
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

// The /api routes take any method so non-POST requests get the JSON 405 body.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/analyze", any(analyze_handler))
        .route("/api/subscribe", any(subscribe_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
