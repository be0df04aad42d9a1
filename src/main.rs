mod clients;
mod config;
mod error;
mod handlers;
mod metrics;
mod models;
mod prompt;
mod rate_limit;
mod redact;
mod state;

use clap::Parser;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::config::Args;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("landing_grader=info,tower_http=info")),
        )
        .init();

    // parse cli arguments (secrets come from the environment)
    let args = Args::parse();
    for name in args.missing_secrets() {
        tracing::warn!("{} is not set", name);
    }

    let state = Arc::new(AppState::from_args(&args));
    let app = handlers::router(state).layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Grader running on http://localhost:{}", args.port);
    tracing::info!("Model: {} (max_tokens {})", args.model, args.max_tokens);
    tracing::info!(
        "Rate limit: {} analyses per {} seconds",
        args.rate_limit, args.rate_window
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
