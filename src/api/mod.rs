//! Read-only HTTP API.
//!
//! Every data route answers `200 {"data": [...]}`. Query failures are logged
//! and rendered as an empty page; no handler produces another status.

pub mod handlers;

use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::query::QueryService;

/// Shared handler state
pub struct ApiState {
    pub queries: QueryService,
}

/// Create the API router.
pub fn create_router(queries: QueryService) -> Router {
    let state = Arc::new(ApiState { queries });

    Router::new()
        .route("/api/weather", get(handlers::weather_handler))
        .route("/api/weather/stats", get(handlers::weather_stats_handler))
        .route("/api/yield", get(handlers::yield_handler))
        .route("/health", get(handlers::health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}

/// Bind and serve until ctrl-c
pub async fn serve(queries: QueryService, bind_addr: &str) -> crate::error::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Serving weather API");

    axum::serve(listener, create_router(queries))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Weather API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
