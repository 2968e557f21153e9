use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::Json,
};
use serde::Serialize;
use tracing::warn;

use crate::api::ApiState;
use crate::models::{CornYieldRecord, WeatherObservation, WeatherYearStats};
use crate::query::QueryError;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Undecodable query strings are treated like an empty one
fn query_params(params: Option<Query<HashMap<String, String>>>) -> HashMap<String, String> {
    params.map(|Query(params)| params).unwrap_or_default()
}

/// Render a query result, turning failures into an empty page
fn fail_soft<T>(route: &str, result: Result<Vec<T>, QueryError>) -> Json<DataResponse<T>> {
    let data = match result {
        Ok(rows) => rows,
        Err(e) => {
            warn!(route, error = %e, "Invalid request, returning empty page");
            Vec::new()
        }
    };
    Json(DataResponse { data })
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/weather?date=&station_id=&page=&per_page=
pub async fn weather_handler(
    Extension(state): Extension<Arc<ApiState>>,
    params: Option<Query<HashMap<String, String>>>,
) -> Json<DataResponse<WeatherObservation>> {
    fail_soft("/api/weather", state.queries.weather_from_params(&query_params(params)).await)
}

/// GET /api/weather/stats?year=&station_id=&page=&per_page=
pub async fn weather_stats_handler(
    Extension(state): Extension<Arc<ApiState>>,
    params: Option<Query<HashMap<String, String>>>,
) -> Json<DataResponse<WeatherYearStats>> {
    fail_soft("/api/weather/stats", state.queries.weather_stats_from_params(&query_params(params)).await)
}

/// GET /api/yield?year=&page=&per_page=
pub async fn yield_handler(
    Extension(state): Extension<Arc<ApiState>>,
    params: Option<Query<HashMap<String, String>>>,
) -> Json<DataResponse<CornYieldRecord>> {
    fail_soft("/api/yield", state.queries.yields_from_params(&query_params(params)).await)
}

/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
