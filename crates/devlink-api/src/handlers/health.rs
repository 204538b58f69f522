//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness probe
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Readiness probe: verifies database and Redis connectivity
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    // Database must answer
    devlink_db::ping(state.service_context().pool())
        .await
        .map_err(|e| ApiError::internal(anyhow::anyhow!("Database unavailable: {e}")))?;

    // Redis must answer
    state
        .service_context()
        .redis_pool()
        .health_check()
        .await
        .map_err(|e| ApiError::internal(anyhow::anyhow!("Redis unavailable: {e}")))?;

    Ok(Json(HealthResponse { status: "ready" }))
}
