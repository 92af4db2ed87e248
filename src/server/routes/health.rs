//! Health Routes
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (backend answers its health check)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::api::HealthStatus;
use crate::server::error::ServerResult;
use crate::server::state::ServerState;

/// Full health status body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    pub dashboard_loaded: bool,
    pub uptime_seconds: u64,
    pub version: String,
}

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Passes the backend's own health report through, or 503 when it cannot be
/// reached.
pub async fn readiness(State(state): State<Arc<ServerState>>) -> ServerResult<Json<HealthStatus>> {
    let health = state.backend.health().await?;
    Ok(Json(health))
}

/// GET /health
pub async fn full_health(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    let backend_ok = state.backend.health().await.is_ok();
    let dashboard_loaded = state.loader.state().is_connected();

    let status = match (backend_ok, dashboard_loaded) {
        (true, true) => "healthy",
        (false, false) => "unhealthy",
        _ => "degraded",
    };

    Json(HealthResponse {
        status: status.to_string(),
        backend: if backend_ok { "ok" } else { "error" }.to_string(),
        dashboard_loaded,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
