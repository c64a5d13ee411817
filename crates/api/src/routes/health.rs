//! Health check endpoint handlers.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::app::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub engine: EngineHealth,
}

/// Simulation engine status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineHealth {
    /// Whether the session's realtime link is enabled.
    pub connected: bool,
    pub degraded: bool,
    pub activity_count: usize,
}

/// Simple status response for liveness probes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Full health check endpoint.
///
/// There is no external dependency to probe; the engine is in-process, so
/// this reports its composed status.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let view = state.store.view();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        engine: EngineHealth {
            connected: view.state.is_connected,
            degraded: state.supervisor.is_degraded(),
            activity_count: view.activities.len(),
        },
    })
}

/// Liveness probe endpoint.
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "alive".to_string(),
    })
}
