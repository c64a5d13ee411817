//! Failure recovery routes.
//!
//! Surface for the supervisor's degraded mode: inspect the captured
//! failure and run one of the two recovery actions.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use engine::FailureReport;

use crate::app::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryStatus {
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReport>,
}

/// GET /api/v1/recovery
pub async fn recovery_status(State(state): State<AppState>) -> Json<RecoveryStatus> {
    Json(RecoveryStatus {
        degraded: state.supervisor.is_degraded(),
        failure: state.supervisor.failure(),
    })
}

/// Recovery actions offered on the degraded view.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryAction {
    /// Re-initialize all state from scratch.
    Reset,
    /// Clear the failure flag, preserving prior state.
    Retry,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryRequest {
    pub action: RecoveryAction,
}

/// POST /api/v1/recovery
pub async fn recover(
    State(state): State<AppState>,
    Json(request): Json<RecoveryRequest>,
) -> impl IntoResponse {
    match request.action {
        RecoveryAction::Reset => state.supervisor.reset(&state.store),
        RecoveryAction::Retry => state.supervisor.retry(),
    }
    info!(action = ?request.action, "Recovery action applied");

    (
        StatusCode::OK,
        Json(RecoveryStatus {
            degraded: state.supervisor.is_degraded(),
            failure: state.supervisor.failure(),
        }),
    )
}
