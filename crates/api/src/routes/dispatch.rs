//! Transition-message dispatch route.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

use crate::app::AppState;

/// POST /api/v1/dispatch
///
/// The single write entry point. The body is a wire-format transition
/// message (`{"type": "...", "payload": ...}`); unrecognized types are
/// accepted and ignored, so the response is 204 either way.
pub async fn dispatch(State(state): State<AppState>, Json(message): Json<Value>) -> StatusCode {
    state.store.dispatch_message(&message);
    StatusCode::NO_CONTENT
}
