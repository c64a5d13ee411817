//! Dashboard read-view routes.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use engine::kpi::{kpi_cards, Kpi};
use engine::notification::{Notification, NotificationKind};
use engine::store::DashboardView;
use engine::Action;

use crate::app::AppState;
use crate::error::ApiError;

/// Composed read view plus a generation timestamp.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub view: DashboardView,
    pub generated_at: DateTime<Utc>,
}

/// GET /api/v1/dashboard
///
/// Current state composed with the latest simulator output.
pub async fn get_dashboard(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let view = state.store.view();

    info!(
        city = %view.state.selected_city,
        connected = view.state.is_connected,
        activity_count = view.activities.len(),
        "Fetched dashboard view"
    );

    Ok((
        StatusCode::OK,
        Json(DashboardResponse {
            view,
            generated_at: Utc::now(),
        }),
    ))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiResponse {
    pub kpis: Vec<Kpi>,
    pub generated_at: DateTime<Utc>,
}

/// GET /api/v1/dashboard/kpis
///
/// KPI projection, derived under the failure supervisor. While degraded
/// the derivation is skipped and the recovery surface takes over.
pub async fn get_kpis(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let store = &state.store;
    let snapshot = store.realtime();
    let city = store.state().selected_city;

    let kpis = state
        .supervisor
        .guard("kpi_cards", || {
            kpi_cards(city, &snapshot, &mut rand::thread_rng())
        })
        .ok_or_else(|| {
            ApiError::ServiceUnavailable(
                "Dashboard degraded; recover via POST /api/v1/recovery".to_string(),
            )
        })?;

    Ok((
        StatusCode::OK,
        Json(KpiResponse {
            kpis,
            generated_at: Utc::now(),
        }),
    ))
}

/// POST /api/v1/dashboard/refresh
///
/// Emits a success notification, as the dashboard's refresh control does.
/// If the notification cannot be built, nothing is emitted and the
/// request still succeeds.
pub async fn refresh(State(state): State<AppState>) -> impl IntoResponse {
    match Notification::build(
        "Dashboard refreshed successfully",
        NotificationKind::Success,
        None,
    ) {
        Some(notification) => {
            let body = Json(notification.clone());
            state.store.dispatch(Action::AddNotification(notification));
            (StatusCode::OK, body).into_response()
        }
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Store;

    #[tokio::test]
    async fn test_dashboard_response_serialization() {
        let store = Store::start_seeded(Some(1));
        let response = DashboardResponse {
            view: store.view(),
            generated_at: Utc::now(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("selectedCity"));
        assert!(json.contains("realtime"));
        assert!(json.contains("activities"));
        assert!(json.contains("generatedAt"));
        store.shutdown();
    }
}
