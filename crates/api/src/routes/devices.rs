//! Device query and analysis routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use catalog::{CityId, Device};
use engine::filter::{self, DEVICE_TYPE_FILTER};
use engine::notification::{Notification, NotificationKind};
use engine::Action;

use crate::app::AppState;
use crate::error::ApiError;

/// Device listing query parameters.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct DeviceQuery {
    /// Filter by device type ("all" disables the filter)
    #[validate(length(max = 50))]
    pub device_type: Option<String>,
    /// Search by device id, type, or location
    #[validate(length(max = 100))]
    pub search: Option<String>,
    /// Override the session's active city
    pub city: Option<CityId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceListResponse {
    pub devices: Vec<&'static Device>,
    pub total: usize,
}

/// GET /api/v1/devices
///
/// Filter projection over the sample population. Query parameters
/// override the session state; absent parameters fall back to it.
pub async fn list_devices(
    State(state): State<AppState>,
    Query(query): Query<DeviceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    query.validate()?;

    let session = state.store.state();
    let city = query.city.unwrap_or(session.selected_city);

    let mut filters = session.filters.clone();
    if let Some(device_type) = &query.device_type {
        filters.insert(DEVICE_TYPE_FILTER.to_string(), device_type.clone());
    }
    let search = query.search.as_deref().unwrap_or(&session.search_term);

    let devices = filter::filtered_devices(city, &filters, search);
    let total = devices.len();

    info!(city = %city, shown = total, "Projected device list");

    Ok((StatusCode::OK, Json(DeviceListResponse { devices, total })))
}

/// Analysis request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default = "default_analysis_type")]
    pub analysis_type: String,
}

fn default_analysis_type() -> String {
    "analysis".to_string()
}

/// POST /api/v1/devices/:device_id/analysis
///
/// Runs one analysis pass to completion. Ids outside the sample
/// population (including bulk pseudo-ids) are served through the
/// fallback profile. A pass superseded by a newer request yields 409;
/// its report is discarded, never returned.
pub async fn analyze_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(request): Json<AnalysisRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(notification) = Notification::build(
        &format!("Opening {} for {}...", request.analysis_type, device_id),
        NotificationKind::Info,
        None,
    ) {
        state.store.dispatch(Action::AddNotification(notification));
    }

    let handle = state.store.request_analysis(&device_id, &request.analysis_type);
    match handle.report().await {
        Some(report) => Ok((StatusCode::OK, Json(report))),
        None => Err(ApiError::Conflict(
            "Analysis superseded by a newer request".to_string(),
        )),
    }
}
