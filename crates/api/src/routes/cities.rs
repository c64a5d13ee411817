//! City registry routes.

use axum::Json;
use serde::Serialize;

use catalog::{inventory, CityId, CityInfo, CityInventory};

/// One registry entry: operator metadata plus the static inventory.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityEntry {
    pub id: CityId,
    #[serde(flatten)]
    pub info: &'static CityInfo,
    pub inventory: &'static CityInventory,
}

/// GET /api/v1/cities
///
/// The configured cities with their operator metadata and static
/// device-inventory totals. Read-only reference data.
pub async fn list_cities() -> Json<Vec<CityEntry>> {
    let entries = CityId::ALL
        .iter()
        .map(|&id| CityEntry {
            id,
            info: id.info(),
            inventory: inventory::inventory(id),
        })
        .collect();
    Json(entries)
}
