//! Dashboard state and its transition messages.
//!
//! `DashboardState` is owned by the store; every mutation is described by
//! an [`Action`] and applied by [`reduce`]. The reducer changes exactly
//! the fields a message addresses and carries everything else over.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use catalog::CityId;

use crate::notification::{push_notification, remove_notification, Notification};
use crate::telemetry::RealtimeMetrics;

/// Reporting window selected in the dashboard header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1h")]
    LastHour,
    #[default]
    #[serde(rename = "24h")]
    Last24Hours,
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LastHour => "1h",
            Self::Last24Hours => "24h",
            Self::Last7Days => "7d",
            Self::Last30Days => "30d",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dashboard tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Overview,
    Devices,
    Analytics,
}

/// Device table layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// The single source of truth for one dashboard session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub selected_city: CityId,
    pub selected_timeframe: Timeframe,
    pub active_tab: Tab,
    pub is_connected: bool,
    pub loading: bool,
    pub view_mode: ViewMode,
    pub filters: HashMap<String, String>,
    pub notifications: Vec<Notification>,
    pub filters_open: bool,
    pub search_term: String,
    pub sound_enabled: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            selected_city: CityId::default(),
            selected_timeframe: Timeframe::default(),
            active_tab: Tab::default(),
            is_connected: true,
            loading: false,
            view_mode: ViewMode::default(),
            filters: HashMap::new(),
            notifications: Vec::new(),
            filters_open: false,
            search_term: String::new(),
            sound_enabled: true,
        }
    }
}

/// A named, immutable instruction describing one state change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Action {
    SetLoading(bool),
    SetCity(CityId),
    SetTimeframe(Timeframe),
    SetTab(Tab),
    SetConnection(bool),
    /// Publishes a snapshot into the telemetry channel; the reducer itself
    /// leaves `DashboardState` untouched (the snapshot is composed into
    /// the read view, not stored here).
    SetRealtimeSnapshot(RealtimeMetrics),
    /// Shallow-merges the given entries into the filter map.
    UpdateFilters(HashMap<String, String>),
    SetViewMode(ViewMode),
    AddNotification(Notification),
    RemoveNotification(Uuid),
    ToggleFilters,
    SetSearchTerm(String),
    ToggleSound,
}

impl Action {
    /// Parse a wire-format transition message.
    ///
    /// Unknown tags and malformed payloads yield `None`; the store treats
    /// that as a silent no-op rather than an error.
    pub fn from_message(message: &Value) -> Option<Self> {
        serde_json::from_value(message.clone()).ok()
    }
}

/// Apply one transition message, producing the next state.
pub fn reduce(mut state: DashboardState, action: &Action) -> DashboardState {
    match action {
        Action::SetLoading(loading) => state.loading = *loading,
        Action::SetCity(city) => state.selected_city = *city,
        Action::SetTimeframe(timeframe) => state.selected_timeframe = *timeframe,
        Action::SetTab(tab) => state.active_tab = *tab,
        Action::SetConnection(connected) => state.is_connected = *connected,
        Action::SetRealtimeSnapshot(_) => {}
        Action::UpdateFilters(entries) => {
            for (key, value) in entries {
                state.filters.insert(key.clone(), value.clone());
            }
        }
        Action::SetViewMode(mode) => state.view_mode = *mode,
        Action::AddNotification(notification) => {
            push_notification(&mut state.notifications, notification.clone());
        }
        Action::RemoveNotification(id) => {
            remove_notification(&mut state.notifications, *id);
        }
        Action::ToggleFilters => state.filters_open = !state.filters_open,
        Action::SetSearchTerm(term) => state.search_term = term.clone(),
        Action::ToggleSound => state.sound_enabled = !state.sound_enabled,
    }
    state
}
