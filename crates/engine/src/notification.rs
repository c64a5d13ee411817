//! Bounded, dismissible notification queue.
//!
//! Notifications are created by whatever operation wants to inform the
//! user and live inside `DashboardState`; this module owns their shape
//! and the queue discipline (newest first, capacity 5, removal by id).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog::tuning::NOTIFICATION_CAP;

/// Longest message the queue accepts.
const MAX_MESSAGE_LEN: usize = 500;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional follow-up offered alongside a notification.
///
/// `op` names an operation the presentation layer maps back onto a
/// dispatch or query; the queue itself never executes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationAction {
    pub label: String,
    pub op: String,
}

/// A short-lived, user-dismissible message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<NotificationAction>,
}

impl Notification {
    /// Build a notification, defensively.
    ///
    /// Returns `None` when the input cannot form a displayable
    /// notification (blank or oversized message, blank action label).
    /// Callers treat `None` as "nothing emitted", never as a failure.
    pub fn build(
        message: &str,
        kind: NotificationKind,
        action: Option<NotificationAction>,
    ) -> Option<Self> {
        let message = message.trim();
        if message.is_empty() || message.len() > MAX_MESSAGE_LEN {
            tracing::warn!(
                kind = %kind,
                len = message.len(),
                "Discarding malformed notification"
            );
            return None;
        }
        if let Some(action) = &action {
            if action.label.trim().is_empty() {
                tracing::warn!(kind = %kind, "Discarding notification with blank action label");
                return None;
            }
        }
        Some(Self {
            id: Uuid::new_v4(),
            message: message.to_string(),
            kind,
            action,
        })
    }
}

/// Prepend a notification, evicting the oldest entries past the capacity.
pub fn push_notification(queue: &mut Vec<Notification>, notification: Notification) {
    queue.insert(0, notification);
    queue.truncate(NOTIFICATION_CAP);
}

/// Remove a notification by id. Removing an absent id is a no-op.
pub fn remove_notification(queue: &mut Vec<Notification>, id: Uuid) {
    queue.retain(|n| n.id != id);
}
