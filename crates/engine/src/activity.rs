//! Synthetic fleet activity feed.
//!
//! Human-readable events synthesized independently of telemetry: a canned
//! message, a severity, and a synthetic device code per tick.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use catalog::messages::{ACTIVITY_MESSAGES, DEVICE_PREFIXES};
use catalog::tuning::ACTIVITY_CAP;

/// Severity of an activity event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivitySeverity {
    Success,
    Info,
    Warning,
}

impl ActivitySeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

impl std::fmt::Display for ActivitySeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in the live activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    /// Time-derived id, unique within the feed.
    pub id: i64,
    pub message: String,
    /// Wall-clock display time.
    pub time: String,
    #[serde(rename = "type")]
    pub severity: ActivitySeverity,
    /// Synthetic device attribution, e.g. `RDR-042`.
    pub device: String,
}

impl ActivityEvent {
    /// Synthesize one event: a uniformly chosen canned message, severity,
    /// and device code.
    pub fn synthesize<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> Self {
        let message = ACTIVITY_MESSAGES[rng.gen_range(0..ACTIVITY_MESSAGES.len())].to_string();
        let severity = match rng.gen_range(0..3) {
            0 => ActivitySeverity::Success,
            1 => ActivitySeverity::Info,
            _ => ActivitySeverity::Warning,
        };
        let prefix = DEVICE_PREFIXES[rng.gen_range(0..DEVICE_PREFIXES.len())];
        let device = format!("{}-{:03}", prefix, rng.gen_range(1..=999));

        Self {
            id: now.timestamp_millis(),
            message,
            time: now.format("%H:%M:%S").to_string(),
            severity,
            device,
        }
    }
}

/// Prepend an event and evict the oldest entries beyond the cap.
///
/// Ids are time-derived; a same-millisecond collision is bumped past the
/// current head so ids stay unique within the feed.
pub fn push_event(feed: &mut Vec<ActivityEvent>, mut event: ActivityEvent) {
    if let Some(head) = feed.first() {
        if event.id <= head.id {
            event.id = head.id + 1;
        }
    }
    feed.insert(0, event);
    feed.truncate(ACTIVITY_CAP);
}
