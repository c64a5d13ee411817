//! Failure supervisor for derivation passes.
//!
//! Catches a panic from a guarded pass exactly once, records it, and
//! degrades the surface until a recovery action runs. Holds no domain
//! state beyond the captured failure.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::store::Store;

/// Captured failure shown on the degraded view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureReport {
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct Supervisor {
    failure: RwLock<Option<FailureReport>>,
}

impl Supervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a derivation pass under the supervisor.
    ///
    /// While degraded, the pass does not execute at all. A panic is
    /// caught, recorded, and turned into `None`.
    pub fn guard<T>(&self, label: &str, pass: impl FnOnce() -> T) -> Option<T> {
        if self.is_degraded() {
            return None;
        }
        match catch_unwind(AssertUnwindSafe(pass)) {
            Ok(value) => Some(value),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(pass = label, error = %message, "Derivation pass failed; degrading");
                *self.failure.write().expect("supervisor lock poisoned") = Some(FailureReport {
                    message,
                    occurred_at: Utc::now(),
                });
                None
            }
        }
    }

    /// The captured failure, if degraded.
    pub fn failure(&self) -> Option<FailureReport> {
        self.failure
            .read()
            .expect("supervisor lock poisoned")
            .clone()
    }

    pub fn is_degraded(&self) -> bool {
        self.failure
            .read()
            .expect("supervisor lock poisoned")
            .is_some()
    }

    /// Soft recovery: clear the failure flag, keep all domain state.
    pub fn retry(&self) {
        *self.failure.write().expect("supervisor lock poisoned") = None;
        info!("Supervisor retry; failure flag cleared");
    }

    /// Full recovery: re-initialize the store from scratch, then clear
    /// the failure flag.
    pub fn reset(&self, store: &Store) {
        store.reset();
        *self.failure.write().expect("supervisor lock poisoned") = None;
        info!("Supervisor reset; store re-initialized");
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
