//! The dashboard state store.
//!
//! Single owner of `DashboardState`: every mutation flows through
//! [`Store::dispatch`]. The telemetry and activity tasks publish into
//! watch channels owned here and are restarted on scope changes, so at
//! most one timer per concern is ever live.

use std::sync::{Arc, Mutex, RwLock};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use catalog::{CityId, Device};

use crate::activity::ActivityEvent;
use crate::analysis::AnalysisHandle;
use crate::filter;
use crate::sim::{self, ActivityGenerator, SimulatorHandle, TelemetrySimulator};
use crate::state::{reduce, Action, DashboardState};
use crate::telemetry::RealtimeMetrics;

/// Composed read view handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    #[serde(flatten)]
    pub state: DashboardState,
    pub realtime: RealtimeMetrics,
    pub activities: Vec<ActivityEvent>,
}

pub struct Store {
    state: RwLock<DashboardState>,
    metrics_tx: Arc<watch::Sender<RealtimeMetrics>>,
    feed_tx: Arc<watch::Sender<Vec<ActivityEvent>>>,
    telemetry: Mutex<Option<SimulatorHandle>>,
    activity: Mutex<Option<SimulatorHandle>>,
    /// Token of the analysis pass currently allowed to complete.
    analysis: Mutex<CancellationToken>,
    seed: Option<u64>,
    rng_streams: Mutex<u64>,
}

impl Store {
    /// Create the store and start the simulators for the initial state.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start() -> Arc<Self> {
        Self::start_seeded(None)
    }

    /// Deterministic variant: every task derives its PRNG stream from the
    /// given seed. Used by tests; production wiring passes `None` and
    /// draws from entropy.
    pub fn start_seeded(seed: Option<u64>) -> Arc<Self> {
        let state = DashboardState::default();
        let (metrics_tx, _) = watch::channel(RealtimeMetrics::baseline(state.selected_city));
        let (feed_tx, _) = watch::channel(Vec::new());

        let store = Arc::new(Self {
            state: RwLock::new(state),
            metrics_tx: Arc::new(metrics_tx),
            feed_tx: Arc::new(feed_tx),
            telemetry: Mutex::new(None),
            activity: Mutex::new(None),
            analysis: Mutex::new(CancellationToken::new()),
            seed,
            rng_streams: Mutex::new(0),
        });
        store.start_simulators();
        store
    }

    /// Apply one transition message.
    ///
    /// Scope-changing messages (city switch, connectivity toggle) also
    /// restart or stop the simulation tasks. `SetRealtimeSnapshot` routes
    /// straight into the telemetry channel, which is the snapshot's
    /// single home; the reducer does not touch it.
    pub fn dispatch(&self, action: Action) {
        if let Action::SetRealtimeSnapshot(snapshot) = &action {
            self.metrics_tx.send_replace(snapshot.clone());
            return;
        }

        let (prev_city, prev_connected, city, connected) = {
            let mut state = self.state.write().expect("state lock poisoned");
            let prev_city = state.selected_city;
            let prev_connected = state.is_connected;
            *state = reduce(state.clone(), &action);
            (
                prev_city,
                prev_connected,
                state.selected_city,
                state.is_connected,
            )
        };
        debug!(?action, "Applied transition");

        if city != prev_city {
            self.reseed_city(city, connected);
        }
        if connected != prev_connected {
            if connected {
                info!("Connectivity restored; resuming simulators");
                self.start_simulators();
            } else {
                info!("Connectivity disabled; suspending simulators");
                self.stop_simulators();
            }
        }
    }

    /// Apply a wire-format message. Unknown tags and malformed payloads
    /// are a silent no-op.
    pub fn dispatch_message(&self, message: &Value) {
        match Action::from_message(message) {
            Some(action) => self.dispatch(action),
            None => debug!(%message, "Ignoring unrecognized transition message"),
        }
    }

    /// Composed read view: current state plus the latest simulator output.
    pub fn view(&self) -> DashboardView {
        DashboardView {
            state: self.state(),
            realtime: self.realtime(),
            activities: self.activities(),
        }
    }

    /// Current state only.
    pub fn state(&self) -> DashboardState {
        self.state.read().expect("state lock poisoned").clone()
    }

    /// Latest realtime snapshot.
    pub fn realtime(&self) -> RealtimeMetrics {
        self.metrics_tx.borrow().clone()
    }

    /// Current activity feed, newest first.
    pub fn activities(&self) -> Vec<ActivityEvent> {
        self.feed_tx.borrow().clone()
    }

    /// Watch the realtime snapshot channel.
    pub fn watch_realtime(&self) -> watch::Receiver<RealtimeMetrics> {
        self.metrics_tx.subscribe()
    }

    /// Project the visible device list for the current state.
    pub fn filtered_devices(&self) -> Vec<&'static Device> {
        let state = self.state.read().expect("state lock poisoned");
        filter::filtered_devices(state.selected_city, &state.filters, &state.search_term)
    }

    /// Start a device analysis pass, superseding any pass still pending.
    ///
    /// The superseded pass is canceled and its report discarded, so a
    /// stale result can never surface.
    pub fn request_analysis(&self, device_id: &str, analysis_type: &str) -> AnalysisHandle {
        let token = CancellationToken::new();
        {
            let mut slot = self.analysis.lock().expect("analysis lock poisoned");
            slot.cancel();
            *slot = token.clone();
        }
        info!(device = %device_id, analysis_type = %analysis_type, "Analysis requested");
        AnalysisHandle::spawn_with_token(
            device_id.to_string(),
            analysis_type.to_string(),
            self.next_rng(),
            token,
        )
    }

    /// Re-initialize everything from scratch: default state, baseline
    /// snapshot, empty feed, fresh simulators.
    pub fn reset(&self) {
        self.stop_simulators();
        self.analysis.lock().expect("analysis lock poisoned").cancel();

        let city = {
            let mut state = self.state.write().expect("state lock poisoned");
            *state = DashboardState::default();
            state.selected_city
        };
        self.metrics_tx.send_replace(RealtimeMetrics::baseline(city));
        self.feed_tx.send_replace(Vec::new());
        self.start_simulators();
        info!("Store reset to initial state");
    }

    /// Stop all background tasks. Called on server shutdown.
    pub fn shutdown(&self) {
        self.stop_simulators();
        self.analysis.lock().expect("analysis lock poisoned").cancel();
        info!("Store shut down");
    }

    fn start_simulators(&self) {
        let mut telemetry = self.telemetry.lock().expect("telemetry lock poisoned");
        if telemetry.is_none() {
            *telemetry = Some(sim::spawn(TelemetrySimulator::new(
                Arc::clone(&self.metrics_tx),
                self.next_rng(),
            )));
        }
        let mut activity = self.activity.lock().expect("activity lock poisoned");
        if activity.is_none() {
            *activity = Some(sim::spawn(ActivityGenerator::new(
                Arc::clone(&self.feed_tx),
                self.next_rng(),
            )));
        }
    }

    fn stop_simulators(&self) {
        if let Some(handle) = self.telemetry.lock().expect("telemetry lock poisoned").take() {
            handle.stop();
        }
        if let Some(handle) = self.activity.lock().expect("activity lock poisoned").take() {
            handle.stop();
        }
    }

    /// Replace the telemetry baseline for a newly selected city.
    ///
    /// The running walk is stopped before the swap so a queued tick cannot
    /// mix the old city's values into the fresh baseline; the feed keeps
    /// running, it is not city-scoped.
    fn reseed_city(&self, city: CityId, connected: bool) {
        if let Some(handle) = self.telemetry.lock().expect("telemetry lock poisoned").take() {
            handle.stop();
        }
        self.metrics_tx.send_replace(RealtimeMetrics::baseline(city));
        if connected {
            *self.telemetry.lock().expect("telemetry lock poisoned") =
                Some(sim::spawn(TelemetrySimulator::new(
                    Arc::clone(&self.metrics_tx),
                    self.next_rng(),
                )));
        }
        info!(city = %city, "Reseeded telemetry baseline");
    }

    fn next_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => {
                let mut stream = self.rng_streams.lock().expect("rng lock poisoned");
                *stream += 1;
                StdRng::seed_from_u64(seed.wrapping_add(*stream))
            }
            None => StdRng::from_entropy(),
        }
    }
}
