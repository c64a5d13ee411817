//! Periodic simulation tasks.
//!
//! Both generators follow the same shape: an interval-driven task that
//! owns its output channel and shuts down through a watch signal. Scope
//! changes (city switch, connectivity toggle) stop the running task and
//! start a fresh one, so exactly one timer per concern is ever live.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use catalog::tuning::{ACTIVITY_TICK, TELEMETRY_TICK};

use crate::activity::{push_event, ActivityEvent};
use crate::telemetry::RealtimeMetrics;

/// A periodic simulation source.
#[async_trait::async_trait]
pub trait Simulator: Send {
    /// Name used for logging and metrics.
    fn name(&self) -> &'static str;

    /// Interval between ticks.
    fn period(&self) -> Duration;

    /// Produce and publish one tick.
    async fn tick(&mut self);
}

/// Handle to a running simulation task.
pub struct SimulatorHandle {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl SimulatorHandle {
    /// Stop the task. The abort guarantees no tick lands after the caller
    /// moves on to reseed or restart.
    pub fn stop(self) {
        let _ = self.shutdown.send(true);
        self.handle.abort();
    }
}

/// Run a simulator on its period until stopped.
pub fn spawn<S: Simulator + 'static>(mut sim: S) -> SimulatorHandle {
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        let name = sim.name();
        let mut interval = tokio::time::interval(sim.period());

        // Skip the first immediate tick
        interval.tick().await;

        info!(simulator = name, period = ?sim.period(), "Simulator started");

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    sim.tick().await;
                    metrics::counter!("simulator_ticks_total", "simulator" => name).increment(1);
                }
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!(simulator = name, "Simulator stopped");
                        break;
                    }
                }
            }
        }
    });

    SimulatorHandle {
        shutdown: shutdown_tx,
        handle,
    }
}

/// Walks the realtime snapshot for the active city.
///
/// The snapshot itself lives in the watch channel; seeding and reseeding
/// are the store's responsibility, so a restarted simulator resumes from
/// whatever value is current.
pub struct TelemetrySimulator {
    tx: Arc<watch::Sender<RealtimeMetrics>>,
    rng: StdRng,
}

impl TelemetrySimulator {
    pub fn new(tx: Arc<watch::Sender<RealtimeMetrics>>, rng: StdRng) -> Self {
        Self { tx, rng }
    }
}

#[async_trait::async_trait]
impl Simulator for TelemetrySimulator {
    fn name(&self) -> &'static str {
        "telemetry"
    }

    fn period(&self) -> Duration {
        TELEMETRY_TICK
    }

    async fn tick(&mut self) {
        let current = self.tx.borrow().clone();
        let next = current.step(&mut self.rng);
        self.tx.send_replace(next);
    }
}

/// Appends synthetic events to the bounded activity feed.
pub struct ActivityGenerator {
    tx: Arc<watch::Sender<Vec<ActivityEvent>>>,
    rng: StdRng,
}

impl ActivityGenerator {
    pub fn new(tx: Arc<watch::Sender<Vec<ActivityEvent>>>, rng: StdRng) -> Self {
        Self { tx, rng }
    }
}

#[async_trait::async_trait]
impl Simulator for ActivityGenerator {
    fn name(&self) -> &'static str {
        "activity"
    }

    fn period(&self) -> Duration {
        ACTIVITY_TICK
    }

    async fn tick(&mut self) {
        let event = ActivityEvent::synthesize(&mut self.rng, chrono::Utc::now());
        let mut feed = self.tx.borrow().clone();
        push_event(&mut feed, event);
        metrics::gauge!("activity_feed_len").set(feed.len() as f64);
        self.tx.send_replace(feed);
    }
}
