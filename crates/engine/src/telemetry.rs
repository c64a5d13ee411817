//! Simulated realtime fleet telemetry.
//!
//! There is no upstream data source; the snapshot evolves from a fixed
//! per-city baseline through bounded random-walk steps.

use rand::Rng;
use serde::{Deserialize, Serialize};

use catalog::tuning::{self, WalkBounds};
use catalog::CityId;

/// Latest simulated telemetry snapshot for the active city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeMetrics {
    pub total_devices: u32,
    pub operational_devices: u32,
    pub daily_transactions: u64,
    pub system_health: f64,
    pub maintenance_alerts: u32,
    pub avg_response_time: f64,
    pub network_latency: f64,
    pub revenue: u64,
    pub active_users: u32,
}

impl RealtimeMetrics {
    /// Seed a fresh snapshot from the fixed baseline for a city.
    pub fn baseline(city: CityId) -> Self {
        let b = tuning::baseline(city);
        Self {
            total_devices: b.total_devices,
            operational_devices: b.operational_devices,
            daily_transactions: b.daily_transactions,
            system_health: b.system_health,
            maintenance_alerts: b.maintenance_alerts,
            avg_response_time: b.avg_response_time,
            network_latency: b.network_latency,
            revenue: b.revenue,
            active_users: b.active_users,
        }
    }

    /// Derive the next snapshot from this one.
    ///
    /// Transactions only ever grow. The operational count degrades by a
    /// random 0..15 devices, never dropping more than 30 below the total.
    /// The continuous metrics each take one clamped random-walk step.
    pub fn step<R: Rng>(&self, rng: &mut R) -> Self {
        let mut next = self.clone();
        next.daily_transactions += rng.gen_range(0..tuning::TRANSACTION_STEP_MAX);
        next.operational_devices = degraded_operational(self.total_devices, rng);
        next.system_health = bounded_walk(self.system_health, tuning::SYSTEM_HEALTH_WALK, rng);
        next.avg_response_time =
            bounded_walk(self.avg_response_time, tuning::RESPONSE_TIME_WALK, rng);
        next.network_latency =
            bounded_walk(self.network_latency, tuning::NETWORK_LATENCY_WALK, rng);
        next.active_users = walked_users(self.active_users, rng);
        next
    }
}

/// One clamped random-walk step: the value moves by up to half the span
/// in either direction and stays inside `[min, max]`.
pub fn bounded_walk<R: Rng>(prev: f64, bounds: WalkBounds, rng: &mut R) -> f64 {
    let delta = (rng.gen::<f64>() - 0.5) * bounds.span;
    (prev + delta).clamp(bounds.min, bounds.max)
}

fn degraded_operational<R: Rng>(total: u32, rng: &mut R) -> u32 {
    let degraded = total.saturating_sub(rng.gen_range(0..tuning::OPERATIONAL_JITTER_MAX));
    degraded.max(total.saturating_sub(tuning::OPERATIONAL_MAX_DEGRADATION))
}

fn walked_users<R: Rng>(prev: u32, rng: &mut R) -> u32 {
    let half = tuning::ACTIVE_USER_SWING / 2;
    let swing = rng.gen_range(-half..half);
    (i64::from(prev) + swing).max(0) as u32
}
