//! Tunable simulation constants and per-city metric baselines.

use std::time::Duration;

use crate::cities::CityId;

/// Telemetry simulator tick period.
pub const TELEMETRY_TICK: Duration = Duration::from_secs(3);

/// Activity generator tick period.
pub const ACTIVITY_TICK: Duration = Duration::from_secs(5);

/// Simulated latency of one device analysis pass.
pub const ANALYSIS_DELAY: Duration = Duration::from_millis(1500);

/// Maximum retained notifications.
pub const NOTIFICATION_CAP: usize = 5;

/// Maximum retained activity events.
pub const ACTIVITY_CAP: usize = 21;

/// Largest per-tick increment of the daily transaction counter.
pub const TRANSACTION_STEP_MAX: u64 = 100;

/// Per-tick random degradation of the operational-device count (exclusive).
pub const OPERATIONAL_JITTER_MAX: u32 = 15;

/// Operational devices never drop more than this below the total.
pub const OPERATIONAL_MAX_DEGRADATION: u32 = 30;

/// Active users move by at most half of this per tick, in either direction.
pub const ACTIVE_USER_SWING: i64 = 1000;

/// Bounds for one random-walk metric.
#[derive(Debug, Clone, Copy)]
pub struct WalkBounds {
    /// Full step span; one step moves by at most half of it.
    pub span: f64,
    pub min: f64,
    pub max: f64,
}

pub const SYSTEM_HEALTH_WALK: WalkBounds = WalkBounds {
    span: 1.0,
    min: 85.0,
    max: 99.0,
};

pub const RESPONSE_TIME_WALK: WalkBounds = WalkBounds {
    span: 0.2,
    min: 0.8,
    max: 3.0,
};

pub const NETWORK_LATENCY_WALK: WalkBounds = WalkBounds {
    span: 5.0,
    min: 20.0,
    max: 100.0,
};

/// Fixed starting metric values for a city.
#[derive(Debug, Clone, Copy)]
pub struct MetricsBaseline {
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

/// Baseline snapshot assigned when a city is first selected.
pub fn baseline(city: CityId) -> MetricsBaseline {
    match city {
        CityId::Boston => MetricsBaseline {
            total_devices: 1247,
            operational_devices: 1174,
            daily_transactions: 485_320,
            system_health: 94.2,
            maintenance_alerts: 12,
            avg_response_time: 1.2,
            network_latency: 45.0,
            revenue: 1_256_000,
            active_users: 78_500,
        },
        CityId::Philadelphia => MetricsBaseline {
            total_devices: 892,
            operational_devices: 845,
            daily_transactions: 312_450,
            system_health: 92.8,
            maintenance_alerts: 8,
            avg_response_time: 1.4,
            network_latency: 52.0,
            revenue: 847_000,
            active_users: 52_300,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_periods() {
        assert_eq!(TELEMETRY_TICK.as_secs(), 3);
        assert_eq!(ACTIVITY_TICK.as_secs(), 5);
        assert_eq!(ANALYSIS_DELAY.as_millis(), 1500);
    }

    #[test]
    fn test_baselines_within_walk_bounds() {
        for city in CityId::ALL {
            let b = baseline(city);
            assert!(b.operational_devices <= b.total_devices);
            assert!(b.system_health >= SYSTEM_HEALTH_WALK.min);
            assert!(b.system_health <= SYSTEM_HEALTH_WALK.max);
            assert!(b.avg_response_time >= RESPONSE_TIME_WALK.min);
            assert!(b.avg_response_time <= RESPONSE_TIME_WALK.max);
            assert!(b.network_latency >= NETWORK_LATENCY_WALK.min);
            assert!(b.network_latency <= NETWORK_LATENCY_WALK.max);
        }
    }

    #[test]
    fn test_baselines_differ_per_city() {
        let boston = baseline(CityId::Boston);
        let philadelphia = baseline(CityId::Philadelphia);
        assert_ne!(boston.total_devices, philadelphia.total_devices);
        assert_ne!(boston.revenue, philadelphia.revenue);
    }
}
