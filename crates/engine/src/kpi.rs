//! Derived KPI projection.
//!
//! Pure derivation from the current snapshot, recomputed per read. The
//! trend series is presentation jitter around the current value, not
//! historical data.

use rand::Rng;
use serde::Serialize;

use catalog::CityId;

use crate::telemetry::RealtimeMetrics;

/// Points in a synthetic trend series.
const TREND_POINTS: u32 = 12;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub time: u32,
    pub value: f64,
}

/// One KPI card for the dashboard header.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub title: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub trend: Vec<TrendPoint>,
}

/// Derive the six KPI cards from the current snapshot.
pub fn kpi_cards<R: Rng>(city: CityId, metrics: &RealtimeMetrics, rng: &mut R) -> Vec<Kpi> {
    let uptime = if metrics.total_devices == 0 {
        0.0
    } else {
        f64::from(metrics.operational_devices) / f64::from(metrics.total_devices) * 100.0
    };

    vec![
        Kpi {
            title: "Total Devices",
            value: format_count(u64::from(metrics.total_devices)),
            change: None,
            subtitle: Some(city.info().system.to_string()),
            trend: trend(f64::from(metrics.total_devices), rng),
        },
        Kpi {
            title: "Operational",
            value: format_count(u64::from(metrics.operational_devices)),
            change: Some(0.2),
            subtitle: Some(format!("{:.1}% uptime", uptime)),
            trend: trend(f64::from(metrics.operational_devices), rng),
        },
        Kpi {
            title: "Daily Transactions",
            value: format_count(metrics.daily_transactions),
            change: Some(2.3),
            subtitle: None,
            trend: trend(metrics.daily_transactions as f64, rng),
        },
        Kpi {
            title: "System Health",
            value: format!("{:.1}%", metrics.system_health),
            change: Some(0.5),
            subtitle: None,
            trend: trend(metrics.system_health, rng),
        },
        Kpi {
            title: "Active Users",
            value: format_count(u64::from(metrics.active_users)),
            change: Some(1.8),
            subtitle: None,
            trend: trend(f64::from(metrics.active_users), rng),
        },
        Kpi {
            title: "Avg Response",
            value: format!("{:.1}s", metrics.avg_response_time),
            change: Some(-5.2),
            subtitle: Some("Transaction time".to_string()),
            trend: trend(metrics.avg_response_time, rng),
        },
    ]
}

/// Synthetic trend: the base value with up to 20% jitter per point.
fn trend<R: Rng>(base: f64, rng: &mut R) -> Vec<TrendPoint> {
    (0..TREND_POINTS)
        .map(|i| TrendPoint {
            time: i,
            value: base + (rng.gen::<f64>() - 0.5) * base * 0.2,
        })
        .collect()
}

/// Group digits in threes, as the dashboard displays counts.
fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
