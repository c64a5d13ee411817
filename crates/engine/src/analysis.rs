//! On-demand device analysis task.
//!
//! Simulates a long-running diagnostic: a fixed delay, then a report
//! echoing the device's known profile plus freshly randomized detail
//! metrics. The task is cancelable; a superseded invocation discards its
//! pending report so a stale result can never surface.

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use catalog::population;
use catalog::tuning::ANALYSIS_DELAY;

/// Fallback profile for devices outside the sample population.
const DEFAULT_HEALTH: u8 = 75;
const DEFAULT_PREDICTED_FAILURE: u32 = 8;
const DEFAULT_CONFIDENCE: u8 = 85;

/// Detailed synthetic diagnostics, freshly randomized per report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedMetrics {
    pub vibration_level: f64,
    pub temperature: f64,
    pub power_consumption: f64,
    pub error_rate: f64,
    pub utilization_rate: f64,
    pub network_latency: f64,
}

impl DetailedMetrics {
    fn randomize<R: Rng>(rng: &mut R) -> Self {
        Self {
            vibration_level: rng.gen_range(0.0..10.0),
            temperature: rng.gen_range(35.0..50.0),
            power_consumption: rng.gen_range(85.0..115.0),
            error_rate: rng.gen_range(0.0..5.0),
            utilization_rate: rng.gen_range(60.0..100.0),
            network_latency: rng.gen_range(20.0..70.0),
        }
    }
}

/// Health report produced by one analysis pass. Transient; never stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub device_id: String,
    pub health_score: u8,
    pub predicted_failure: u32,
    pub confidence: u8,
    pub analysis_type: String,
    pub timestamp: String,
    pub detailed_metrics: DetailedMetrics,
}

impl AnalysisReport {
    /// Build a report, echoing the device's known profile or the fixed
    /// defaults when the device is not in the sample population.
    pub fn generate<R: Rng>(device_id: &str, analysis_type: &str, rng: &mut R) -> Self {
        let known = population::find_device(device_id);
        Self {
            device_id: device_id.to_string(),
            health_score: known.map_or(DEFAULT_HEALTH, |d| d.health),
            predicted_failure: known.map_or(DEFAULT_PREDICTED_FAILURE, |d| d.predicted_failure),
            confidence: known.map_or(DEFAULT_CONFIDENCE, |d| d.confidence),
            analysis_type: analysis_type.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            detailed_metrics: DetailedMetrics::randomize(rng),
        }
    }
}

/// Handle to a pending analysis pass.
pub struct AnalysisHandle {
    token: CancellationToken,
    task: JoinHandle<Option<AnalysisReport>>,
}

impl AnalysisHandle {
    /// Start an analysis pass with the standard simulated latency.
    pub fn spawn<R>(device_id: String, analysis_type: String, rng: R) -> Self
    where
        R: Rng + Send + 'static,
    {
        Self::spawn_with_token(device_id, analysis_type, rng, CancellationToken::new())
    }

    /// Start a pass tied to an externally owned cancellation token, so the
    /// store can supersede it from a later invocation.
    pub(crate) fn spawn_with_token<R>(
        device_id: String,
        analysis_type: String,
        mut rng: R,
        token: CancellationToken,
    ) -> Self
    where
        R: Rng + Send + 'static,
    {
        let task_token = token.clone();
        let task = tokio::spawn(async move {
            tokio::select! {
                _ = task_token.cancelled() => {
                    tracing::debug!(device = %device_id, "Analysis superseded before completion");
                    None
                }
                _ = tokio::time::sleep(ANALYSIS_DELAY) => {
                    tracing::info!(
                        device = %device_id,
                        analysis_type = %analysis_type,
                        "Analysis completed"
                    );
                    Some(AnalysisReport::generate(&device_id, &analysis_type, &mut rng))
                }
            }
        });

        Self { token, task }
    }

    /// Cancel the pending pass; its report is discarded.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Await the outcome. `None` means the pass was canceled or superseded.
    pub async fn report(self) -> Option<AnalysisReport> {
        self.task.await.unwrap_or(None)
    }
}
