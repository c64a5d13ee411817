//! Integration tests for the store's timer-driven behavior.
//!
//! All tests run on a paused Tokio clock, so simulator ticks and the
//! analysis delay fire deterministically without real sleeping.

use std::time::Duration;

use catalog::CityId;
use engine::{Action, Store};

async fn ticks(n: u64, period_secs: u64) {
    tokio::time::sleep(Duration::from_secs(n * period_secs) + Duration::from_millis(100)).await;
}

#[tokio::test(start_paused = true)]
async fn telemetry_walks_while_connected() {
    let store = Store::start_seeded(Some(10));
    let baseline = store.realtime();

    ticks(1, 3).await;
    let after_one = store.realtime();
    assert_ne!(after_one, baseline);
    assert!(after_one.daily_transactions >= baseline.daily_transactions);
    assert_eq!(after_one.total_devices, baseline.total_devices);

    ticks(5, 3).await;
    let later = store.realtime();
    assert!(later.daily_transactions >= after_one.daily_transactions);
    assert!(later.operational_devices <= later.total_devices);
    assert!(later.operational_devices >= later.total_devices - 30);

    store.shutdown();
}

#[tokio::test(start_paused = true)]
async fn activity_feed_grows_and_stays_bounded() {
    let store = Store::start_seeded(Some(11));
    assert!(store.activities().is_empty());

    ticks(3, 5).await;
    let feed = store.activities();
    assert_eq!(feed.len(), 3);
    // Newest first.
    assert!(feed[0].id > feed[1].id);

    ticks(40, 5).await;
    assert_eq!(store.activities().len(), 21);

    store.shutdown();
}

#[tokio::test(start_paused = true)]
async fn disconnect_suspends_and_reconnect_resumes_from_last_value() {
    let store = Store::start_seeded(Some(12));

    ticks(2, 3).await;
    let before_disconnect = store.realtime();
    let feed_before = store.activities().len();

    store.dispatch(Action::SetConnection(false));
    ticks(10, 3).await;
    // No ticks while disconnected, for either simulator.
    assert_eq!(store.realtime(), before_disconnect);
    assert_eq!(store.activities().len(), feed_before);

    store.dispatch(Action::SetConnection(true));
    // Resumes the walk from the last value, not the city baseline.
    assert_eq!(store.realtime(), before_disconnect);

    ticks(1, 3).await;
    let resumed = store.realtime();
    assert_ne!(resumed, before_disconnect);
    assert!(resumed.daily_transactions >= before_disconnect.daily_transactions);

    store.shutdown();
}

#[tokio::test(start_paused = true)]
async fn city_switch_reseeds_to_fixed_baseline() {
    let store = Store::start_seeded(Some(13));

    ticks(3, 3).await;
    assert_ne!(store.realtime(), engine::telemetry::RealtimeMetrics::baseline(CityId::Boston));

    store.dispatch(Action::SetCity(CityId::Philadelphia));
    let reseeded = store.realtime();
    assert_eq!(reseeded.total_devices, 892);
    assert_eq!(reseeded.daily_transactions, 312_450);

    ticks(1, 3).await;
    let stepped = store.realtime();
    assert_eq!(stepped.total_devices, 892);
    assert!(stepped.daily_transactions >= 312_450);

    // Switching back reseeds again; nothing is merged or remembered.
    store.dispatch(Action::SetCity(CityId::Boston));
    assert_eq!(store.realtime().daily_transactions, 485_320);

    store.shutdown();
}

#[tokio::test(start_paused = true)]
async fn city_switch_while_disconnected_stays_suspended() {
    let store = Store::start_seeded(Some(14));
    store.dispatch(Action::SetConnection(false));

    store.dispatch(Action::SetCity(CityId::Philadelphia));
    let reseeded = store.realtime();
    assert_eq!(reseeded.total_devices, 892);

    ticks(5, 3).await;
    assert_eq!(store.realtime(), reseeded);

    store.dispatch(Action::SetConnection(true));
    ticks(1, 3).await;
    assert_ne!(store.realtime(), reseeded);

    store.shutdown();
}

#[tokio::test(start_paused = true)]
async fn superseded_analysis_never_surfaces() {
    let store = Store::start_seeded(Some(15));

    let first = store.request_analysis("FVM-001", "Deep Analysis");
    let second = store.request_analysis("RDR-156", "Deep Analysis");

    let (first_report, second_report) = tokio::join!(first.report(), second.report());
    assert!(first_report.is_none());

    let report = second_report.unwrap();
    assert_eq!(report.device_id, "RDR-156");
    assert_eq!(report.health_score, 71);

    store.shutdown();
}

#[tokio::test(start_paused = true)]
async fn analysis_recomputes_fresh_reports_per_invocation() {
    let store = Store::start_seeded(Some(16));

    let first = store.request_analysis("GTE-289", "analysis").report().await.unwrap();
    let second = store.request_analysis("GTE-289", "analysis").report().await.unwrap();

    assert_eq!(first.health_score, second.health_score);
    assert_ne!(
        first.detailed_metrics.vibration_level,
        second.detailed_metrics.vibration_level
    );

    store.shutdown();
}

#[tokio::test(start_paused = true)]
async fn reset_restores_baseline_and_clears_feed() {
    let store = Store::start_seeded(Some(17));

    ticks(4, 5).await;
    store.dispatch(Action::SetCity(CityId::Philadelphia));
    assert!(!store.activities().is_empty());

    store.reset();
    let view = store.view();
    assert_eq!(view.state.selected_city, CityId::Boston);
    assert_eq!(view.realtime.daily_transactions, 485_320);
    assert!(view.activities.is_empty());

    // Simulators are live again after the reset.
    ticks(1, 3).await;
    assert!(store.realtime().daily_transactions >= 485_320);

    store.shutdown();
}
