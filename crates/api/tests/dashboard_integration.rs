//! Integration tests for the dashboard API surface.
//!
//! The engine is fully in-process, so these tests drive the router
//! directly with `tower::ServiceExt::oneshot` against a seeded store.

mod common;

use axum::http::StatusCode;
use common::{create_test_app, get_request, post_json, response_json};
use serde_json::json;
use tower::ServiceExt;

// ============================================================================
// Read view
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_get_dashboard_composes_state_and_telemetry() {
    let (app, store, _) = create_test_app(1);

    let response = app.oneshot(get_request("/api/v1/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["selectedCity"], "boston");
    assert_eq!(body["selectedTimeframe"], "24h");
    assert_eq!(body["isConnected"], true);
    assert_eq!(body["realtime"]["totalDevices"], 1247);
    assert!(body["activities"].as_array().unwrap().is_empty());
    assert!(body["generatedAt"].is_string());

    store.shutdown();
}

#[tokio::test(start_paused = true)]
async fn test_get_kpis() {
    let (app, store, _) = create_test_app(2);

    let response = app
        .oneshot(get_request("/api/v1/dashboard/kpis"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let kpis = body["kpis"].as_array().unwrap();
    assert_eq!(kpis.len(), 6);
    assert_eq!(kpis[0]["title"], "Total Devices");
    assert_eq!(kpis[0]["value"], "1,247");
    assert_eq!(kpis[1]["subtitle"], "94.1% uptime");

    store.shutdown();
}

// ============================================================================
// Dispatch
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_dispatch_city_switch_reseeds_telemetry() {
    let (app, store, _) = create_test_app(3);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/dispatch",
            json!({ "type": "set_city", "payload": "philadelphia" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get_request("/api/v1/dashboard")).await.unwrap();
    let body = response_json(response).await;
    assert_eq!(body["selectedCity"], "philadelphia");
    assert_eq!(body["realtime"]["totalDevices"], 892);
    assert_eq!(body["realtime"]["dailyTransactions"], 312450);

    store.shutdown();
}

#[tokio::test]
async fn test_dispatch_unknown_type_is_silent_noop() {
    let (app, store, _) = create_test_app(4);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/dispatch",
            json!({ "type": "set_theme", "payload": "dark" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let state = store.state();
    assert_eq!(state.selected_city, catalog::CityId::Boston);
    assert!(state.notifications.is_empty());

    store.shutdown();
}

#[tokio::test]
async fn test_dispatch_notification_lifecycle() {
    let (app, store, _) = create_test_app(5);

    for i in 0..7 {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/dispatch",
                json!({
                    "type": "add_notification",
                    "payload": {
                        "id": format!("00000000-0000-0000-0000-00000000000{}", i),
                        "message": format!("note {}", i),
                        "type": "info"
                    }
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let state = store.state();
    assert_eq!(state.notifications.len(), 5);
    assert_eq!(state.notifications[0].message, "note 6");

    // Dismiss one by id; dismissing it again is a no-op.
    let dismiss = json!({
        "type": "remove_notification",
        "payload": "00000000-0000-0000-0000-000000000006"
    });
    app.clone()
        .oneshot(post_json("/api/v1/dispatch", dismiss.clone()))
        .await
        .unwrap();
    assert_eq!(store.state().notifications.len(), 4);

    app.oneshot(post_json("/api/v1/dispatch", dismiss))
        .await
        .unwrap();
    assert_eq!(store.state().notifications.len(), 4);

    store.shutdown();
}

// ============================================================================
// Device queries
// ============================================================================

#[tokio::test]
async fn test_list_devices_type_filter() {
    let (app, store, _) = create_test_app(6);

    let response = app
        .oneshot(get_request("/api/v1/devices?device_type=reader"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["devices"][0]["device"], "RDR-156");
    assert_eq!(body["devices"][1]["device"], "RDR-234");

    store.shutdown();
}

#[tokio::test]
async fn test_list_devices_search() {
    let (app, store, _) = create_test_app(7);

    let response = app
        .oneshot(get_request("/api/v1/devices?search=airport"))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["devices"][0]["device"], "FVM-043");
    assert_eq!(body["devices"][1]["device"], "FVM-089");

    store.shutdown();
}

#[tokio::test]
async fn test_list_devices_city_override() {
    let (app, store, _) = create_test_app(8);

    let response = app
        .oneshot(get_request("/api/v1/devices?city=philadelphia"))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["total"], 4);
    assert_eq!(body["devices"][0]["device"], "FVM-201");

    store.shutdown();
}

#[tokio::test]
async fn test_list_devices_rejects_oversized_search() {
    let (app, store, _) = create_test_app(9);

    let uri = format!("/api/v1/devices?search={}", "x".repeat(101));
    let response = app.oneshot(get_request(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    store.shutdown();
}

// ============================================================================
// Analysis
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_analyze_known_device() {
    let (app, store, _) = create_test_app(10);

    let response = app
        .oneshot(post_json(
            "/api/v1/devices/FVM-001/analysis",
            json!({ "analysisType": "Deep Analysis" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["deviceId"], "FVM-001");
    assert_eq!(body["healthScore"], 65);
    assert_eq!(body["predictedFailure"], 3);
    assert_eq!(body["confidence"], 89);
    assert_eq!(body["analysisType"], "Deep Analysis");
    let metrics = &body["detailedMetrics"];
    assert!(metrics["vibrationLevel"].as_f64().unwrap() < 10.0);
    assert!(metrics["temperature"].as_f64().unwrap() >= 35.0);

    // The request also surfaced an "opening analysis" notification.
    assert_eq!(store.state().notifications.len(), 1);

    store.shutdown();
}

#[tokio::test(start_paused = true)]
async fn test_analyze_unknown_device_uses_fallback_profile() {
    let (app, store, _) = create_test_app(11);

    let response = app
        .oneshot(post_json(
            "/api/v1/devices/BULK-ANALYSIS/analysis",
            json!({ "analysisType": "Bulk Analysis of All Devices" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["healthScore"], 75);
    assert_eq!(body["predictedFailure"], 8);
    assert_eq!(body["confidence"], 85);

    store.shutdown();
}

// ============================================================================
// Cities, recovery, health
// ============================================================================

#[tokio::test]
async fn test_list_cities() {
    let (app, store, _) = create_test_app(12);

    let response = app.oneshot(get_request("/api/v1/cities")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], "boston");
    assert_eq!(entries[0]["operator"], "Massachusetts Bay Transportation Authority");
    assert_eq!(entries[1]["inventory"]["gates"]["total"], 387);

    store.shutdown();
}

#[tokio::test]
async fn test_recovery_flow() {
    let (app, store, supervisor) = create_test_app(13);

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/recovery"))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["degraded"], false);

    // Degrade through a guarded pass, then recover with a soft retry.
    let _: Option<()> = supervisor.guard("boom", || panic!("derivation exploded"));
    store.dispatch(engine::Action::SetSearchTerm("keep me".to_string()));

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/dashboard/kpis"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = app
        .clone()
        .oneshot(post_json("/api/v1/recovery", json!({ "action": "retry" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["degraded"], false);
    // Soft retry preserved the session state.
    assert_eq!(store.state().search_term, "keep me");

    // A full reset re-initializes the session.
    let _: Option<()> = supervisor.guard("boom", || panic!("again"));
    let response = app
        .oneshot(post_json("/api/v1/recovery", json!({ "action": "reset" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(store.state().search_term.is_empty());

    store.shutdown();
}

#[tokio::test]
async fn test_health_endpoints() {
    let (app, store, _) = create_test_app(14);

    let response = app.clone().oneshot(get_request("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["engine"]["connected"], true);
    assert_eq!(body["engine"]["degraded"], false);

    let response = app.oneshot(get_request("/api/health/live")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    store.shutdown();
}

#[tokio::test]
async fn test_refresh_emits_notification() {
    let (app, store, _) = create_test_app(15);

    let response = app
        .oneshot(post_json("/api/v1/dashboard/refresh", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["message"], "Dashboard refreshed successfully");
    assert_eq!(body["type"], "success");

    let state = store.state();
    assert_eq!(state.notifications.len(), 1);
    assert_eq!(state.notifications[0].message, "Dashboard refreshed successfully");

    store.shutdown();
}
