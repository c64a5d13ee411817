//! Shared helpers for API integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::Router;
use engine::{Store, Supervisor};
use transit_ops_api::app::create_app;
use transit_ops_api::config::Config;

pub fn test_config() -> Config {
    Config::load_for_test(&[]).expect("Failed to build test config")
}

/// Build an app backed by a deterministic store.
///
/// Must be called from within a Tokio runtime (the store spawns its
/// simulators immediately).
pub fn create_test_app(seed: u64) -> (Router, Arc<Store>, Arc<Supervisor>) {
    let store = Store::start_seeded(Some(seed));
    let supervisor = Arc::new(Supervisor::new());
    let app = create_app(test_config(), Arc::clone(&store), Arc::clone(&supervisor));
    (app, store, supervisor)
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not valid JSON")
}
