use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use engine::{Store, Supervisor};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware};
use crate::routes::{cities, dashboard, devices, dispatch, health, recovery};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub supervisor: Arc<Supervisor>,
}

pub fn create_app(config: Config, store: Arc<Store>, supervisor: Arc<Supervisor>) -> Router {
    let state = AppState { store, supervisor };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Dashboard surface, /api/v1 prefix for versioned API
    let api_routes = Router::new()
        .route("/api/v1/dashboard", get(dashboard::get_dashboard))
        .route("/api/v1/dashboard/kpis", get(dashboard::get_kpis))
        .route("/api/v1/dashboard/refresh", post(dashboard::refresh))
        .route("/api/v1/dispatch", post(dispatch::dispatch))
        .route("/api/v1/devices", get(devices::list_devices))
        .route(
            "/api/v1/devices/:device_id/analysis",
            post(devices::analyze_device),
        )
        .route("/api/v1/cities", get(cities::list_cities))
        .route(
            "/api/v1/recovery",
            get(recovery::recovery_status).post(recovery::recover),
        );

    // Operational routes
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(api_routes)
        .merge(public_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
