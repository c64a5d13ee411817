use std::sync::Arc;

use anyhow::Result;
use tracing::info;

mod app;
mod config;
mod error;
mod middleware;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging
    middleware::logging::init_logging(&config.logging);

    info!("Starting Transit Ops API v{}", env!("CARGO_PKG_VERSION"));

    // Install the Prometheus recorder before any simulator ticks
    middleware::metrics::init_metrics();

    // Start the state store and its simulators
    let store = engine::Store::start_seeded(config.simulation.seed);
    let supervisor = Arc::new(engine::Supervisor::new());

    // Build application
    let app = app::create_app(config.clone(), Arc::clone(&store), supervisor);

    // Start server
    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
