mod config;
mod errors;
mod handlers;
mod middleware;
mod observability;
mod proxy;
mod routes;

use config::Config;
use routes::AppState;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gate_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting API Gateway");

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        upstream = %config.upstream_url,
        bypass_prefixes = ?config.bypass_prefixes,
        token_header = %config.token_header,
        "Configuration loaded successfully"
    );

    // Initialize metrics recorder
    let metrics_handle = observability::metrics::init_metrics_recorder().map_err(|e| {
        error!("Failed to initialize metrics recorder: {}", e);
        e
    })?;

    // Shared upstream client
    let client = reqwest::Client::builder().build().map_err(|e| {
        error!("Failed to build upstream client: {}", e);
        e
    })?;

    let bind_address = config.bind_address.clone();

    // Create application state
    let state = Arc::new(AppState { config, client });

    // Build application routes
    let app = routes::build_routes(state, metrics_handle);

    info!("API Gateway listening on {}", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
