//! RPKI Service - HTTP API for RPKI validation records
//!
//! This is the main entry point for the rpki service.

use std::path::Path;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rpki_service::{create_router, open_store, seed_from_file, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rpki=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RPKI Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        data_dir = %config.data_dir,
        store_backend = %config.store_backend,
        seed_file = ?config.seed_file,
        "Service configuration loaded"
    );

    let store = open_store(&config)?;

    if let Some(seed_file) = &config.seed_file {
        seed_from_file(store.as_ref(), Path::new(seed_file))?;
    }

    tracing::info!(records = store.count()?, "Record store ready");

    let state = AppState::new(store, config.clone());

    let app = create_router(state);

    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
