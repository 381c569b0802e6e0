mod candidaturas;
mod config;
mod db;
mod empleados;
mod errors;
mod extract;
mod listing;
mod models;
mod prediction;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::prediction::classifier::load_classifier;
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing database variables)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting empleados API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize MySQL
    let db = create_pool(&config).await?;

    // Load the admission classifier
    let classifier = load_classifier(&config.model_path)?;

    let state = AppState { db, classifier };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_allowed_origins)?);
    info!(
        "CORS origins: {}",
        if config.cors_allowed_origins.is_empty() {
            "any".to_string()
        } else {
            config.cors_allowed_origins.join(", ")
        }
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
