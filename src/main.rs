mod config;
mod error;
mod models;
mod routes;
mod services;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::{aggregator::ShowAggregator, upstream};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub aggregator: ShowAggregator,
    pub start_time: Instant,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talkshow_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = Config::from_env();
    let port = config.port;

    tracing::info!("Starting Talkshow Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.environment);

    match &config.upstream_url {
        Some(url) => tracing::info!("Upstream ({}): {}", config.upstream_kind, url),
        None => tracing::warn!(
            "{} is not set; /api/shows will fail until it is configured",
            config.upstream_kind.url_var()
        ),
    }

    // Initialize the show pipeline
    let source = upstream::from_config(&config)?;
    let aggregator = ShowAggregator::new(source, Duration::from_millis(config.cache_ttl_ms));
    tracing::info!("Show cache TTL: {}s", config.cache_ttl_ms / 1000);

    // Build application state
    let state = Arc::new(AppState {
        config,
        aggregator,
        start_time: Instant::now(),
    });

    let app = routes::router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
