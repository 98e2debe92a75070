use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relay_bus::{EventBus, RedisBus};
use relay_engine::{TemporalEngine, WorkflowEngine};
use relay_ingest::{AppState, Config, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relay_ingest=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Relay Ingest...");

    let config = Config::from_env();
    config.validate()?;

    info!("Connecting to event bus at {}", config.redis_url);
    let bus: Arc<dyn EventBus> = Arc::new(
        RedisBus::connect(&config.redis_url)
            .await
            .context("Failed to connect to event bus")?,
    );

    let engine: Arc<dyn WorkflowEngine> = Arc::new(TemporalEngine::new(
        config.temporal_url.clone(),
        config.namespace.clone(),
    ));

    let state = AppState::new(bus, engine, config.submission_settings());
    let app = create_router(state, config.max_body_bytes);

    info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
