use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relay_bus::{EventBus, RedisBus};
use relay_dispatcher::startup::{Backoff, with_retry};
use relay_dispatcher::{
    Config, DispatchService, StandardDispatchService, SubmissionConsumer, health,
};
use relay_engine::{TemporalEngine, WorkflowEngine};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relay_dispatcher=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Relay Dispatcher");

    let config = Config::from_env();
    config.validate()?;
    info!(
        "Loaded configuration: task_queue={}, workflow_type={}, start_timeout={:?}",
        config.task_queue, config.workflow_type, config.start_timeout
    );

    let redis_url = config.redis_url.as_str();
    let bus: Arc<dyn EventBus> = Arc::new(
        with_retry("event bus", Backoff::default(), move || {
            RedisBus::connect(redis_url)
        })
        .await?,
    );
    info!("Event bus connected");

    let engine = TemporalEngine::new(config.temporal_url.clone(), config.namespace.clone());
    let engine_ref = &engine;
    with_retry("workflow engine", Backoff::default(), move || engine_ref.health_check()).await?;
    info!("Workflow engine reachable at {}", engine.base_url());

    let engine: Arc<dyn WorkflowEngine> = Arc::new(engine);
    let dispatcher: Arc<dyn DispatchService> = Arc::new(StandardDispatchService::new(
        engine,
        bus.clone(),
        config.dispatch_settings(),
    ));
    let consumer = Arc::new(SubmissionConsumer::new(bus, dispatcher));

    let listener = tokio::net::TcpListener::bind(&config.health_addr)
        .await
        .with_context(|| format!("Failed to bind health server to {}", config.health_addr))?;
    info!("Health server listening on {}", config.health_addr);

    let health_app = health::create_router(consumer.clone());
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_app).await {
            error!("Health server error: {}", e);
        }
    });

    // Start consume loop
    if let Err(e) = consumer.run().await {
        error!("Consumer error: {:#}", e);
        return Err(e);
    }

    Ok(())
}
