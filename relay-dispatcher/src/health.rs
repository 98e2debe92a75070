//! Health server
//!
//! Exposes liveness of the dispatcher and its consume-loop counters.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::scheduler::{ConsumerStats, SubmissionConsumer};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub subscribed: bool,
    pub bus_connected: bool,
    pub stats: ConsumerStats,
}

/// Create the health router
pub fn create_router(consumer: Arc<SubmissionConsumer>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(consumer)
        .layer(TraceLayer::new_for_http())
}

/// GET /health
///
/// Answers 503 once the consume loop has terminated.
pub async fn health_check(
    State(consumer): State<Arc<SubmissionConsumer>>,
) -> (StatusCode, Json<HealthResponse>) {
    let subscribed = consumer.is_subscribed();
    let (code, status) = if consumer.is_terminated() {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    } else if subscribed {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::OK, "starting")
    };

    let response = HealthResponse {
        status,
        service: "relay-dispatcher",
        subscribed,
        bus_connected: consumer.bus().health_check().await,
        stats: consumer.stats(),
    };
    (code, Json(response))
}
