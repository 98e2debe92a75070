//! API Module
//!
//! HTTP API layer for the ingest service.
//! Each submodule handles endpoints for a specific domain.

pub mod error;
pub mod health;
pub mod pipeline;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use relay_bus::EventBus;
use relay_engine::WorkflowEngine;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::service::submission_service::SubmissionSettings;

/// Shared handles injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub bus: Arc<dyn EventBus>,
    pub engine: Arc<dyn WorkflowEngine>,
    pub settings: Arc<SubmissionSettings>,
}

impl AppState {
    pub fn new(
        bus: Arc<dyn EventBus>,
        engine: Arc<dyn WorkflowEngine>,
        settings: SubmissionSettings,
    ) -> Self {
        Self {
            bus,
            engine,
            settings: Arc::new(settings),
        }
    }
}

/// Create the main API router with all endpoints
///
/// Bodies larger than `max_body_bytes` are rejected with 413 before any
/// handler runs.
pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Pipeline endpoints
        .route("/api/v1/pipelines", post(pipeline::submit_pipeline))
        .route(
            "/api/v1/pipelines/{pipeline_id}",
            get(pipeline::get_pipeline_status),
        )
        // Add state and middleware
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
}
