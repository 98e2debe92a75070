//! Health Check API Handler

use axum::{Json, extract::State};
use serde::Serialize;

use crate::api::CatalogState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub methods: usize,
    pub entities: usize,
}

/// GET /health
pub async fn health_check(State(store): State<CatalogState>) -> Json<HealthResponse> {
    let (methods, entities) = store.counts().await;
    Json(HealthResponse {
        status: "healthy",
        service: "relay-catalog",
        methods,
        entities,
    })
}
