//! Ontology API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use relay_core::domain::catalog::{Entity, Ontology};

use crate::api::CatalogState;
use crate::api::error::{ApiError, ApiResult};

/// GET /api/v1/ontology
pub async fn get_ontology(State(store): State<CatalogState>) -> Json<Ontology> {
    Json(store.ontology().await)
}

/// GET /api/v1/ontology/entities/{entity_id}
pub async fn get_entity(
    State(store): State<CatalogState>,
    Path(entity_id): Path<String>,
) -> ApiResult<Json<Entity>> {
    store
        .get_entity(&entity_id)
        .await
        .map(Json)
        .ok_or(ApiError::EntityNotFound(entity_id))
}
