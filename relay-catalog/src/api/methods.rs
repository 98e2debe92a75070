//! Method Registry API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use relay_core::domain::catalog::Method;
use relay_core::dto::catalog::MethodList;
use serde::Deserialize;

use crate::api::CatalogState;
use crate::api::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct MethodQuery {
    #[serde(rename = "type")]
    pub method_type: Option<String>,
}

/// GET /api/v1/methods[?type=...]
/// List methods, optionally of one type
pub async fn list_methods(
    State(store): State<CatalogState>,
    Query(query): Query<MethodQuery>,
) -> Json<MethodList> {
    let filter = query.method_type.filter(|t| !t.is_empty());
    tracing::debug!("Listing methods (filter: {:?})", filter);

    let methods = store.list_methods(filter.as_deref()).await;
    Json(MethodList::new(methods, filter))
}

/// GET /api/v1/methods/{method_id}
/// Get a method by ID
pub async fn get_method(
    State(store): State<CatalogState>,
    Path(method_id): Path<String>,
) -> ApiResult<Json<Method>> {
    store
        .get_method(&method_id)
        .await
        .map(Json)
        .ok_or(ApiError::MethodNotFound(method_id))
}
