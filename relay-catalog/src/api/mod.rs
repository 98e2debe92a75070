//! API Module
//!
//! HTTP API layer for the catalog service.

pub mod error;
pub mod health;
pub mod methods;
pub mod ontology;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::store::CatalogStore;

/// Handle to the catalog shared by all handlers
pub type CatalogState = Arc<dyn CatalogStore>;

/// Create the main API router with all endpoints
pub fn create_router(store: CatalogState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Method registry
        .route("/api/v1/methods", get(methods::list_methods))
        .route("/api/v1/methods/{method_id}", get(methods::get_method))
        // Ontology
        .route("/api/v1/ontology", get(ontology::get_ontology))
        .route(
            "/api/v1/ontology/entities/{entity_id}",
            get(ontology::get_entity),
        )
        // Add state and middleware
        .with_state(store)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::store::FileCatalog;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use relay_core::domain::catalog::Catalog;
    use serde_json::Value;
    use tower::ServiceExt;

    pub fn sample_router() -> Router {
        let catalog: Catalog = serde_json::from_value(serde_json::json!({
            "methods": [
                {
                    "method_id": "twitter_crawler",
                    "name": "Twitter Crawler",
                    "type": "crawler",
                    "inputs": {"query": "string"},
                    "outputs": {"posts": "array"},
                    "tags": ["social"]
                },
                {"method_id": "sentiment", "name": "Sentiment", "type": "ml_model"},
                {"method_id": "dedupe", "name": "Dedupe", "type": "function"}
            ],
            "ontology": {
                "entities": [
                    {"entity_id": "post", "name": "Post", "schema": {"text": "string"}}
                ]
            }
        }))
        .unwrap();

        create_router(Arc::new(FileCatalog::new(catalog)))
    }

    pub async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
