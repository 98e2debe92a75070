//! Catalog API endpoints

use relay_core::domain::catalog::{Entity, Method, Ontology};
use relay_core::dto::catalog::MethodList;

use crate::RelayClient;
use crate::error::Result;

impl RelayClient {
    // =============================================================================
    // Method Registry
    // =============================================================================

    /// List methods, optionally only those of one type
    pub async fn list_methods(&self, method_type: Option<&str>) -> Result<MethodList> {
        let url = self.catalog_endpoint(&["api", "v1", "methods"])?;
        let mut request = self.client.get(url);
        if let Some(method_type) = method_type {
            request = request.query(&[("type", method_type)]);
        }
        let response = request.send().await?;

        self.handle_response(response).await
    }

    /// Get a method by ID
    pub async fn get_method(&self, method_id: &str) -> Result<Method> {
        let url = self.catalog_endpoint(&["api", "v1", "methods", method_id])?;
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Ontology
    // =============================================================================

    /// Get the whole ontology
    pub async fn get_ontology(&self) -> Result<Ontology> {
        let url = self.catalog_endpoint(&["api", "v1", "ontology"])?;
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }

    /// Get an ontology entity by ID
    pub async fn get_entity(&self, entity_id: &str) -> Result<Entity> {
        let url = self.catalog_endpoint(&["api", "v1", "ontology", "entities", entity_id])?;
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }
}
