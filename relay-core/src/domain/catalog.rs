//! Catalog domain types
//!
//! Read-only metadata describing the methods a pipeline step may call and
//! the ontology entities they produce.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Complete catalog document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub methods: Vec<Method>,
    #[serde(default)]
    pub ontology: Ontology,
}

/// A crawler, ML model, or function that a pipeline step can invoke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub method_id: String,
    pub name: String,
    /// `crawler`, `ml_model` or `function`
    #[serde(rename = "type")]
    pub method_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub inputs: JsonValue,
    #[serde(default)]
    pub outputs: JsonValue,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The data ontology
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ontology {
    #[serde(default)]
    pub entities: Vec<Entity>,
}

/// A data entity in the ontology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub entity_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub schema: JsonValue,
}

impl Catalog {
    /// Finds a method by its identifier
    pub fn method(&self, method_id: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.method_id == method_id)
    }

    /// Lists methods, optionally restricted to one method type
    pub fn methods_of_type(&self, method_type: Option<&str>) -> Vec<Method> {
        self.methods
            .iter()
            .filter(|m| method_type.is_none_or(|t| m.method_type == t))
            .cloned()
            .collect()
    }

    /// Finds an ontology entity by its identifier
    pub fn entity(&self, entity_id: &str) -> Option<&Entity> {
        self.ontology.entities.iter().find(|e| e.entity_id == entity_id)
    }
}
