//! Catalog store
//!
//! Lookups by identifier over a catalog document. The HTTP layer only sees
//! the [`CatalogStore`] trait, so other backends can be plugged in.

use async_trait::async_trait;
use relay_core::domain::catalog::{Catalog, Entity, Method, Ontology};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only catalog lookups
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Lists methods, optionally only those of one type
    async fn list_methods(&self, method_type: Option<&str>) -> Vec<Method>;

    /// Finds a method by id
    async fn get_method(&self, method_id: &str) -> Option<Method>;

    /// Returns the whole ontology
    async fn ontology(&self) -> Ontology;

    /// Finds an ontology entity by id
    async fn get_entity(&self, entity_id: &str) -> Option<Entity>;

    /// Number of methods and entities held
    async fn counts(&self) -> (usize, usize);
}

/// Catalog held in memory, loaded from a JSON file
#[derive(Debug, Clone, Default)]
pub struct FileCatalog {
    catalog: Catalog,
}

impl FileCatalog {
    /// Wraps an already loaded catalog
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Loads a catalog from a JSON file
    ///
    /// A missing file gives an empty catalog; any other read error or an
    /// unparsable document is an error.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("Catalog file {} not found, using empty catalog", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(CatalogError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let catalog: Catalog =
            serde_json::from_slice(&data).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(
            "Loaded {} methods and {} entities from {}",
            catalog.methods.len(),
            catalog.ontology.entities.len(),
            path.display()
        );

        Ok(Self { catalog })
    }
}

#[async_trait]
impl CatalogStore for FileCatalog {
    async fn list_methods(&self, method_type: Option<&str>) -> Vec<Method> {
        self.catalog.methods_of_type(method_type)
    }

    async fn get_method(&self, method_id: &str) -> Option<Method> {
        self.catalog.method(method_id).cloned()
    }

    async fn ontology(&self) -> Ontology {
        self.catalog.ontology.clone()
    }

    async fn get_entity(&self, entity_id: &str) -> Option<Entity> {
        self.catalog.entity(entity_id).cloned()
    }

    async fn counts(&self) -> (usize, usize) {
        (
            self.catalog.methods.len(),
            self.catalog.ontology.entities.len(),
        )
    }
}
