//! Relay Catalog
//!
//! Read-only HTTP API over the method registry and data ontology that
//! pipeline steps refer to. The catalog is a fixture document loaded once
//! at startup; there are no writes and no indexing.

pub mod api;
pub mod config;
pub mod store;

pub use api::create_router;
pub use config::Config;
pub use store::{CatalogError, CatalogStore, FileCatalog};
