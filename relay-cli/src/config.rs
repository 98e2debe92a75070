//! Configuration module
//!
//! Handles CLI configuration: where the Relay services live.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the ingestion service
    pub ingest_url: String,
    /// URL of the catalog service
    pub catalog_url: String,
}
