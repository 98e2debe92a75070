//! Relay HTTP Client
//!
//! A small, type-safe HTTP client for the Relay ingestion and catalog APIs,
//! used by the `relay` command-line tool.
//!
//! # Example
//!
//! ```no_run
//! use relay_client::RelayClient;
//!
//! #[tokio::main]
//! async fn main() -> relay_client::Result<()> {
//!     let client = RelayClient::new("http://localhost:8080", "http://localhost:8082");
//!
//!     let accepted = client
//!         .submit_pipeline(b"pipeline_id: demo\nsteps: []\n".to_vec())
//!         .await?;
//!
//!     println!("Submitted {} ({})", accepted.pipeline_id, accepted.monitoring_link);
//!     Ok(())
//! }
//! ```

mod catalog;
pub mod error;
mod pipelines;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// HTTP client for the Relay APIs
///
/// Pipeline calls go to the ingestion service, catalog lookups to the
/// catalog service.
#[derive(Debug, Clone)]
pub struct RelayClient {
    /// Base URL of the ingestion service (e.g., "http://localhost:8080")
    ingest_url: String,
    /// Base URL of the catalog service (e.g., "http://localhost:8082")
    catalog_url: String,
    /// HTTP client instance
    client: Client,
}

impl RelayClient {
    /// Create a new Relay client
    ///
    /// # Example
    /// ```
    /// use relay_client::RelayClient;
    ///
    /// let client = RelayClient::new("http://localhost:8080", "http://localhost:8082");
    /// ```
    pub fn new(ingest_url: impl Into<String>, catalog_url: impl Into<String>) -> Self {
        Self::with_client(ingest_url, catalog_url, Client::new())
    }

    /// Create a new Relay client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        ingest_url: impl Into<String>,
        catalog_url: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            ingest_url: ingest_url.into().trim_end_matches('/').to_string(),
            catalog_url: catalog_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the ingestion service
    pub fn ingest_url(&self) -> &str {
        &self.ingest_url
    }

    /// Get the base URL of the catalog service
    pub fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    // =============================================================================
    // Request Helpers
    // =============================================================================

    /// Build a URL under `base`, each segment percent-encoded as one path segment
    fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
        let mut url =
            Url::parse(base).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base, e)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(base.to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    fn ingest_endpoint(&self, segments: &[&str]) -> Result<Url> {
        Self::endpoint(&self.ingest_url, segments)
    }

    fn catalog_endpoint(&self, segments: &[&str]) -> Result<Url> {
        Self::endpoint(&self.catalog_url, segments)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Request failed with status {}: {}", status, body);
            return Err(ClientError::from_body(status.as_u16(), &body));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
