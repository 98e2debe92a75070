//! Ingest configuration
//!
//! Connection settings for the bus and the workflow engine, plus the
//! defaults applied to submissions that leave out their scope.

use relay_core::domain::submission::{
    DEFAULT_PROJECT_ID, DEFAULT_WORKSPACE_ID, SubmissionDefaults,
};

use crate::service::submission::SubmissionSettings;

/// Largest accepted request body (1 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Ingest service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Event bus URL (e.g., "redis://localhost:6379")
    pub redis_url: String,

    /// Temporal HTTP API base URL, used for status queries
    pub temporal_url: String,

    /// Temporal namespace runs live in
    pub namespace: String,

    /// Workspace assigned when a submission names none
    pub default_workspace_id: String,

    /// Project assigned when a submission names none
    pub default_project_id: String,

    /// Base URL of the workflow monitoring UI
    pub monitoring_url: String,

    /// Requests with larger bodies are rejected with 413
    pub max_body_bytes: usize,

    /// Address the HTTP server binds to
    pub bind_addr: String,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// All variables are optional:
    /// - REDIS_URL (default: redis://localhost:6379)
    /// - TEMPORAL_URL (default: http://localhost:7243)
    /// - TEMPORAL_NAMESPACE (default: default)
    /// - DEFAULT_WORKSPACE_ID (default: workspace-test-001)
    /// - DEFAULT_PROJECT_ID (default: project-test-001)
    /// - MONITORING_URL (default: http://localhost:8088)
    /// - MAX_BODY_BYTES (default: 1048576)
    /// - INGEST_BIND_ADDR (default: 0.0.0.0:8080)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str, default: String| lookup(key).unwrap_or(default);

        let max_body_bytes = lookup("MAX_BODY_BYTES")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(defaults.max_body_bytes);

        Self {
            redis_url: var("REDIS_URL", defaults.redis_url),
            temporal_url: var("TEMPORAL_URL", defaults.temporal_url),
            namespace: var("TEMPORAL_NAMESPACE", defaults.namespace),
            default_workspace_id: var("DEFAULT_WORKSPACE_ID", defaults.default_workspace_id),
            default_project_id: var("DEFAULT_PROJECT_ID", defaults.default_project_id),
            monitoring_url: var("MONITORING_URL", defaults.monitoring_url),
            max_body_bytes,
            bind_addr: var("INGEST_BIND_ADDR", defaults.bind_addr),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.redis_url.starts_with("redis://") && !self.redis_url.starts_with("rediss://") {
            anyhow::bail!("redis_url must start with redis:// or rediss://");
        }

        for (name, url) in [
            ("temporal_url", &self.temporal_url),
            ("monitoring_url", &self.monitoring_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
        }

        if self.namespace.is_empty() {
            anyhow::bail!("namespace cannot be empty");
        }

        if self.default_workspace_id.is_empty() || self.default_project_id.is_empty() {
            anyhow::bail!("default workspace and project ids cannot be empty");
        }

        if self.max_body_bytes == 0 {
            anyhow::bail!("max_body_bytes must be greater than 0");
        }

        Ok(())
    }

    /// Settings the submission service needs
    pub fn submission_settings(&self) -> SubmissionSettings {
        SubmissionSettings {
            defaults: SubmissionDefaults {
                workspace_id: self.default_workspace_id.clone(),
                project_id: self.default_project_id.clone(),
            },
            monitoring_url: self.monitoring_url.clone(),
            namespace: self.namespace.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            temporal_url: "http://localhost:7243".to_string(),
            namespace: "default".to_string(),
            default_workspace_id: DEFAULT_WORKSPACE_ID.to_string(),
            default_project_id: DEFAULT_PROJECT_ID.to_string(),
            monitoring_url: "http://localhost:8088".to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}
