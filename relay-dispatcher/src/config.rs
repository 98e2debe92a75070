//! Dispatcher configuration
//!
//! Connection settings for the bus and the workflow engine, and the
//! parameters every workflow start is issued with.

use std::time::Duration;

use crate::service::DispatchSettings;

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Event bus URL (e.g., "redis://localhost:6379")
    pub redis_url: String,

    /// Temporal HTTP API base URL (e.g., "http://localhost:7243")
    pub temporal_url: String,

    /// Temporal namespace runs are started in
    pub namespace: String,

    /// Task queue the workflow workers poll
    pub task_queue: String,

    /// Workflow type started for every pipeline
    pub workflow_type: String,

    /// Upper bound on a single start call
    pub start_timeout: Duration,

    /// Address of the health server
    pub health_addr: String,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// All variables are optional:
    /// - REDIS_URL (default: redis://localhost:6379)
    /// - TEMPORAL_URL (default: http://localhost:7243)
    /// - TEMPORAL_NAMESPACE (default: default)
    /// - TASK_QUEUE (default: pipeline-tasks)
    /// - WORKFLOW_TYPE (default: PipelineWorkflow)
    /// - START_TIMEOUT (seconds, default: 10)
    /// - DISPATCHER_HEALTH_ADDR (default: 0.0.0.0:8081)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str, default: String| lookup(key).unwrap_or(default);

        let start_timeout = lookup("START_TIMEOUT")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.start_timeout);

        Self {
            redis_url: var("REDIS_URL", defaults.redis_url),
            temporal_url: var("TEMPORAL_URL", defaults.temporal_url),
            namespace: var("TEMPORAL_NAMESPACE", defaults.namespace),
            task_queue: var("TASK_QUEUE", defaults.task_queue),
            workflow_type: var("WORKFLOW_TYPE", defaults.workflow_type),
            start_timeout,
            health_addr: var("DISPATCHER_HEALTH_ADDR", defaults.health_addr),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.redis_url.starts_with("redis://") && !self.redis_url.starts_with("rediss://") {
            anyhow::bail!("redis_url must start with redis:// or rediss://");
        }

        if !self.temporal_url.starts_with("http://") && !self.temporal_url.starts_with("https://")
        {
            anyhow::bail!("temporal_url must start with http:// or https://");
        }

        if self.namespace.is_empty() {
            anyhow::bail!("namespace cannot be empty");
        }

        if self.task_queue.is_empty() {
            anyhow::bail!("task_queue cannot be empty");
        }

        if self.workflow_type.is_empty() {
            anyhow::bail!("workflow_type cannot be empty");
        }

        if self.start_timeout.is_zero() {
            anyhow::bail!("start_timeout must be greater than 0");
        }

        Ok(())
    }

    /// Parameters for the dispatch service
    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            task_queue: self.task_queue.clone(),
            workflow_type: self.workflow_type.clone(),
            start_timeout: self.start_timeout,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let dispatch = DispatchSettings::default();
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            temporal_url: "http://localhost:7243".to_string(),
            namespace: "default".to_string(),
            task_queue: dispatch.task_queue,
            workflow_type: dispatch.workflow_type,
            start_timeout: dispatch.start_timeout,
            health_addr: "0.0.0.0:8081".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.task_queue, "pipeline-tasks");
        assert_eq!(config.workflow_type, "PipelineWorkflow");
        assert_eq!(config.start_timeout, Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup() {
        let config = Config::from_lookup(|key| match key {
            "TASK_QUEUE" => Some("batch".to_string()),
            "START_TIMEOUT" => Some("3".to_string()),
            "DISPATCHER_HEALTH_ADDR" => Some("127.0.0.1:9000".to_string()),
            _ => None,
        });

        assert_eq!(config.task_queue, "batch");
        assert_eq!(config.start_timeout, Duration::from_secs(3));
        assert_eq!(config.health_addr, "127.0.0.1:9000");
        assert_eq!(config.redis_url, "redis://localhost:6379");
    }

    #[test]
    fn test_unparsable_timeout_falls_back() {
        let config = Config::from_lookup(|key| {
            (key == "START_TIMEOUT").then(|| "soon".to_string())
        });
        assert_eq!(config.start_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.start_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
        config.start_timeout = Duration::from_secs(1);

        config.temporal_url = "localhost:7243".to_string();
        assert!(config.validate().is_err());
        config.temporal_url = "http://localhost:7243".to_string();

        config.task_queue = String::new();
        assert!(config.validate().is_err());
        config.task_queue = "pipeline-tasks".to_string();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dispatch_settings() {
        let config = Config {
            workflow_type: "BatchWorkflow".to_string(),
            ..Config::default()
        };
        let settings = config.dispatch_settings();
        assert_eq!(settings.workflow_type, "BatchWorkflow");
        assert_eq!(settings.task_queue, "pipeline-tasks");
    }
}
