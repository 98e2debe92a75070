//! Temporal HTTP adapter
//!
//! Talks to the Temporal frontend's HTTP API:
//! - `POST /api/v1/namespaces/{ns}/workflows/{id}` to start a run
//! - `GET  /api/v1/namespaces/{ns}/workflows/{id}` to describe it
//! - `GET  /api/v1/system-info` as a liveness check
//!
//! Workflow input is sent in the JSON payload shorthand, so the submitted
//! document reaches the workflow unchanged.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use relay_core::domain::status::PipelineStatus;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::time::Duration;

use crate::error::{EngineError, Result};
use crate::{StartWorkflow, WorkflowEngine, WorkflowExecution, WorkflowRun};

/// Upper bound on a single request to the engine
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Workflow engine backed by a Temporal cluster
#[derive(Debug, Clone)]
pub struct TemporalEngine {
    /// Base URL of the Temporal HTTP API (e.g., "http://localhost:7243")
    base_url: String,
    namespace: String,
    client: Client,
}

impl TemporalEngine {
    /// Creates a new Temporal adapter
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the Temporal HTTP API
    /// * `namespace` - Temporal namespace runs are started in
    pub fn new(base_url: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self::with_timeout(base_url, namespace, REQUEST_TIMEOUT)
    }

    /// Creates a new Temporal adapter whose requests give up after `timeout`
    pub fn with_timeout(
        base_url: impl Into<String>,
        namespace: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self::with_client(base_url, namespace, client)
    }

    /// Creates a new Temporal adapter with a custom HTTP client
    pub fn with_client(
        base_url: impl Into<String>,
        namespace: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            namespace: namespace.into(),
            client,
        }
    }

    /// Get the base URL of the Temporal HTTP API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of one run; the namespace and run id are single path segments
    fn workflow_url(&self, run_id: &str) -> Result<Url> {
        self.api_url(&["namespaces", &self.namespace, "workflows", run_id])
    }

    fn api_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| EngineError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| EngineError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["api", "v1"])
            .extend(segments);

        Ok(url)
    }

    /// Reads an error body and maps the status code to an engine error
    async fn error_for(run_id: &str, response: reqwest::Response) -> EngineError {
        let status = response.status();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match status {
            StatusCode::CONFLICT => EngineError::AlreadyStarted(run_id.to_string()),
            StatusCode::NOT_FOUND => EngineError::NotFound(run_id.to_string()),
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                EngineError::Unavailable(message)
            }
            _ => EngineError::Rejected {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl WorkflowEngine for TemporalEngine {
    async fn start(&self, request: StartWorkflow) -> Result<WorkflowRun> {
        let url = self.workflow_url(&request.run_id)?;
        let body = StartWorkflowBody::from(&request);

        tracing::debug!(
            run_id = %request.run_id,
            task_queue = %request.task_queue,
            "Starting Temporal workflow"
        );

        let response = self.client.post(url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_for(&request.run_id, response).await);
        }

        let started: StartWorkflowResponse = response.json().await?;

        Ok(WorkflowRun {
            run_id: request.run_id,
            execution_id: started.run_id,
        })
    }

    async fn describe(&self, run_id: &str) -> Result<WorkflowExecution> {
        let url = self.workflow_url(run_id)?;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_for(run_id, response).await);
        }

        let described: DescribeWorkflowResponse = response.json().await?;
        let info = described.workflow_execution_info.ok_or_else(|| {
            EngineError::InvalidResponse("missing workflowExecutionInfo".to_string())
        })?;

        Ok(WorkflowExecution {
            run_id: run_id.to_string(),
            execution_id: info.execution.and_then(|e| e.run_id),
            status: parse_status(info.status.as_deref()),
            started_at: info.start_time,
            closed_at: info.close_time,
        })
    }

    async fn health_check(&self) -> Result<()> {
        let url = self.api_url(&["system-info"])?;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(EngineError::Unavailable(format!(
                "system-info returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Maps a Temporal execution status name onto a pipeline status
fn parse_status(status: Option<&str>) -> PipelineStatus {
    match status {
        Some("WORKFLOW_EXECUTION_STATUS_RUNNING") => PipelineStatus::Running,
        Some("WORKFLOW_EXECUTION_STATUS_COMPLETED") => PipelineStatus::Completed,
        Some("WORKFLOW_EXECUTION_STATUS_FAILED") => PipelineStatus::Failed,
        Some("WORKFLOW_EXECUTION_STATUS_CANCELED") => PipelineStatus::Canceled,
        Some("WORKFLOW_EXECUTION_STATUS_TERMINATED") => PipelineStatus::Terminated,
        Some("WORKFLOW_EXECUTION_STATUS_CONTINUED_AS_NEW") => PipelineStatus::ContinuedAsNew,
        Some("WORKFLOW_EXECUTION_STATUS_TIMED_OUT") => PipelineStatus::TimedOut,
        _ => PipelineStatus::Unknown,
    }
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StartWorkflowBody {
    workflow_id: String,
    workflow_type: NamedRef,
    task_queue: NamedRef,
    input: Vec<JsonValue>,
    request_id: String,
}

impl From<&StartWorkflow> for StartWorkflowBody {
    fn from(request: &StartWorkflow) -> Self {
        Self {
            workflow_id: request.run_id.clone(),
            workflow_type: NamedRef {
                name: request.workflow_type.clone(),
            },
            task_queue: NamedRef {
                name: request.task_queue.clone(),
            },
            input: vec![request.input.clone()],
            request_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct NamedRef {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartWorkflowResponse {
    run_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeWorkflowResponse {
    workflow_execution_info: Option<ExecutionInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecutionInfo {
    execution: Option<ExecutionRef>,
    status: Option<String>,
    start_time: Option<DateTime<Utc>>,
    close_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecutionRef {
    run_id: Option<String>,
}
