//! Dispatch service
//!
//! Handles one payload read from the submission topic:
//! - decodes it into a submission event
//! - starts the workflow run keyed by the pipeline id
//! - publishes a started confirmation, best-effort
//!
//! Nothing here retries. A failed step is reported as a skip and the
//! consume loop moves on.

use async_trait::async_trait;
use relay_bus::EventBus;
use relay_core::dto::event::{STARTED_TOPIC, StartedEvent, SubmissionEvent};
use relay_engine::{EngineError, StartWorkflow, WorkflowEngine, WorkflowRun};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Parameters every workflow start is issued with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSettings {
    pub task_queue: String,
    pub workflow_type: String,
    /// Upper bound on a single start call
    pub start_timeout: Duration,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            task_queue: "pipeline-tasks".to_string(),
            workflow_type: "PipelineWorkflow".to_string(),
            start_timeout: Duration::from_secs(10),
        }
    }
}

/// Result of handling one payload
#[derive(Debug)]
pub enum Outcome {
    /// A workflow run was started
    Dispatched {
        pipeline_id: String,
        execution_id: String,
        /// Whether the started confirmation reached the bus
        confirmed: bool,
    },
    /// The payload was dropped
    Skipped(SkipReason),
}

/// Why a payload was dropped
#[derive(Debug)]
pub enum SkipReason {
    /// The payload is not a submission event
    Malformed(String),
    /// The workflow engine did not start the run
    StartFailed {
        pipeline_id: String,
        error: EngineError,
    },
}

impl Outcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Outcome::Dispatched { .. })
    }
}

/// Service trait for dispatching submission events
#[async_trait]
pub trait DispatchService: Send + Sync {
    /// Handles one payload from the submission topic
    ///
    /// Makes at most one workflow-start attempt. Never fails; problems are
    /// reported through the returned outcome.
    async fn dispatch(&self, payload: &[u8]) -> Outcome;
}

/// Standard implementation of DispatchService
pub struct StandardDispatchService {
    engine: Arc<dyn WorkflowEngine>,
    bus: Arc<dyn EventBus>,
    settings: DispatchSettings,
}

impl StandardDispatchService {
    /// Creates a new dispatch service
    ///
    /// # Arguments
    /// * `engine` - Workflow engine runs are started on
    /// * `bus` - Bus the started confirmations are published to
    /// * `settings` - Task queue, workflow type and start timeout
    pub fn new(
        engine: Arc<dyn WorkflowEngine>,
        bus: Arc<dyn EventBus>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            engine,
            bus,
            settings,
        }
    }

    /// Starts the workflow run for an event, bounded by the start timeout
    async fn start_run(&self, event: &SubmissionEvent) -> Result<WorkflowRun, EngineError> {
        let request = StartWorkflow {
            run_id: event.pipeline_id.clone(),
            task_queue: self.settings.task_queue.clone(),
            workflow_type: self.settings.workflow_type.clone(),
            input: JsonValue::Object(event.raw_spec.clone()),
        };

        let timeout = self.settings.start_timeout;
        match tokio::time::timeout(timeout, self.engine.start(request)).await {
            Ok(result) => result,
            Err(_) => Err(EngineError::Timeout(timeout)),
        }
    }

    /// Publishes the started confirmation; failures are only logged
    async fn confirm(&self, event: &SubmissionEvent, run: &WorkflowRun) -> bool {
        let started = StartedEvent::for_submission(event, &run.run_id, &run.execution_id);

        let payload = match started.to_bytes() {
            Ok(payload) => payload,
            Err(e) => {
                warn!(pipeline_id = %event.pipeline_id, "Failed to encode started event: {}", e);
                return false;
            }
        };

        match self.bus.publish(STARTED_TOPIC, payload).await {
            Ok(()) => true,
            Err(e) => {
                warn!(pipeline_id = %event.pipeline_id, "Failed to publish started event: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl DispatchService for StandardDispatchService {
    async fn dispatch(&self, payload: &[u8]) -> Outcome {
        let event = match SubmissionEvent::from_bytes(payload) {
            Ok(event) => event,
            Err(e) => {
                error!("Skipping malformed submission event: {}", e);
                return Outcome::Skipped(SkipReason::Malformed(e.to_string()));
            }
        };

        info!(
            pipeline_id = %event.pipeline_id,
            workspace_id = %event.workspace_id,
            project_id = %event.project_id,
            "Received pipeline submission"
        );

        let run = match self.start_run(&event).await {
            Ok(run) => run,
            Err(e) => {
                error!(pipeline_id = %event.pipeline_id, "Failed to start workflow: {}", e);
                return Outcome::Skipped(SkipReason::StartFailed {
                    pipeline_id: event.pipeline_id,
                    error: e,
                });
            }
        };

        info!(
            pipeline_id = %event.pipeline_id,
            execution_id = %run.execution_id,
            "Workflow started"
        );

        let confirmed = self.confirm(&event, &run).await;

        Outcome::Dispatched {
            pipeline_id: event.pipeline_id,
            execution_id: run.execution_id,
            confirmed,
        }
    }
}
