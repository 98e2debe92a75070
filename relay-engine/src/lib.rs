//! Relay Workflow Engine
//!
//! The contract Relay uses to hand pipelines to the durable workflow engine,
//! plus an adapter for Temporal's HTTP API.
//!
//! The engine owns everything after a run has started. Relay only asks it to
//! start a run (keyed by the pipeline id) and to describe a run's state.
//! Duplicate-start protection is delegated to the engine: starting a run id
//! that is already running fails with [`EngineError::AlreadyStarted`].

pub mod error;
#[cfg(any(test, feature = "testing"))]
mod mock;
mod temporal;

pub use error::{EngineError, Result};
#[cfg(any(test, feature = "testing"))]
pub use mock::MockEngine;
pub use temporal::TemporalEngine;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use relay_core::domain::status::PipelineStatus;
use serde_json::Value as JsonValue;

/// Request to start one workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct StartWorkflow {
    /// Run identifier; the pipeline id
    pub run_id: String,
    /// Logical task queue the engine's workers poll
    pub task_queue: String,
    /// Registered workflow type to execute
    pub workflow_type: String,
    /// Workflow input; the submitted pipeline document
    pub input: JsonValue,
}

/// Handle to a started run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRun {
    /// Run identifier that was requested
    pub run_id: String,
    /// Engine-assigned identifier of this particular execution
    pub execution_id: String,
}

/// State of a run as reported by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowExecution {
    pub run_id: String,
    pub execution_id: Option<String>,
    pub status: PipelineStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// Durable workflow engine consumed by Relay
#[async_trait]
pub trait WorkflowEngine: Send + Sync {
    /// Starts a workflow run
    ///
    /// # Errors
    /// - `AlreadyStarted` if a run with the same id is already running
    /// - `Unavailable` if the engine cannot be reached
    async fn start(&self, request: StartWorkflow) -> Result<WorkflowRun>;

    /// Describes the latest execution of a run
    ///
    /// # Errors
    /// - `NotFound` if the engine has no run with this id
    async fn describe(&self, run_id: &str) -> Result<WorkflowExecution>;

    /// Checks that the engine is reachable
    async fn health_check(&self) -> Result<()>;
}
