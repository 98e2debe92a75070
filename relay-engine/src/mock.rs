//! In-memory workflow engine for tests

use async_trait::async_trait;
use relay_core::domain::status::PipelineStatus;
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{EngineError, Result};
use crate::{StartWorkflow, WorkflowEngine, WorkflowExecution, WorkflowRun};

/// Mock engine that records start requests.
///
/// Like a real engine it rejects a second start of a run id that is still
/// running. Individual run ids can be made to fail, and every start can be
/// delayed to exercise timeouts.
#[derive(Default)]
pub struct MockEngine {
    requests: Mutex<Vec<StartWorkflow>>,
    running: Mutex<HashSet<String>>,
    failing: Mutex<HashSet<String>>,
    start_delay: Option<Duration>,
    unavailable: bool,
}

impl MockEngine {
    /// Create a mock engine that accepts every start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock engine whose every call fails as unreachable.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Delay every start call by `delay`.
    pub fn with_start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = Some(delay);
        self
    }

    /// Make starts of `run_id` fail with a server error.
    pub fn fail_run(&self, run_id: impl Into<String>) {
        self.failing.lock().unwrap().insert(run_id.into());
    }

    /// Get all start requests that were made, in call order.
    pub fn requests(&self) -> Vec<StartWorkflow> {
        self.requests.lock().unwrap().clone()
    }

    /// Run ids that were started successfully, sorted.
    pub fn started_run_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.running.lock().unwrap().iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Get the number of start requests made.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Wait until at least `count` start requests were made.
    ///
    /// Returns `false` if `timeout` elapses first.
    pub async fn wait_for_requests(&self, count: usize, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        while self.request_count() < count {
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        true
    }
}

#[async_trait]
impl WorkflowEngine for MockEngine {
    async fn start(&self, request: StartWorkflow) -> Result<WorkflowRun> {
        if self.unavailable {
            return Err(EngineError::Unavailable("mock engine is down".to_string()));
        }

        self.requests.lock().unwrap().push(request.clone());

        if let Some(delay) = self.start_delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.lock().unwrap().contains(&request.run_id) {
            return Err(EngineError::Rejected {
                status: 500,
                message: format!("mock failure for {}", request.run_id),
            });
        }

        if !self.running.lock().unwrap().insert(request.run_id.clone()) {
            return Err(EngineError::AlreadyStarted(request.run_id));
        }

        Ok(WorkflowRun {
            execution_id: format!("exec-{}", request.run_id),
            run_id: request.run_id,
        })
    }

    async fn describe(&self, run_id: &str) -> Result<WorkflowExecution> {
        if self.unavailable {
            return Err(EngineError::Unavailable("mock engine is down".to_string()));
        }

        if !self.running.lock().unwrap().contains(run_id) {
            return Err(EngineError::NotFound(run_id.to_string()));
        }

        Ok(WorkflowExecution {
            run_id: run_id.to_string(),
            execution_id: Some(format!("exec-{}", run_id)),
            status: PipelineStatus::Running,
            started_at: None,
            closed_at: None,
        })
    }

    async fn health_check(&self) -> Result<()> {
        if self.unavailable {
            return Err(EngineError::Unavailable("mock engine is down".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(run_id: &str) -> StartWorkflow {
        StartWorkflow {
            run_id: run_id.to_string(),
            task_queue: "q".to_string(),
            workflow_type: "W".to_string(),
            input: json!({}),
        }
    }

    #[tokio::test]
    async fn test_duplicate_start_is_rejected() {
        let engine = MockEngine::new();

        let run = engine.start(request("p1")).await.unwrap();
        assert_eq!(run.run_id, "p1");
        assert_eq!(run.execution_id, "exec-p1");

        let err = engine.start(request("p1")).await.unwrap_err();
        assert!(matches!(err, EngineError::AlreadyStarted(id) if id == "p1"));
        assert_eq!(engine.request_count(), 2);
        assert_eq!(engine.started_run_ids(), vec!["p1"]);
    }

    #[tokio::test]
    async fn test_failing_run() {
        let engine = MockEngine::new();
        engine.fail_run("bad");

        assert!(engine.start(request("bad")).await.is_err());
        assert!(engine.start(request("good")).await.is_ok());
        assert!(matches!(
            engine.describe("bad").await,
            Err(EngineError::NotFound(_))
        ));
        assert_eq!(
            engine.describe("good").await.unwrap().status,
            PipelineStatus::Running
        );
    }
}
