//! Event bus records
//!
//! JSON records published on the `pipeline.submitted` and `pipeline.started`
//! topics. Both carry the `pipeline_id` as correlation key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::submission::{PipelineSubmission, RawSpec};

/// Topic the ingestion endpoint publishes submissions to
pub const SUBMITTED_TOPIC: &str = "pipeline.submitted";

/// Topic the dispatcher publishes run confirmations to
pub const STARTED_TOPIC: &str = "pipeline.started";

/// Discriminator carried by every event record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "pipeline.submitted")]
    PipelineSubmitted,
    #[serde(rename = "pipeline.started")]
    PipelineStarted,
}

impl EventType {
    /// Topic on which events of this type are published
    pub fn topic(&self) -> &'static str {
        match self {
            EventType::PipelineSubmitted => SUBMITTED_TOPIC,
            EventType::PipelineStarted => STARTED_TOPIC,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.topic())
    }
}

/// Errors decoding an event record read from the bus
#[derive(Debug, Error)]
pub enum EventDecodeError {
    #[error("malformed event payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unexpected event type {found}, expected {expected}")]
    UnexpectedType {
        expected: EventType,
        found: EventType,
    },
}

/// A request to run a pipeline, as published by the ingestion endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionEvent {
    pub event_type: EventType,
    pub pipeline_id: String,
    pub workspace_id: String,
    pub project_id: String,
    pub raw_spec: RawSpec,
    pub timestamp: DateTime<Utc>,
}

impl From<PipelineSubmission> for SubmissionEvent {
    fn from(submission: PipelineSubmission) -> Self {
        Self {
            event_type: EventType::PipelineSubmitted,
            pipeline_id: submission.pipeline_id,
            workspace_id: submission.workspace_id,
            project_id: submission.project_id,
            raw_spec: submission.raw_spec,
            timestamp: submission.submitted_at,
        }
    }
}

impl SubmissionEvent {
    /// Encodes the event for publishing
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Decodes a payload read from the submission topic
    pub fn from_bytes(payload: &[u8]) -> Result<Self, EventDecodeError> {
        let event: Self = serde_json::from_slice(payload)?;
        expect_type(EventType::PipelineSubmitted, event.event_type)?;
        Ok(event)
    }
}

/// Advisory confirmation that a workflow run was started for a pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartedEvent {
    pub event_type: EventType,
    pub pipeline_id: String,
    pub workspace_id: String,
    pub project_id: String,
    /// Workflow identifier in the engine (the pipeline id)
    pub workflow_id: String,
    /// Engine-assigned execution id of the started run
    pub workflow_run_id: String,
    pub timestamp: DateTime<Utc>,
}

impl StartedEvent {
    /// Builds the confirmation for a dispatched submission
    pub fn for_submission(
        submission: &SubmissionEvent,
        workflow_id: impl Into<String>,
        workflow_run_id: impl Into<String>,
    ) -> Self {
        Self {
            event_type: EventType::PipelineStarted,
            pipeline_id: submission.pipeline_id.clone(),
            workspace_id: submission.workspace_id.clone(),
            project_id: submission.project_id.clone(),
            workflow_id: workflow_id.into(),
            workflow_run_id: workflow_run_id.into(),
            timestamp: Utc::now(),
        }
    }

    /// Encodes the event for publishing
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Decodes a payload read from the started topic
    pub fn from_bytes(payload: &[u8]) -> Result<Self, EventDecodeError> {
        let event: Self = serde_json::from_slice(payload)?;
        expect_type(EventType::PipelineStarted, event.event_type)?;
        Ok(event)
    }
}

fn expect_type(expected: EventType, found: EventType) -> Result<(), EventDecodeError> {
    if expected != found {
        return Err(EventDecodeError::UnexpectedType { expected, found });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::submission::SubmissionDefaults;
    use serde_json::json;

    fn submission() -> SubmissionEvent {
        let raw = json!({
            "pipeline_id": "p1",
            "workspace_id": "w1",
            "project_id": "pr1",
            "steps": [{"method": "twitter", "params": {"depth": 2, "nested": [1, null, true]}}]
        });
        let map = raw.as_object().unwrap().clone();
        PipelineSubmission::from_document(map, &SubmissionDefaults::default()).into()
    }

    #[test]
    fn test_submission_wire_shape() {
        let event = submission();
        let json: serde_json::Value = serde_json::from_slice(&event.to_bytes().unwrap()).unwrap();

        assert_eq!(json["event_type"], "pipeline.submitted");
        assert_eq!(json["pipeline_id"], "p1");
        assert_eq!(json["workspace_id"], "w1");
        assert_eq!(json["project_id"], "pr1");
        assert!(json["raw_spec"]["steps"][0]["params"]["nested"][1].is_null());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_submission_decodes_without_loss() {
        let event = submission();
        let decoded = SubmissionEvent::from_bytes(&event.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn test_submission_rejects_garbage() {
        let err = SubmissionEvent::from_bytes(b"not json").unwrap_err();
        assert!(matches!(err, EventDecodeError::Malformed(_)));

        let truncated = br#"{"event_type":"pipeline.submitted"}"#;
        let err = SubmissionEvent::from_bytes(truncated).unwrap_err();
        assert!(matches!(err, EventDecodeError::Malformed(_)));
    }

    #[test]
    fn test_submission_rejects_started_event() {
        let started = StartedEvent::for_submission(&submission(), "p1", "run-1");
        let err = SubmissionEvent::from_bytes(&started.to_bytes().unwrap()).unwrap_err();
        assert!(matches!(
            err,
            EventDecodeError::UnexpectedType {
                expected: EventType::PipelineSubmitted,
                found: EventType::PipelineStarted
            }
        ));
    }

    #[test]
    fn test_started_event_carries_correlation_ids() {
        let source = submission();
        let started = StartedEvent::for_submission(&source, "p1", "run-1");
        let json: serde_json::Value = serde_json::to_value(&started).unwrap();

        assert_eq!(json["event_type"], "pipeline.started");
        assert_eq!(json["pipeline_id"], "p1");
        assert_eq!(json["workspace_id"], "w1");
        assert_eq!(json["project_id"], "pr1");
        assert_eq!(json["workflow_run_id"], "run-1");

        let decoded = StartedEvent::from_bytes(&started.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, started);
    }

    #[test]
    fn test_event_type_topics() {
        assert_eq!(EventType::PipelineSubmitted.topic(), SUBMITTED_TOPIC);
        assert_eq!(EventType::PipelineStarted.to_string(), "pipeline.started");
    }
}
