//! Submission Service
//!
//! Turns a raw request body into a published submission event.

use relay_bus::{BusError, EventBus};
use relay_core::domain::submission::{PipelineSubmission, RawSpec, SubmissionDefaults};
use relay_core::dto::event::{SUBMITTED_TOPIC, SubmissionEvent};
use relay_core::dto::submission::SubmissionAccepted;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Service error type
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The body is not a decodable pipeline document
    #[error("Invalid pipeline document: {0}")]
    InvalidInput(String),

    /// The submission could not be handed to the bus
    #[error("Dispatch unavailable: {0}")]
    DispatchUnavailable(String),
}

impl From<BusError> for SubmissionError {
    fn from(err: BusError) -> Self {
        SubmissionError::DispatchUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for SubmissionError {
    fn from(err: serde_json::Error) -> Self {
        SubmissionError::DispatchUnavailable(format!("failed to encode event: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, SubmissionError>;

/// Everything a submission needs besides the body
#[derive(Debug, Clone)]
pub struct SubmissionSettings {
    pub defaults: SubmissionDefaults,
    /// Base URL of the workflow monitoring UI
    pub monitoring_url: String,
    /// Namespace the workflow run will live in
    pub namespace: String,
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            defaults: SubmissionDefaults::default(),
            monitoring_url: "http://localhost:8088".to_string(),
            namespace: "default".to_string(),
        }
    }
}

impl SubmissionSettings {
    /// Link to the workflow run in the monitoring UI
    pub fn monitoring_link(&self, pipeline_id: &str) -> String {
        format!(
            "{}/namespaces/{}/workflows/{}",
            self.monitoring_url.trim_end_matches('/'),
            self.namespace,
            pipeline_id
        )
    }
}

/// Submit a pipeline document
///
/// Decodes `body`, resolves the identifying fields and publishes exactly one
/// submission event. The returned acknowledgement only means the event was
/// handed to the bus.
pub async fn submit(
    bus: &dyn EventBus,
    settings: &SubmissionSettings,
    body: &[u8],
) -> Result<SubmissionAccepted> {
    let document = decode_document(body)?;
    let submission = PipelineSubmission::from_document(document, &settings.defaults);

    let accepted = SubmissionAccepted::new(
        &submission,
        settings.monitoring_link(&submission.pipeline_id),
    );

    let payload = SubmissionEvent::from(submission).to_bytes()?;
    bus.publish(SUBMITTED_TOPIC, payload).await?;

    tracing::info!(
        pipeline_id = %accepted.pipeline_id,
        workspace_id = %accepted.workspace_id,
        project_id = %accepted.project_id,
        "Pipeline submitted"
    );

    Ok(accepted)
}

/// Decodes a request body into a pipeline document
///
/// The body is YAML; JSON parses as its subset. Only a top-level mapping is
/// accepted.
pub fn decode_document(body: &[u8]) -> Result<RawSpec> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(SubmissionError::InvalidInput(
            "request body is empty".to_string(),
        ));
    }

    let value: JsonValue = serde_yaml::from_slice(body)
        .map_err(|e| SubmissionError::InvalidInput(e.to_string()))?;

    match value {
        JsonValue::Object(document) => Ok(document),
        other => Err(SubmissionError::InvalidInput(format!(
            "expected a mapping at the top level, found {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "a sequence",
        JsonValue::Object(_) => "a mapping",
    }
}
