//! Submission HTTP bodies

use serde::{Deserialize, Serialize};

use crate::domain::submission::PipelineSubmission;

/// Status reported for an accepted submission
pub const SUBMITTED: &str = "submitted";

/// Acknowledgement returned once a submission event has been published.
///
/// This is not a completion: the workflow run is started asynchronously.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionAccepted {
    pub pipeline_id: String,
    pub workspace_id: String,
    pub project_id: String,
    pub status: String,
    pub message: String,
    pub monitoring_link: String,
}

impl SubmissionAccepted {
    /// Builds the acknowledgement for a published submission
    pub fn new(submission: &PipelineSubmission, monitoring_link: String) -> Self {
        Self {
            pipeline_id: submission.pipeline_id.clone(),
            workspace_id: submission.workspace_id.clone(),
            project_id: submission.project_id.clone(),
            status: SUBMITTED.to_string(),
            message: "Pipeline submitted successfully".to_string(),
            monitoring_link,
        }
    }
}

/// Error body returned by every Relay HTTP endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
