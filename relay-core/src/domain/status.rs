//! Pipeline run status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of the workflow run backing a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Running,
    Completed,
    Failed,
    Canceled,
    Terminated,
    ContinuedAsNew,
    TimedOut,
    Unknown,
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PipelineStatus::Running => "running",
            PipelineStatus::Completed => "completed",
            PipelineStatus::Failed => "failed",
            PipelineStatus::Canceled => "canceled",
            PipelineStatus::Terminated => "terminated",
            PipelineStatus::ContinuedAsNew => "continued_as_new",
            PipelineStatus::TimedOut => "timed_out",
            PipelineStatus::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Status of one pipeline as reported by the workflow engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineStatusRecord {
    pub pipeline_id: String,
    pub status: PipelineStatus,
    /// Engine-assigned execution id of the current run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&PipelineStatus::ContinuedAsNew).unwrap(),
            "\"continued_as_new\""
        );
        assert_eq!(PipelineStatus::TimedOut.to_string(), "timed_out");
    }

    #[test]
    fn test_record_omits_missing_fields() {
        let record = PipelineStatusRecord {
            pipeline_id: "p1".to_string(),
            status: PipelineStatus::Running,
            run_id: None,
            started_at: None,
            closed_at: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"pipeline_id": "p1", "status": "running"}));
    }
}
