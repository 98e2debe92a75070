//! Pipeline submission domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

/// Workspace assigned to submissions that do not name one
pub const DEFAULT_WORKSPACE_ID: &str = "workspace-test-001";

/// Project assigned to submissions that do not name one
pub const DEFAULT_PROJECT_ID: &str = "project-test-001";

/// Opaque pipeline description as submitted.
///
/// No schema is imposed on it; it is forwarded verbatim to the workflow engine.
pub type RawSpec = Map<String, JsonValue>;

/// One request to run a pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSubmission {
    pub pipeline_id: String,
    pub workspace_id: String,
    pub project_id: String,
    pub raw_spec: RawSpec,
    pub submitted_at: DateTime<Utc>,
}

/// Fallback scope identifiers for submissions that omit them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDefaults {
    pub workspace_id: String,
    pub project_id: String,
}

impl Default for SubmissionDefaults {
    fn default() -> Self {
        Self {
            workspace_id: DEFAULT_WORKSPACE_ID.to_string(),
            project_id: DEFAULT_PROJECT_ID.to_string(),
        }
    }
}

impl PipelineSubmission {
    /// Builds a submission from a decoded pipeline document.
    ///
    /// `pipeline_id`, `workspace_id` and `project_id` are read from the
    /// top level of the document. A missing or non-string `pipeline_id` is
    /// replaced by a freshly generated one; missing or non-string scope ids
    /// fall back to `defaults`. The whole document is kept as `raw_spec`.
    pub fn from_document(raw_spec: RawSpec, defaults: &SubmissionDefaults) -> Self {
        let pipeline_id =
            string_field(&raw_spec, "pipeline_id").unwrap_or_else(generate_pipeline_id);
        let workspace_id = string_field(&raw_spec, "workspace_id")
            .unwrap_or_else(|| defaults.workspace_id.clone());
        let project_id =
            string_field(&raw_spec, "project_id").unwrap_or_else(|| defaults.project_id.clone());

        Self {
            pipeline_id,
            workspace_id,
            project_id,
            raw_spec,
            submitted_at: Utc::now(),
        }
    }
}

/// Mints a new globally unique pipeline identifier
pub fn generate_pipeline_id() -> String {
    Uuid::new_v4().to_string()
}

fn string_field(doc: &RawSpec, key: &str) -> Option<String> {
    doc.get(key).and_then(JsonValue::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: JsonValue) -> RawSpec {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_explicit_identifiers_are_kept() {
        let raw = doc(json!({
            "pipeline_id": "p1",
            "workspace_id": "w1",
            "project_id": "pr1",
            "steps": [{"name": "crawl"}]
        }));

        let submission =
            PipelineSubmission::from_document(raw.clone(), &SubmissionDefaults::default());

        assert_eq!(submission.pipeline_id, "p1");
        assert_eq!(submission.workspace_id, "w1");
        assert_eq!(submission.project_id, "pr1");
        assert_eq!(submission.raw_spec, raw);
    }

    #[test]
    fn test_missing_scope_uses_defaults() {
        let defaults = SubmissionDefaults::default();
        let first = PipelineSubmission::from_document(doc(json!({"steps": []})), &defaults);
        let second = PipelineSubmission::from_document(doc(json!({"steps": []})), &defaults);

        assert_eq!(first.workspace_id, DEFAULT_WORKSPACE_ID);
        assert_eq!(first.project_id, DEFAULT_PROJECT_ID);
        assert_eq!(first.workspace_id, second.workspace_id);
        assert_eq!(first.project_id, second.project_id);
    }

    #[test]
    fn test_non_string_identifiers_are_ignored() {
        let defaults = SubmissionDefaults {
            workspace_id: "ws".to_string(),
            project_id: "proj".to_string(),
        };
        let raw = doc(json!({"pipeline_id": 42, "workspace_id": ["a"], "project_id": null}));

        let submission = PipelineSubmission::from_document(raw, &defaults);

        assert_ne!(submission.pipeline_id, "42");
        assert!(Uuid::parse_str(&submission.pipeline_id).is_ok());
        assert_eq!(submission.workspace_id, "ws");
        assert_eq!(submission.project_id, "proj");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let defaults = SubmissionDefaults::default();
        let ids: std::collections::HashSet<String> = (0..100)
            .map(|_| PipelineSubmission::from_document(RawSpec::new(), &defaults).pipeline_id)
            .collect();

        assert_eq!(ids.len(), 100);
    }
}
