//! Status Service
//!
//! Reads pipeline run state from the workflow engine.

use relay_core::domain::status::PipelineStatusRecord;
use relay_engine::{EngineError, WorkflowEngine};

/// Look up the status of a pipeline run
///
/// The run id is the pipeline id, so no local bookkeeping is needed.
pub async fn get_status(
    engine: &dyn WorkflowEngine,
    pipeline_id: &str,
) -> Result<PipelineStatusRecord, EngineError> {
    let execution = engine.describe(pipeline_id).await?;

    Ok(PipelineStatusRecord {
        pipeline_id: pipeline_id.to_string(),
        status: execution.status,
        run_id: execution.execution_id,
        started_at: execution.started_at,
        closed_at: execution.closed_at,
    })
}
