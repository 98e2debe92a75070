//! Pipeline API Handlers
//!
//! HTTP endpoints for pipeline submission and status.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::BytesRejection},
    http::StatusCode,
};
use relay_core::domain::status::PipelineStatusRecord;
use relay_core::dto::submission::SubmissionAccepted;

use crate::api::AppState;
use crate::api::error::ApiResult;
use crate::service::{status_service, submission_service};

/// POST /api/v1/pipelines
/// Submit a pipeline document for execution
pub async fn submit_pipeline(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<(StatusCode, Json<SubmissionAccepted>)> {
    let body = body?;
    tracing::debug!("Received pipeline submission ({} bytes)", body.len());

    let accepted = submission_service::submit(state.bus.as_ref(), &state.settings, &body).await?;

    Ok((StatusCode::CREATED, Json(accepted)))
}

/// GET /api/v1/pipelines/{pipeline_id}
/// Get the run status of a pipeline
pub async fn get_pipeline_status(
    State(state): State<AppState>,
    Path(pipeline_id): Path<String>,
) -> ApiResult<Json<PipelineStatusRecord>> {
    tracing::debug!(pipeline_id = %pipeline_id, "Getting pipeline status");

    let record = status_service::get_status(state.engine.as_ref(), &pipeline_id).await?;

    Ok(Json(record))
}
