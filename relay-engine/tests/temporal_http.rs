//! Temporal adapter against an in-process HTTP stand-in for the frontend

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use relay_core::domain::status::PipelineStatus;
use relay_engine::{EngineError, StartWorkflow, TemporalEngine, WorkflowEngine};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Minimal Temporal frontend: remembers started runs, rejects duplicates
#[derive(Clone, Default)]
struct Frontend {
    runs: Arc<Mutex<HashMap<String, Value>>>,
    seen: Arc<Mutex<Vec<(String, String)>>>,
}

impl Frontend {
    fn seen(&self) -> Vec<(String, String)> {
        self.seen.lock().unwrap().clone()
    }

    fn body_of(&self, workflow_id: &str) -> Option<Value> {
        self.runs.lock().unwrap().get(workflow_id).cloned()
    }
}

async fn start_workflow(
    State(frontend): State<Frontend>,
    Path((namespace, workflow_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    frontend
        .seen
        .lock()
        .unwrap()
        .push((namespace, workflow_id.clone()));

    match workflow_id.as_str() {
        "overloaded" => {
            return (StatusCode::SERVICE_UNAVAILABLE, "frontend overloaded").into_response();
        }
        "invalid" => return (StatusCode::BAD_REQUEST, "unknown workflow type").into_response(),
        _ => {}
    }

    let mut runs = frontend.runs.lock().unwrap();
    if runs.contains_key(&workflow_id) {
        return (
            StatusCode::CONFLICT,
            Json(json!({"message": "Workflow execution is already running"})),
        )
            .into_response();
    }
    runs.insert(workflow_id.clone(), body);

    Json(json!({"runId": format!("exec-{workflow_id}"), "started": true})).into_response()
}

async fn describe_workflow(
    State(frontend): State<Frontend>,
    Path((namespace, workflow_id)): Path<(String, String)>,
) -> Response {
    frontend
        .seen
        .lock()
        .unwrap()
        .push((namespace, workflow_id.clone()));

    match workflow_id.as_str() {
        "gateway" => return (StatusCode::BAD_GATEWAY, "upstream down").into_response(),
        "empty" => return Json(json!({})).into_response(),
        "stalled" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            return Json(json!({})).into_response();
        }
        _ => {}
    }

    let known = frontend.runs.lock().unwrap().contains_key(&workflow_id);
    if !known {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "workflow not found"})),
        )
            .into_response();
    }

    Json(json!({
        "workflowExecutionInfo": {
            "execution": {"workflowId": workflow_id, "runId": format!("exec-{workflow_id}")},
            "type": {"name": "PipelineWorkflow"},
            "status": "WORKFLOW_EXECUTION_STATUS_RUNNING",
            "startTime": "2026-01-01T10:00:00Z"
        }
    }))
    .into_response()
}

async fn serve() -> (String, Frontend) {
    let frontend = Frontend::default();
    let app = Router::new()
        .route(
            "/api/v1/namespaces/{namespace}/workflows/{workflow_id}",
            get(describe_workflow).post(start_workflow),
        )
        .route("/api/v1/system-info", get(|| async { Json(json!({})) }))
        .with_state(frontend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), frontend)
}

fn request(run_id: &str) -> StartWorkflow {
    StartWorkflow {
        run_id: run_id.to_string(),
        task_queue: "pipeline-tasks".to_string(),
        workflow_type: "PipelineWorkflow".to_string(),
        input: json!({"pipeline_id": run_id, "steps": [{"method": "reddit"}]}),
    }
}

#[tokio::test]
async fn test_start_returns_execution_id() {
    let (url, frontend) = serve().await;
    let engine = TemporalEngine::new(url, "default");

    let run = engine.start(request("p1")).await.unwrap();

    assert_eq!(run.run_id, "p1");
    assert_eq!(run.execution_id, "exec-p1");

    let body = frontend.body_of("p1").unwrap();
    assert_eq!(body["workflowId"], "p1");
    assert_eq!(body["taskQueue"]["name"], "pipeline-tasks");
    assert_eq!(body["workflowType"]["name"], "PipelineWorkflow");
    assert_eq!(body["input"][0]["steps"][0]["method"], "reddit");
}

#[tokio::test]
async fn test_duplicate_start_is_already_started() {
    let (url, _frontend) = serve().await;
    let engine = TemporalEngine::new(url, "default");

    engine.start(request("p1")).await.unwrap();
    let err = engine.start(request("p1")).await.unwrap_err();

    assert!(matches!(err, EngineError::AlreadyStarted(ref id) if id == "p1"));
    assert!(!err.is_unavailable());
}

#[tokio::test]
async fn test_start_on_overloaded_engine_is_unavailable() {
    let (url, _frontend) = serve().await;
    let engine = TemporalEngine::new(url, "default");

    let err = engine.start(request("overloaded")).await.unwrap_err();

    assert!(matches!(err, EngineError::Unavailable(ref msg) if msg == "frontend overloaded"));
}

#[tokio::test]
async fn test_start_rejected_request() {
    let (url, _frontend) = serve().await;
    let engine = TemporalEngine::new(url, "default");

    let err = engine.start(request("invalid")).await.unwrap_err();

    assert!(matches!(err, EngineError::Rejected { status: 400, .. }));
}

#[tokio::test]
async fn test_describe_running_run() {
    let (url, _frontend) = serve().await;
    let engine = TemporalEngine::new(url, "default");
    engine.start(request("p1")).await.unwrap();

    let execution = engine.describe("p1").await.unwrap();

    assert_eq!(execution.run_id, "p1");
    assert_eq!(execution.execution_id.as_deref(), Some("exec-p1"));
    assert_eq!(execution.status, PipelineStatus::Running);
    assert!(execution.started_at.is_some());
    assert!(execution.closed_at.is_none());
}

#[tokio::test]
async fn test_describe_unknown_run_is_not_found() {
    let (url, _frontend) = serve().await;
    let engine = TemporalEngine::new(url, "default");

    let err = engine.describe("missing").await.unwrap_err();

    assert!(matches!(err, EngineError::NotFound(ref id) if id == "missing"));
}

#[tokio::test]
async fn test_describe_bad_gateway_is_unavailable() {
    let (url, _frontend) = serve().await;
    let engine = TemporalEngine::new(url, "default");

    let err = engine.describe("gateway").await.unwrap_err();

    assert!(matches!(err, EngineError::Unavailable(_)));
}

#[tokio::test]
async fn test_describe_without_execution_info() {
    let (url, _frontend) = serve().await;
    let engine = TemporalEngine::new(url, "default");

    let err = engine.describe("empty").await.unwrap_err();

    assert!(matches!(err, EngineError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_run_ids_reach_engine_unchanged() {
    let (url, frontend) = serve().await;
    let engine = TemporalEngine::new(url, "team/prod");
    let ids = ["p1?force=true", "p1#frag", "team/p1", "50%"];

    for id in ids {
        let run = engine.start(request(id)).await.unwrap();
        assert_eq!(run.execution_id, format!("exec-{id}"));

        let execution = engine.describe(id).await.unwrap();
        assert_eq!(execution.execution_id, Some(format!("exec-{id}")));
    }

    let seen = frontend.seen();
    assert_eq!(seen.len(), ids.len() * 2);
    for (i, id) in ids.iter().enumerate() {
        assert_eq!(seen[i * 2], ("team/prod".to_string(), id.to_string()));
        assert_eq!(frontend.body_of(id).unwrap()["workflowId"], *id);
    }

    // Only the full ids were started; their prefixes name no run.
    let err = engine.describe("p1").await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[tokio::test]
async fn test_stalled_engine_times_out() {
    let (url, _frontend) = serve().await;
    let engine = TemporalEngine::with_timeout(url, "default", Duration::from_millis(200));

    let err = engine.describe("stalled").await.unwrap_err();

    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_health_check_against_live_frontend() {
    let (url, _frontend) = serve().await;
    let engine = TemporalEngine::new(format!("{url}/"), "default");

    engine.health_check().await.unwrap();
}
