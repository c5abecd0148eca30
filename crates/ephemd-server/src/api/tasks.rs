//! Demo task CRUD endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use ephemd_core::error::EphemdError;
use ephemd_core::task::{Task, TaskOutcome};

use crate::api::ApiError;
use crate::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub task_id: String,
    pub data: Value,
    #[serde(default = "default_priority")]
    pub priority: i64,
}

fn default_priority() -> i64 {
    1
}

/// Per-task response envelope.
///
/// `status` carries the response vocabulary: `accepted` on create
/// acknowledgements, the stored `pending`/`completed` on reads. `result`
/// is serialized even while null so reads of an unfinished record show it
/// explicitly.
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub task_id: String,
    pub status: &'static str,
    pub message: &'static str,
    pub result: Option<TaskOutcome>,
}

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Create (or silently overwrite) a task and schedule its processing step.
///
/// The acknowledgement reports the literal `accepted` even though the
/// stored record starts out `pending` — two deliberately distinct
/// vocabularies, preserved from the observed behavior of the service.
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> Json<TaskResponse> {
    tracing::info!(task_id = %req.task_id, "creating task");
    state.store().create(req.task_id.clone(), req.data, req.priority);

    Json(TaskResponse {
        task_id: req.task_id,
        status: "accepted",
        message: "Task created successfully",
        result: None,
    })
}

/// Current stored status and result of one task.
pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = state
        .store()
        .get(&task_id)
        .ok_or_else(|| EphemdError::NotFound(task_id.clone()))?;

    Ok(Json(TaskResponse {
        task_id,
        status: task.status.as_str(),
        message: "Task retrieved successfully",
        result: task.result,
    }))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.store().delete(&task_id) {
        return Err(EphemdError::NotFound(task_id).into());
    }

    tracing::info!(%task_id, "task deleted");
    Ok(Json(MessageResponse {
        message: "Task deleted successfully",
    }))
}

/// Snapshot of every stored record plus the total count.
pub async fn list_tasks(State(state): State<AppState>) -> Json<TaskListResponse> {
    let tasks = state.store().list();
    let count = tasks.len();
    Json(TaskListResponse { tasks, count })
}
