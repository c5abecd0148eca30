//! Task record and status vocabulary.
//!
//! A task is a demo unit of work tracked by caller-supplied id. The stored
//! status only ever holds `pending` or `completed`; the create
//! acknowledgement on the wire additionally reports the literal string
//! `accepted`, which is never a stored state. The two vocabularies are kept
//! distinct on purpose (see the create handler in the server crate).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch as a float (sub-second precision).
pub fn epoch_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64())
}

/// Stored lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }
}

/// Payload attached to a task once the processing step has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutcome {
    /// Completion timestamp (seconds since epoch).
    pub processed_at: f64,
    /// Fixed completion message.
    pub message: String,
}

/// One tracked unit of demo work.
///
/// `data` is an opaque caller-supplied payload; the store never interprets
/// or validates it. `priority` is stored but not acted upon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,
    pub status: TaskStatus,
    pub data: Value,
    pub priority: i64,
    /// Creation timestamp (seconds since epoch).
    pub created_at: f64,
    /// Set if and only if `status` is `completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskOutcome>,
}

impl Task {
    /// Fresh record as produced by a create: pending, no result.
    pub fn pending(task_id: String, data: Value, priority: i64) -> Self {
        Self {
            task_id,
            status: TaskStatus::Pending,
            data,
            priority,
            created_at: epoch_seconds(),
            result: None,
        }
    }

    /// Apply the completion step. Sets status and result together so the
    /// result-iff-completed invariant holds by construction. Calling this on
    /// an already-completed record refreshes the timestamp, which is
    /// harmless (at most one step is scheduled per creation).
    pub fn mark_completed(&mut self, processed_at: f64) {
        self.status = TaskStatus::Completed;
        self.result = Some(TaskOutcome {
            processed_at,
            message: "Task completed successfully".to_string(),
        });
    }
}
