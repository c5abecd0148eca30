//! In-memory task store with a simulated processing step.
//!
//! The store is the only shared mutable resource in the service. It is an
//! explicitly owned object held in `AppState` behind `Arc` so it can be
//! unit-tested in isolation and swapped for a persistent backend later.
//! Each operation is a single `DashMap` call, so the read-then-write on a
//! record happens under that record's shard guard.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use serde_json::Value;

use ephemd_core::task::{epoch_seconds, Task};

pub struct TaskStore {
    tasks: DashMap<String, Task>,
    processing_delay: Duration,
}

impl TaskStore {
    pub fn new(processing_delay: Duration) -> Self {
        Self {
            tasks: DashMap::new(),
            processing_delay,
        }
    }

    /// Insert a pending record and schedule its completion step.
    ///
    /// A duplicate id silently overwrites the earlier record (observed
    /// upstream behavior, kept as-is). The earlier creation's scheduled step
    /// may then complete the replacement early; the refresh semantics of
    /// `mark_completed` tolerate that.
    pub fn create(self: &Arc<Self>, task_id: String, data: Value, priority: i64) {
        let task = Task::pending(task_id.clone(), data, priority);
        self.tasks.insert(task_id.clone(), task);

        let store = Arc::clone(self);
        tokio::spawn(async move {
            tracing::info!(%task_id, "processing task");
            tokio::time::sleep(store.processing_delay).await;
            store.complete(&task_id);
        });
    }

    /// Snapshot of one record.
    pub fn get(&self, task_id: &str) -> Option<Task> {
        self.tasks.get(task_id).map(|r| r.value().clone())
    }

    /// Snapshot of every record. Copies, not live references; every present
    /// record appears exactly once, in no guaranteed order.
    pub fn list(&self) -> Vec<Task> {
        self.tasks.iter().map(|r| r.value().clone()).collect()
    }

    /// Remove a record. Returns `false` when the id is absent.
    ///
    /// Does not cancel the scheduled completion step; that step re-checks
    /// existence and no-ops on a deleted id.
    pub fn delete(&self, task_id: &str) -> bool {
        self.tasks.remove(task_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    // Completion step. Runs exactly once per creation, after the fixed
    // delay. An id deleted in the interim stays deleted: `get_mut` observes
    // absence and nothing is inserted back.
    fn complete(&self, task_id: &str) {
        if let Some(mut task) = self.tasks.get_mut(task_id) {
            task.mark_completed(epoch_seconds());
            tracing::info!(%task_id, "task completed");
        }
    }
}
