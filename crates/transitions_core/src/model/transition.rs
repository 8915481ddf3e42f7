//! Transition aggregate and archived snapshot models.
//!
//! # Responsibility
//! - Define the active work-session aggregate (ordered task list plus
//!   session metadata).
//! - Build immutable archived snapshots at session end.
//!
//! # Invariants
//! - `number` starts at 1 and grows by exactly 1 per archive.
//! - `start_time` is set at creation and never mutated.
//! - Task ids are unique within `tasks`.
//! - An archived snapshot deep-copies the task list; later mutation of a
//!   successor transition cannot affect history.

use crate::model::task::{Task, TaskId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of the active transition document.
pub type TransitionId = Uuid;

/// Stable identifier of one archived transition record.
pub type ArchiveId = Uuid;

/// The single active work session.
///
/// Serialized field names follow the app's document schema
/// (`startTime`, camelCase task fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    /// Stable id of this session document.
    pub id: TransitionId,
    /// Monotonic session counter, starting at 1.
    pub number: u32,
    /// Optional user-assigned label. Display falls back to
    /// `"Transition {number}"` when absent or blank.
    #[serde(default)]
    pub title: Option<String>,
    /// Ordered task list. Order is the trap-ordering policy's output,
    /// not insertion order once any trap toggle has occurred.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Session start in epoch milliseconds.
    pub start_time: i64,
}

impl Transition {
    /// Creates the very first session of a fresh store.
    pub fn first(now_ms: i64) -> Self {
        Self::fresh(1, now_ms)
    }

    /// Creates the successor session after an archive: next number,
    /// defaulted title, empty task list. Tasks never carry over.
    pub fn next(&self, now_ms: i64) -> Self {
        Self::fresh(self.number + 1, now_ms)
    }

    fn fresh(number: u32, now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            title: Some(format!("Transition {number}")),
            tasks: Vec::new(),
            start_time: now_ms,
        }
    }

    /// Returns the label shown for this session.
    pub fn display_title(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("Transition {}", self.number),
        }
    }

    /// Finds one task by id.
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    /// Finds one task by id for mutation.
    pub fn task_mut(&mut self, task_id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }

    /// Builds the write-once archived record for this session.
    pub fn archived_snapshot(&self, completed_at_ms: i64, elapsed_seconds: u32) -> ArchivedTransition {
        ArchivedTransition {
            id: Uuid::new_v4(),
            number: self.number,
            title: self.display_title(),
            tasks: self.tasks.clone(),
            start_time: self.start_time,
            completed_at: completed_at_ms,
            elapsed_seconds,
        }
    }
}

/// Immutable historical record of one finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedTransition {
    /// Stable id of this archive record (independent of the session id).
    pub id: ArchiveId,
    /// Session counter carried over from the archived transition.
    pub number: u32,
    /// Resolved display title at archive time, never blank.
    pub title: String,
    /// Full task snapshot in display order.
    pub tasks: Vec<Task>,
    /// Session start in epoch milliseconds.
    pub start_time: i64,
    /// Archive timestamp in epoch milliseconds.
    pub completed_at: i64,
    /// Elapsed session time in whole seconds. Serialized as
    /// `elapsedTime` to match the stored document schema.
    #[serde(rename = "elapsedTime")]
    pub elapsed_seconds: u32,
}
