//! Task domain model.
//!
//! # Responsibility
//! - Define the task shape shared by the active transition, archived
//!   snapshots and templates.
//! - Own the creation contract (trim + silent blank rejection).
//!
//! # Invariants
//! - `id` is assigned at creation and never changes.
//! - A constructed task always has a non-blank, trimmed title.
//! - `completed` and `is_trap` default to `false` when absent in a stored
//!   document.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one task inside a transition.
pub type TaskId = Uuid;

/// One entry of a transition's task list.
///
/// Serialized field names follow the app's document schema, so stored
/// task documents read back without a mapping layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable task id, unique within the owning transition.
    pub id: TaskId,
    /// Display title, non-blank and trimmed at creation time.
    pub title: String,
    /// Whether the user checked this task off.
    #[serde(default)]
    pub completed: bool,
    /// Marks a distraction to avoid instead of a goal to complete.
    #[serde(default)]
    pub is_trap: bool,
}

impl Task {
    /// Creates a task from raw user input.
    ///
    /// Returns `None` when `title` is empty after trimming surrounding
    /// whitespace. Blank input is the caller's mistake and is absorbed
    /// silently per the app contract; this layer never raises for it.
    pub fn new(title: &str, is_trap: bool) -> Option<Self> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            title: trimmed.to_string(),
            completed: false,
            is_trap,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Task;

    #[test]
    fn new_trims_title_and_sets_defaults() {
        let task = Task::new("  write report  ", false).expect("non-blank title");
        assert!(!task.id.is_nil());
        assert_eq!(task.title, "write report");
        assert!(!task.completed);
        assert!(!task.is_trap);
    }

    #[test]
    fn new_keeps_trap_flag() {
        let task = Task::new("scroll feed", true).expect("non-blank title");
        assert!(task.is_trap);
    }

    #[test]
    fn new_rejects_blank_titles_silently() {
        assert!(Task::new("", false).is_none());
        assert!(Task::new("   ", true).is_none());
        assert!(Task::new("\t\n", false).is_none());
    }

    #[test]
    fn fresh_tasks_get_distinct_ids() {
        let first = Task::new("a", false).unwrap();
        let second = Task::new("a", false).unwrap();
        assert_ne!(first.id, second.id);
    }
}
