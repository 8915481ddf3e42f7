//! Reusable task-list template model.
//!
//! # Responsibility
//! - Snapshot a transition's task list for later replay.
//!
//! # Invariants
//! - A template is captured once and never mutated afterwards.
//! - The snapshot keeps tasks exactly as they were, completion state
//!   included; replay is where completion resets.

use crate::model::task::Task;
use crate::model::transition::Transition;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one stored template.
pub type TemplateId = Uuid;

/// A captured task list that can seed future sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Stable template record id.
    pub id: TemplateId,
    /// Label, defaulted from the source transition's display title.
    pub title: String,
    /// Task snapshot in the source transition's display order.
    pub tasks: Vec<Task>,
    /// Capture timestamp in epoch milliseconds.
    pub created_at: i64,
}

impl Template {
    /// Captures the current state of `transition` as a new template.
    pub fn capture(transition: &Transition, now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: transition.display_title(),
            tasks: transition.tasks.clone(),
            created_at: now_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Template;
    use crate::model::task::Task;
    use crate::model::transition::Transition;

    #[test]
    fn capture_snapshots_tasks_as_they_are() {
        let mut transition = Transition::first(100);
        let mut done = Task::new("email", false).unwrap();
        done.completed = true;
        transition.tasks.push(done);
        transition.tasks.push(Task::new("scroll feed", true).unwrap());

        let template = Template::capture(&transition, 2_000);
        assert_eq!(template.title, "Transition 1");
        assert_eq!(template.created_at, 2_000);
        assert_eq!(template.tasks.len(), 2);
        // Completion state is captured as-is, not reset.
        assert!(template.tasks[0].completed);
        assert!(template.tasks[1].is_trap);
    }

    #[test]
    fn capture_uses_resolved_display_title() {
        let mut transition = Transition::first(100);
        transition.title = Some("  Review block ".to_string());
        let template = Template::capture(&transition, 0);
        assert_eq!(template.title, "Review block");
    }
}
