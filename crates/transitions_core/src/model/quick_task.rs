//! Quick-add task model.
//!
//! Quick tasks live outside any transition: a persistent list of
//! frequently used entries the user pushes into the current session with
//! one tap. Same creation contract as transition tasks (trim, silent
//! blank rejection); sent copies always get fresh task ids.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one quick-add entry.
pub type QuickTaskId = Uuid;

/// One reusable quick-add entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickTask {
    /// Stable record id.
    pub id: QuickTaskId,
    /// Display title, non-blank and trimmed at creation time.
    pub title: String,
    /// Trap classification, toggled in place by the user.
    #[serde(default)]
    pub is_trap: bool,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

impl QuickTask {
    /// Creates a quick task from raw input; `None` for blank titles.
    pub fn new(title: &str, now_ms: i64) -> Option<Self> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            title: trimmed.to_string(),
            is_trap: false,
            created_at: now_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::QuickTask;

    #[test]
    fn new_trims_and_defaults_to_non_trap() {
        let quick = QuickTask::new(" check inbox ", 42).expect("non-blank");
        assert_eq!(quick.title, "check inbox");
        assert!(!quick.is_trap);
        assert_eq!(quick.created_at, 42);
    }

    #[test]
    fn new_rejects_blank_input() {
        assert!(QuickTask::new("   ", 0).is_none());
    }
}
