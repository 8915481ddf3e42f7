//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.
//!
//! # Invariants
//! - The active transition is owned by exactly one `TransitionService`
//!   instance; no ambient/global session state exists in core.

use std::time::{SystemTime, UNIX_EPOCH};

pub mod quick_task_service;
pub mod settings_service;
pub mod stats_service;
pub mod template_service;
pub mod transition_service;

/// Current wall-clock time in epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
}
