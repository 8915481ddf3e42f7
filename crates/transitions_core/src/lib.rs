//! transitions_core
//!
//! Core domain logic for the Transitions app: timed work sessions with
//! an ordered task list, archive-and-roll-over at session end, reusable
//! templates and the quick-add list. This crate is the single source of
//! truth for business invariants; rendering and navigation live in the
//! app layer above the FFI boundary.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::ordering::order_traps_last;
pub use model::quick_task::{QuickTask, QuickTaskId};
pub use model::task::{Task, TaskId};
pub use model::template::{Template, TemplateId};
pub use model::transition::{ArchiveId, ArchivedTransition, Transition, TransitionId};
pub use repo::quick_task_repo::{QuickTaskRepository, SqliteQuickTaskRepository};
pub use repo::settings_repo::{SettingsRepository, SqliteSettingsRepository};
pub use repo::template_repo::{SqliteTemplateRepository, TemplateRepository};
pub use repo::transition_repo::{
    ArchiveWindowQuery, SqliteTransitionRepository, TransitionRepository,
};
pub use repo::{RepoError, RepoResult};
pub use service::quick_task_service::QuickTaskService;
pub use service::settings_service::{SettingsService, SettingsServiceError};
pub use service::stats_service::{summarize, StatsService, StatsSummary};
pub use service::template_service::TemplateService;
pub use service::transition_service::TransitionService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
