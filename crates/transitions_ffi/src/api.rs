//! FFI use-case API for the app-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to the UI shell via FRB.
//! - Keep error semantics simple: response envelopes, never exceptions.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every DB-backed call opens, migrates and closes its own connection;
//!   durable state is the only state shared between calls.

use std::path::PathBuf;
use std::sync::OnceLock;
use transitions_core::db::open_db;
use transitions_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    summarize, ArchiveWindowQuery, ArchivedTransition, QuickTask, QuickTaskService,
    SqliteQuickTaskRepository, SqliteSettingsRepository, SqliteTemplateRepository,
    SqliteTransitionRepository, SettingsService, Task, Template, TemplateService, Transition,
    TransitionRepository, TransitionService,
};
use uuid::Uuid;

const DB_FILE_NAME: &str = "transitions.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task projection for the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub is_trap: bool,
}

/// Active-transition projection for the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionView {
    pub id: String,
    pub number: u32,
    /// Resolved display title (`"Transition {number}"` fallback applied).
    pub title: String,
    pub tasks: Vec<TaskView>,
    pub start_time: i64,
}

/// Archived-session projection for the stats/calendar views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedView {
    pub id: String,
    pub number: u32,
    pub title: String,
    pub tasks: Vec<TaskView>,
    pub start_time: i64,
    pub completed_at: i64,
    pub elapsed_seconds: u32,
}

/// Template projection for the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateView {
    pub id: String,
    pub title: String,
    pub tasks: Vec<TaskView>,
    pub created_at: i64,
}

/// Quick-add projection for the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickTaskView {
    pub id: String,
    pub title: String,
    pub is_trap: bool,
    pub created_at: i64,
}

/// Response envelope for operations returning the active transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResponse {
    pub ok: bool,
    pub transition: Option<TransitionView>,
    pub message: String,
}

impl TransitionResponse {
    fn success(message: impl Into<String>, view: TransitionView) -> Self {
        Self {
            ok: true,
            transition: Some(view),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            transition: None,
            message: message.into(),
        }
    }
}

/// Response envelope for template capture/lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateResponse {
    pub ok: bool,
    pub template: Option<TemplateView>,
    pub message: String,
}

/// Response envelope for template listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateListResponse {
    pub ok: bool,
    pub items: Vec<TemplateView>,
    pub message: String,
}

/// Response envelope for quick-add operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickTaskResponse {
    pub ok: bool,
    pub quick_task: Option<QuickTaskView>,
    pub message: String,
}

/// Response envelope for quick-add listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickTaskListResponse {
    pub ok: bool,
    pub items: Vec<QuickTaskView>,
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
}

/// Response envelope for the archived-session window query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedListResponse {
    pub ok: bool,
    pub items: Vec<ArchivedView>,
    pub message: String,
}

/// Response envelope for window statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsResponse {
    pub ok: bool,
    pub message: String,
    pub total_transitions: u32,
    pub total_seconds: u64,
    pub tasks_completed: u32,
    pub traps_avoided: u32,
}

/// Response envelope for settings values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsResponse {
    pub ok: bool,
    pub value: String,
    pub message: String,
}

/// Returns the active transition, seeding `Transition 1` on first run.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn transition_current() -> TransitionResponse {
    run_transition_op("transition_current", "", |_service| Ok(()))
}

/// Adds one task to the active transition.
///
/// Blank titles are absorbed silently: the call succeeds and the task
/// list is returned unchanged, matching the in-app contract.
#[flutter_rust_bridge::frb(sync)]
pub fn transition_add_task(title: String, is_trap: bool) -> TransitionResponse {
    run_transition_op("transition_add_task", "Task added.", move |service| {
        service.add_task(title.as_str(), is_trap).map(|_| ())
    })
}

/// Toggles completion on one task of the active transition.
#[flutter_rust_bridge::frb(sync)]
pub fn transition_toggle_task(task_id: String) -> TransitionResponse {
    let Ok(id) = Uuid::parse_str(task_id.as_str()) else {
        return TransitionResponse::failure(format!("invalid task id `{task_id}`"));
    };
    run_transition_op("transition_toggle_task", "Task toggled.", move |service| {
        service.toggle_completed(id).map(|_| ())
    })
}

/// Toggles the trap flag on one task and re-sorts the list.
#[flutter_rust_bridge::frb(sync)]
pub fn transition_toggle_trap(task_id: String) -> TransitionResponse {
    let Ok(id) = Uuid::parse_str(task_id.as_str()) else {
        return TransitionResponse::failure(format!("invalid task id `{task_id}`"));
    };
    run_transition_op("transition_toggle_trap", "Trap toggled.", move |service| {
        service.toggle_trap(id).map(|_| ())
    })
}

/// Renames one task. Blank input is accepted as-is (rename does not
/// re-validate titles; only creation does).
#[flutter_rust_bridge::frb(sync)]
pub fn transition_rename_task(task_id: String, new_title: String) -> TransitionResponse {
    let Ok(id) = Uuid::parse_str(task_id.as_str()) else {
        return TransitionResponse::failure(format!("invalid task id `{task_id}`"));
    };
    run_transition_op("transition_rename_task", "Task renamed.", move |service| {
        service.rename_task(id, new_title.as_str()).map(|_| ())
    })
}

/// Deletes one task from the active transition.
#[flutter_rust_bridge::frb(sync)]
pub fn transition_delete_task(task_id: String) -> TransitionResponse {
    let Ok(id) = Uuid::parse_str(task_id.as_str()) else {
        return TransitionResponse::failure(format!("invalid task id `{task_id}`"));
    };
    run_transition_op("transition_delete_task", "Task deleted.", move |service| {
        service.delete_task(id).map(|_| ())
    })
}

/// Renames the active transition; blank falls back to the derived
/// `"Transition {number}"` label.
#[flutter_rust_bridge::frb(sync)]
pub fn transition_rename(new_title: String) -> TransitionResponse {
    run_transition_op("transition_rename", "Transition renamed.", move |service| {
        service.rename_transition(new_title.as_str()).map(|_| ())
    })
}

/// Archives the active transition with the supplied elapsed seconds and
/// returns the fresh successor session.
///
/// On store failure the pre-archive session is still the active one and
/// the call reports the failure, so the user can retry.
#[flutter_rust_bridge::frb(sync)]
pub fn transition_archive(elapsed_seconds: u32) -> TransitionResponse {
    run_transition_op("transition_archive", "Transition archived.", move |service| {
        service.archive(elapsed_seconds).map(|_| ())
    })
}

/// Captures the active transition's task list as a new template.
#[flutter_rust_bridge::frb(sync)]
pub fn template_capture() -> TemplateResponse {
    match capture_template_inner() {
        Ok(template) => TemplateResponse {
            ok: true,
            template: Some(to_template_view(&template)),
            message: "Template saved.".to_string(),
        },
        Err(message) => TemplateResponse {
            ok: false,
            template: None,
            message: format!("template_capture failed: {message}"),
        },
    }
}

/// Lists stored templates, newest capture first.
#[flutter_rust_bridge::frb(sync)]
pub fn template_list() -> TemplateListResponse {
    match list_templates_inner() {
        Ok(templates) => TemplateListResponse {
            ok: true,
            items: templates.iter().map(to_template_view).collect(),
            message: String::new(),
        },
        Err(message) => TemplateListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("template_list failed: {message}"),
        },
    }
}

/// Replays a stored template into the active transition: the session
/// title is overwritten and every template task is re-added with a
/// fresh id, uncompleted.
#[flutter_rust_bridge::frb(sync)]
pub fn template_replay(template_id: String) -> TransitionResponse {
    let Ok(id) = Uuid::parse_str(template_id.as_str()) else {
        return TransitionResponse::failure(format!("invalid template id `{template_id}`"));
    };

    let template = match get_template_inner(id) {
        Ok(Some(template)) => template,
        Ok(None) => {
            return TransitionResponse::failure(format!("template not found: {template_id}"))
        }
        Err(message) => {
            return TransitionResponse::failure(format!("template_replay failed: {message}"))
        }
    };

    run_transition_op("template_replay", "Template replayed.", move |service| {
        service.replay_template(&template).map(|_| ())
    })
}

/// Adds one quick-add entry; blank titles succeed with no record.
#[flutter_rust_bridge::frb(sync)]
pub fn quick_task_add(title: String) -> QuickTaskResponse {
    match with_quick_service(|service| service.add(title.as_str())) {
        Ok(Some(quick)) => QuickTaskResponse {
            ok: true,
            quick_task: Some(to_quick_task_view(&quick)),
            message: "Quick task added.".to_string(),
        },
        Ok(None) => QuickTaskResponse {
            ok: true,
            quick_task: None,
            message: "Blank title ignored.".to_string(),
        },
        Err(message) => QuickTaskResponse {
            ok: false,
            quick_task: None,
            message: format!("quick_task_add failed: {message}"),
        },
    }
}

/// Renames one quick-add entry (no validation; missing ids are no-ops).
#[flutter_rust_bridge::frb(sync)]
pub fn quick_task_rename(quick_task_id: String, new_title: String) -> ActionResponse {
    let Ok(id) = Uuid::parse_str(quick_task_id.as_str()) else {
        return ActionResponse {
            ok: false,
            message: format!("invalid quick task id `{quick_task_id}`"),
        };
    };
    match with_quick_service(|service| service.rename(id, new_title.as_str())) {
        Ok(()) => ActionResponse {
            ok: true,
            message: "Quick task renamed.".to_string(),
        },
        Err(message) => ActionResponse {
            ok: false,
            message: format!("quick_task_rename failed: {message}"),
        },
    }
}

/// Flips the trap flag on one quick-add entry.
#[flutter_rust_bridge::frb(sync)]
pub fn quick_task_toggle_trap(quick_task_id: String) -> QuickTaskResponse {
    let Ok(id) = Uuid::parse_str(quick_task_id.as_str()) else {
        return QuickTaskResponse {
            ok: false,
            quick_task: None,
            message: format!("invalid quick task id `{quick_task_id}`"),
        };
    };
    match with_quick_service(|service| service.toggle_trap(id)) {
        Ok(Some(quick)) => QuickTaskResponse {
            ok: true,
            quick_task: Some(to_quick_task_view(&quick)),
            message: "Trap toggled.".to_string(),
        },
        Ok(None) => QuickTaskResponse {
            ok: true,
            quick_task: None,
            message: "Quick task not found.".to_string(),
        },
        Err(message) => QuickTaskResponse {
            ok: false,
            quick_task: None,
            message: format!("quick_task_toggle_trap failed: {message}"),
        },
    }
}

/// Deletes one quick-add entry (missing ids are no-ops).
#[flutter_rust_bridge::frb(sync)]
pub fn quick_task_delete(quick_task_id: String) -> ActionResponse {
    let Ok(id) = Uuid::parse_str(quick_task_id.as_str()) else {
        return ActionResponse {
            ok: false,
            message: format!("invalid quick task id `{quick_task_id}`"),
        };
    };
    match with_quick_service(|service| service.delete(id)) {
        Ok(()) => ActionResponse {
            ok: true,
            message: "Quick task deleted.".to_string(),
        },
        Err(message) => ActionResponse {
            ok: false,
            message: format!("quick_task_delete failed: {message}"),
        },
    }
}

/// Lists the quick-add entries in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn quick_task_list() -> QuickTaskListResponse {
    match with_quick_service(|service| service.list()) {
        Ok(items) => QuickTaskListResponse {
            ok: true,
            items: items.iter().map(to_quick_task_view).collect(),
            message: String::new(),
        },
        Err(message) => QuickTaskListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("quick_task_list failed: {message}"),
        },
    }
}

/// Copies one quick-add entry into the active transition as a fresh
/// task (new id, uncompleted, same title and trap flag).
#[flutter_rust_bridge::frb(sync)]
pub fn quick_task_send_to_transition(quick_task_id: String) -> TransitionResponse {
    let Ok(id) = Uuid::parse_str(quick_task_id.as_str()) else {
        return TransitionResponse::failure(format!("invalid quick task id `{quick_task_id}`"));
    };

    let found = with_quick_service(|service| {
        let listed = service.list()?;
        Ok(listed.into_iter().find(|quick| quick.id == id))
    });
    let quick = match found {
        Ok(Some(quick)) => quick,
        Ok(None) => {
            return TransitionResponse::failure(format!("quick task not found: {quick_task_id}"))
        }
        Err(message) => {
            return TransitionResponse::failure(format!(
                "quick_task_send_to_transition failed: {message}"
            ))
        }
    };

    run_transition_op(
        "quick_task_send_to_transition",
        "Task added.",
        move |service| {
            service
                .add_task(quick.title.as_str(), quick.is_trap)
                .map(|_| ())
        },
    )
}

/// Lists archived sessions inside an optional `completed_at` window,
/// ascending by archive time (the calendar data contract).
#[flutter_rust_bridge::frb(sync)]
pub fn archived_window(start_ms: Option<i64>, end_ms: Option<i64>) -> ArchivedListResponse {
    match archived_window_inner(start_ms, end_ms) {
        Ok(archives) => ArchivedListResponse {
            ok: true,
            items: archives.iter().map(to_archived_view).collect(),
            message: String::new(),
        },
        Err(message) => ArchivedListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("archived_window failed: {message}"),
        },
    }
}

/// Aggregates totals over archived sessions inside an optional window.
#[flutter_rust_bridge::frb(sync)]
pub fn stats_window(start_ms: Option<i64>, end_ms: Option<i64>) -> StatsResponse {
    match archived_window_inner(start_ms, end_ms) {
        Ok(archives) => {
            let summary = summarize(&archives);
            StatsResponse {
                ok: true,
                message: String::new(),
                total_transitions: summary.total_transitions,
                total_seconds: summary.total_seconds,
                tasks_completed: summary.tasks_completed,
                traps_avoided: summary.traps_avoided,
            }
        }
        Err(message) => StatsResponse {
            ok: false,
            message: format!("stats_window failed: {message}"),
            total_transitions: 0,
            total_seconds: 0,
            tasks_completed: 0,
            traps_avoided: 0,
        },
    }
}

/// Returns the daily reset time (`HH:MM`), defaulting to midnight.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_reset_time() -> SettingsResponse {
    match with_settings_service(|service| service.reset_time().map_err(|err| err.to_string())) {
        Ok(value) => SettingsResponse {
            ok: true,
            value,
            message: String::new(),
        },
        Err(message) => SettingsResponse {
            ok: false,
            value: String::new(),
            message: format!("settings_reset_time failed: {message}"),
        },
    }
}

/// Validates and stores a new daily reset time.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_update_reset_time(value: String) -> SettingsResponse {
    match with_settings_service(|service| {
        service
            .update_reset_time(value.as_str())
            .map_err(|err| err.to_string())
    }) {
        Ok(stored) => SettingsResponse {
            ok: true,
            value: stored,
            message: "Reset time saved.".to_string(),
        },
        Err(message) => SettingsResponse {
            ok: false,
            value: String::new(),
            message: format!("settings_update_reset_time failed: {message}"),
        },
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("TRANSITIONS_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn run_transition_op(
    operation: &str,
    success_message: &str,
    f: impl FnOnce(
        &mut TransitionService<SqliteTransitionRepository<'_>>,
    ) -> transitions_core::RepoResult<()>,
) -> TransitionResponse {
    let db_path = resolve_db_path();
    let mut conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => return TransitionResponse::failure(format!("{operation} failed: {err}")),
    };
    let repo = match SqliteTransitionRepository::try_new(&mut conn) {
        Ok(repo) => repo,
        Err(err) => return TransitionResponse::failure(format!("{operation} failed: {err}")),
    };
    let mut service = match TransitionService::initialize(repo) {
        Ok(service) => service,
        Err(err) => return TransitionResponse::failure(format!("{operation} failed: {err}")),
    };

    match f(&mut service) {
        Ok(()) => TransitionResponse::success(success_message, to_transition_view(service.current())),
        Err(err) => TransitionResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn capture_template_inner() -> Result<Template, String> {
    let db_path = resolve_db_path();
    let mut conn = open_db(&db_path).map_err(|err| err.to_string())?;

    let snapshot = {
        let repo = SqliteTransitionRepository::try_new(&mut conn).map_err(|err| err.to_string())?;
        let service = TransitionService::initialize(repo).map_err(|err| err.to_string())?;
        service.current().clone()
    };

    let repo = SqliteTemplateRepository::try_new(&conn).map_err(|err| err.to_string())?;
    TemplateService::new(repo)
        .capture(&snapshot)
        .map_err(|err| err.to_string())
}

fn list_templates_inner() -> Result<Vec<Template>, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| err.to_string())?;
    let repo = SqliteTemplateRepository::try_new(&conn).map_err(|err| err.to_string())?;
    TemplateService::new(repo).list().map_err(|err| err.to_string())
}

fn get_template_inner(id: Uuid) -> Result<Option<Template>, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| err.to_string())?;
    let repo = SqliteTemplateRepository::try_new(&conn).map_err(|err| err.to_string())?;
    TemplateService::new(repo).get(id).map_err(|err| err.to_string())
}

fn with_quick_service<T>(
    f: impl FnOnce(
        &QuickTaskService<SqliteQuickTaskRepository<'_>>,
    ) -> transitions_core::RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| err.to_string())?;
    let repo = SqliteQuickTaskRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let service = QuickTaskService::new(repo);
    f(&service).map_err(|err| err.to_string())
}

fn with_settings_service<T>(
    f: impl FnOnce(&SettingsService<SqliteSettingsRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| err.to_string())?;
    let repo = SqliteSettingsRepository::try_new(&conn).map_err(|err| err.to_string())?;
    f(&SettingsService::new(repo))
}

fn archived_window_inner(
    start_ms: Option<i64>,
    end_ms: Option<i64>,
) -> Result<Vec<ArchivedTransition>, String> {
    let db_path = resolve_db_path();
    let mut conn = open_db(&db_path).map_err(|err| err.to_string())?;
    let repo = SqliteTransitionRepository::try_new(&mut conn).map_err(|err| err.to_string())?;

    repo.list_archived(&ArchiveWindowQuery {
        start_ms,
        end_ms,
        limit: None,
    })
    .map_err(|err| err.to_string())
}

fn to_task_view(task: &Task) -> TaskView {
    TaskView {
        id: task.id.to_string(),
        title: task.title.clone(),
        completed: task.completed,
        is_trap: task.is_trap,
    }
}

fn to_transition_view(transition: &Transition) -> TransitionView {
    TransitionView {
        id: transition.id.to_string(),
        number: transition.number,
        title: transition.display_title(),
        tasks: transition.tasks.iter().map(to_task_view).collect(),
        start_time: transition.start_time,
    }
}

fn to_archived_view(archived: &ArchivedTransition) -> ArchivedView {
    ArchivedView {
        id: archived.id.to_string(),
        number: archived.number,
        title: archived.title.clone(),
        tasks: archived.tasks.iter().map(to_task_view).collect(),
        start_time: archived.start_time,
        completed_at: archived.completed_at,
        elapsed_seconds: archived.elapsed_seconds,
    }
}

fn to_template_view(template: &Template) -> TemplateView {
    TemplateView {
        id: template.id.to_string(),
        title: template.title.clone(),
        tasks: template.tasks.iter().map(to_task_view).collect(),
        created_at: template.created_at,
    }
}

fn to_quick_task_view(quick: &QuickTask) -> QuickTaskView {
    QuickTaskView {
        id: quick.id.to_string(),
        title: quick.title.clone(),
        is_trap: quick.is_trap,
        created_at: quick.created_at,
    }
}
