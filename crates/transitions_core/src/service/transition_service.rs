//! Transition lifecycle service.
//!
//! # Responsibility
//! - Own the single active transition aggregate for one session editor.
//! - Apply task operations (add/toggle/rename/delete) with the
//!   trap-ordering policy and write-through persistence.
//! - Perform the archive-and-roll-over at session end.
//!
//! # Invariants
//! - Blank-title task creation and unknown-id operations are absorbed as
//!   silent no-ops; they never write and never surface as errors.
//! - Ordinary mutations update local state first and persist after; a
//!   failed write is surfaced but the local update stands.
//! - `archive` is the one all-or-nothing operation: in-memory state only
//!   advances after both store writes committed.

use crate::model::ordering::order_traps_last;
use crate::model::task::{Task, TaskId};
use crate::model::template::Template;
use crate::model::transition::Transition;
use crate::repo::transition_repo::TransitionRepository;
use crate::repo::RepoResult;
use crate::service::now_epoch_ms;
use log::{error, info};

/// Session-scoped lifecycle manager for the active transition.
///
/// Constructed through [`TransitionService::initialize`], which loads or
/// seeds the active transition. All mutations go through this service so
/// the single-active-transition invariant stays enforceable.
pub struct TransitionService<R: TransitionRepository> {
    repo: R,
    current: Transition,
}

impl<R: TransitionRepository> TransitionService<R> {
    /// Loads the active transition from the store, seeding
    /// `Transition 1` on first run.
    ///
    /// Idempotent: when an active transition already exists it is
    /// returned untouched; no duplicate is ever created.
    pub fn initialize(repo: R) -> RepoResult<Self> {
        if let Some(current) = repo.get_active()? {
            return Ok(Self { repo, current });
        }

        let current = Transition::first(now_epoch_ms());
        repo.put_active(&current)?;
        info!(
            "event=transition_seed module=service status=ok number={}",
            current.number
        );
        Ok(Self { repo, current })
    }

    /// Returns the active transition.
    pub fn current(&self) -> &Transition {
        &self.current
    }

    /// Appends a task and re-applies the trap ordering.
    ///
    /// Blank titles (after trimming) are absorbed silently: no task is
    /// created and no write happens.
    pub fn add_task(&mut self, title: &str, is_trap: bool) -> RepoResult<&Transition> {
        let Some(task) = Task::new(title, is_trap) else {
            return Ok(&self.current);
        };

        self.current.tasks.push(task);
        order_traps_last(&mut self.current.tasks);
        self.persist_current("add_task")?;
        Ok(&self.current)
    }

    /// Flips `completed` on the matching task. Unknown ids are a silent
    /// no-op without a write. Ordering is never touched.
    pub fn toggle_completed(&mut self, task_id: TaskId) -> RepoResult<&Transition> {
        let Some(task) = self.current.task_mut(task_id) else {
            return Ok(&self.current);
        };

        task.completed = !task.completed;
        self.persist_current("toggle_completed")?;
        Ok(&self.current)
    }

    /// Flips `is_trap` on the matching task and re-applies the trap
    /// ordering. Unknown ids are a silent no-op without a write.
    pub fn toggle_trap(&mut self, task_id: TaskId) -> RepoResult<&Transition> {
        let Some(task) = self.current.task_mut(task_id) else {
            return Ok(&self.current);
        };

        task.is_trap = !task.is_trap;
        order_traps_last(&mut self.current.tasks);
        self.persist_current("toggle_trap")?;
        Ok(&self.current)
    }

    /// Replaces the title of the matching task.
    ///
    /// Accepts any string, blank included: only creation validates
    /// titles. The asymmetry is intentional app behavior, kept as-is.
    pub fn rename_task(&mut self, task_id: TaskId, new_title: &str) -> RepoResult<&Transition> {
        let Some(task) = self.current.task_mut(task_id) else {
            return Ok(&self.current);
        };

        task.title = new_title.to_string();
        self.persist_current("rename_task")?;
        Ok(&self.current)
    }

    /// Removes the matching task. Unknown ids are a silent no-op.
    pub fn delete_task(&mut self, task_id: TaskId) -> RepoResult<&Transition> {
        let before = self.current.tasks.len();
        self.current.tasks.retain(|task| task.id != task_id);
        if self.current.tasks.len() == before {
            return Ok(&self.current);
        }

        self.persist_current("delete_task")?;
        Ok(&self.current)
    }

    /// Sets the session title; blank input falls back to the derived
    /// `"Transition {number}"` label so a blank title is never stored.
    pub fn rename_transition(&mut self, new_title: &str) -> RepoResult<&Transition> {
        self.current.title = if new_title.trim().is_empty() {
            Some(format!("Transition {}", self.current.number))
        } else {
            Some(new_title.to_string())
        };
        self.persist_current("rename_transition")?;
        Ok(&self.current)
    }

    /// Ends the current session: writes an archived snapshot carrying
    /// `elapsed_seconds`, swaps in an empty successor transition, and
    /// returns it as the new current state.
    ///
    /// Archive and slot swap happen as one atomic store operation. On
    /// failure the in-memory transition is left exactly as it was, so
    /// the caller can retry without losing or duplicating a session.
    pub fn archive(&mut self, elapsed_seconds: u32) -> RepoResult<&Transition> {
        let now_ms = now_epoch_ms();
        let archived = self.current.archived_snapshot(now_ms, elapsed_seconds);
        let next = self.current.next(now_ms);

        if let Err(err) = self.repo.archive_and_reset(&archived, &next) {
            error!(
                "event=transition_archive module=service status=error number={} error={err}",
                archived.number
            );
            return Err(err);
        }

        info!(
            "event=transition_archive module=service status=ok number={} next_number={} task_count={} elapsed_seconds={elapsed_seconds}",
            archived.number,
            next.number,
            archived.tasks.len()
        );
        self.current = next;
        Ok(&self.current)
    }

    /// Replays a template into the current session: the session title is
    /// overwritten with the template's, then every template task is
    /// re-added in stored order through the ordinary add path.
    ///
    /// Each replayed task gets a fresh id and starts uncompleted, and
    /// every add re-applies the ordering before the next one runs, so
    /// the stability guarantee holds across the whole batch.
    pub fn replay_template(&mut self, template: &Template) -> RepoResult<&Transition> {
        self.rename_transition(template.title.as_str())?;
        for task in &template.tasks {
            self.add_task(task.title.as_str(), task.is_trap)?;
        }
        Ok(&self.current)
    }

    /// Write-through for ordinary mutations: the local update is kept
    /// even when the write fails; the failure is logged and surfaced so
    /// the UI can tell the user durable state is behind.
    fn persist_current(&self, operation: &str) -> RepoResult<()> {
        if let Err(err) = self.repo.put_active(&self.current) {
            error!(
                "event=transition_persist module=service status=error operation={operation} error={err}"
            );
            return Err(err);
        }
        Ok(())
    }
}
