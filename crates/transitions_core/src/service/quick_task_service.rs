//! Quick-add list service.
//!
//! # Responsibility
//! - Manage the persistent quick-add list (add/rename/trap/delete/list).
//!
//! # Invariants
//! - Creation follows the task contract: trim, silent blank rejection.
//! - Rename accepts any string, the same creation-only validation
//!   asymmetry as transition tasks.
//! - Mutations targeting a missing record are absorbed as no-ops.

use crate::model::quick_task::{QuickTask, QuickTaskId};
use crate::repo::quick_task_repo::QuickTaskRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::now_epoch_ms;

/// Use-case service for the quick-add list.
pub struct QuickTaskService<R: QuickTaskRepository> {
    repo: R,
}

impl<R: QuickTaskRepository> QuickTaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds one quick task; blank titles return `Ok(None)` without a
    /// write.
    pub fn add(&self, title: &str) -> RepoResult<Option<QuickTask>> {
        let Some(quick) = QuickTask::new(title, now_epoch_ms()) else {
            return Ok(None);
        };
        self.repo.create(&quick)?;
        Ok(Some(quick))
    }

    /// Replaces the title of one quick task. Missing ids are a no-op.
    pub fn rename(&self, id: QuickTaskId, new_title: &str) -> RepoResult<()> {
        absorb_not_found(self.repo.rename(id, new_title))
    }

    /// Flips the trap flag and returns the updated record, or `None`
    /// when the id is unknown.
    pub fn toggle_trap(&self, id: QuickTaskId) -> RepoResult<Option<QuickTask>> {
        let Some(quick) = self.repo.get(id)? else {
            return Ok(None);
        };
        self.repo.set_trap(id, !quick.is_trap)?;
        Ok(Some(QuickTask {
            is_trap: !quick.is_trap,
            ..quick
        }))
    }

    /// Deletes one quick task. Missing ids are a no-op.
    pub fn delete(&self, id: QuickTaskId) -> RepoResult<()> {
        absorb_not_found(self.repo.delete(id))
    }

    /// Lists the quick-add entries in display order (non-traps first,
    /// newest first inside each group).
    pub fn list(&self) -> RepoResult<Vec<QuickTask>> {
        self.repo.list()
    }
}

fn absorb_not_found(result: RepoResult<()>) -> RepoResult<()> {
    match result {
        Err(RepoError::NotFound(_)) => Ok(()),
        other => other,
    }
}
