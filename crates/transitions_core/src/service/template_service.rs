//! Template capture service.
//!
//! # Responsibility
//! - Capture the active transition's task list as a reusable template.
//! - Read stored templates back for listing and replay.
//!
//! # Invariants
//! - Capture appends a new record every time; existing templates are
//!   never overwritten or merged.
//! - The captured snapshot keeps completion state as-is; resetting
//!   happens at replay, not at capture.

use crate::model::template::{Template, TemplateId};
use crate::model::transition::Transition;
use crate::repo::template_repo::TemplateRepository;
use crate::repo::RepoResult;
use crate::service::now_epoch_ms;
use log::info;

/// Use-case service for template capture and lookup.
pub struct TemplateService<R: TemplateRepository> {
    repo: R,
}

impl<R: TemplateRepository> TemplateService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Snapshots `transition` as a new template and persists it.
    pub fn capture(&self, transition: &Transition) -> RepoResult<Template> {
        let template = Template::capture(transition, now_epoch_ms());
        self.repo.append_template(&template)?;
        info!(
            "event=template_capture module=service status=ok task_count={}",
            template.tasks.len()
        );
        Ok(template)
    }

    /// Gets one template by id.
    pub fn get(&self, id: TemplateId) -> RepoResult<Option<Template>> {
        self.repo.get_template(id)
    }

    /// Lists stored templates, newest capture first.
    pub fn list(&self) -> RepoResult<Vec<Template>> {
        self.repo.list_templates()
    }
}
