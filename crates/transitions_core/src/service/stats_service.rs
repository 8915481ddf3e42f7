//! Session history statistics.
//!
//! # Responsibility
//! - Serve archived transitions by time window for the stats and
//!   calendar consumers.
//! - Aggregate window totals (sessions, time, completions, avoided
//!   traps).

use crate::model::transition::ArchivedTransition;
use crate::repo::transition_repo::{ArchiveWindowQuery, TransitionRepository};
use crate::repo::RepoResult;

/// Aggregated totals over a set of archived transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSummary {
    /// Number of archived sessions in the window.
    pub total_transitions: u32,
    /// Sum of elapsed session time, in seconds.
    pub total_seconds: u64,
    /// Non-trap tasks that ended a session checked off.
    pub tasks_completed: u32,
    /// Trap tasks that ended a session still unchecked.
    pub traps_avoided: u32,
}

/// Computes window totals from archived records.
pub fn summarize(archives: &[ArchivedTransition]) -> StatsSummary {
    let mut summary = StatsSummary {
        total_transitions: archives.len() as u32,
        ..StatsSummary::default()
    };

    for archive in archives {
        summary.total_seconds += u64::from(archive.elapsed_seconds);
        for task in &archive.tasks {
            if !task.is_trap && task.completed {
                summary.tasks_completed += 1;
            }
            if task.is_trap && !task.completed {
                summary.traps_avoided += 1;
            }
        }
    }

    summary
}

/// Read-side service over session history.
pub struct StatsService<R: TransitionRepository> {
    repo: R,
}

impl<R: TransitionRepository> StatsService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists archived transitions inside the window, ascending by
    /// archive time. This is the calendar view's data contract.
    pub fn archives_between(
        &self,
        query: &ArchiveWindowQuery,
    ) -> RepoResult<Vec<ArchivedTransition>> {
        self.repo.list_archived(query)
    }

    /// Aggregates totals over the window.
    pub fn window_summary(&self, query: &ArchiveWindowQuery) -> RepoResult<StatsSummary> {
        let archives = self.repo.list_archived(query)?;
        Ok(summarize(&archives))
    }
}

#[cfg(test)]
mod tests {
    use super::{summarize, StatsSummary};
    use crate::model::task::Task;
    use crate::model::transition::Transition;

    fn archived_with(
        number_offset: u32,
        elapsed: u32,
        tasks: Vec<Task>,
    ) -> crate::model::transition::ArchivedTransition {
        let mut transition = Transition::first(1_000);
        transition.number += number_offset;
        transition.tasks = tasks;
        transition.archived_snapshot(2_000, elapsed)
    }

    fn done(title: &str, is_trap: bool) -> Task {
        let mut task = Task::new(title, is_trap).unwrap();
        task.completed = true;
        task
    }

    fn open(title: &str, is_trap: bool) -> Task {
        Task::new(title, is_trap).unwrap()
    }

    #[test]
    fn empty_window_summarizes_to_zeroes() {
        assert_eq!(summarize(&[]), StatsSummary::default());
    }

    #[test]
    fn totals_count_sessions_time_completions_and_avoided_traps() {
        let archives = vec![
            archived_with(
                0,
                120,
                vec![done("email", false), open("scroll feed", true)],
            ),
            archived_with(
                1,
                300,
                vec![
                    done("write report", false),
                    open("plan week", false),
                    done("check phone", true),
                ],
            ),
        ];

        let summary = summarize(&archives);
        assert_eq!(summary.total_transitions, 2);
        assert_eq!(summary.total_seconds, 420);
        // Completed traps do not count as completed tasks...
        assert_eq!(summary.tasks_completed, 2);
        // ...and only untouched traps count as avoided.
        assert_eq!(summary.traps_avoided, 1);
    }
}
