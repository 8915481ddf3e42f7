//! Trap-ordering policy for task lists.
//!
//! # Responsibility
//! - Produce the display order of a task collection: every non-trap task
//!   before every trap task.
//!
//! # Invariants
//! - The partition is stable: relative order inside each group is kept.
//! - Length and the multiset of task ids never change.

use crate::model::task::Task;

/// Reorders `tasks` in place so that non-trap tasks precede trap tasks.
///
/// Relies on the standard library sort being stable; sorting on any other
/// key, or with an unstable sort, would break the relative-order
/// guarantee callers depend on.
pub fn order_traps_last(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| task.is_trap);
}
