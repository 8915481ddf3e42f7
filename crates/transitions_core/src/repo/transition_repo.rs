//! Transition repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Own the single active-transition slot (full-overwrite semantics).
//! - Append archived session records and query them by time window.
//! - Perform the archive-and-swap as one atomic storage operation.
//!
//! # Invariants
//! - At most one active-transition row ever exists (`slot = 'current'`).
//! - Archived rows are append-only; nothing here updates or deletes them.
//! - `archive_and_reset` either commits both writes or leaves storage
//!   untouched.

use crate::model::transition::{ArchivedTransition, Transition};
use crate::repo::{
    ensure_schema_current, ensure_table, parse_uuid, tasks_from_json, tasks_to_json, RepoError,
    RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};

const ACTIVE_UPSERT_SQL: &str = "INSERT INTO active_transition (
    slot,
    uuid,
    number,
    title,
    tasks_json,
    start_time
) VALUES ('current', ?1, ?2, ?3, ?4, ?5)
ON CONFLICT (slot) DO UPDATE SET
    uuid = excluded.uuid,
    number = excluded.number,
    title = excluded.title,
    tasks_json = excluded.tasks_json,
    start_time = excluded.start_time;";

const ARCHIVED_SELECT_SQL: &str = "SELECT
    uuid,
    number,
    title,
    tasks_json,
    start_time,
    completed_at,
    elapsed_seconds
FROM archived_transitions";

/// Query options for listing archived transitions.
///
/// Bounds apply to `completed_at` (epoch milliseconds) and are
/// inclusive; results come back ascending by archive time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveWindowQuery {
    pub start_ms: Option<i64>,
    pub end_ms: Option<i64>,
    pub limit: Option<u32>,
}

/// Repository interface for the active transition and session history.
pub trait TransitionRepository {
    /// Reads the active transition, if one has ever been persisted.
    fn get_active(&self) -> RepoResult<Option<Transition>>;
    /// Overwrites the single active-transition slot.
    fn put_active(&self, transition: &Transition) -> RepoResult<()>;
    /// Appends `archived` to history and replaces the active slot with
    /// `next`, atomically. Storage is untouched when either part fails.
    fn archive_and_reset(
        &mut self,
        archived: &ArchivedTransition,
        next: &Transition,
    ) -> RepoResult<()>;
    /// Lists archived transitions inside an optional time window.
    fn list_archived(&self, query: &ArchiveWindowQuery) -> RepoResult<Vec<ArchivedTransition>>;
}

/// SQLite-backed transition repository.
pub struct SqliteTransitionRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteTransitionRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_schema_current(conn)?;
        ensure_table(
            conn,
            "active_transition",
            &["slot", "uuid", "number", "title", "tasks_json", "start_time"],
        )?;
        ensure_table(
            conn,
            "archived_transitions",
            &[
                "uuid",
                "number",
                "title",
                "tasks_json",
                "start_time",
                "completed_at",
                "elapsed_seconds",
            ],
        )?;
        Ok(Self { conn })
    }
}

impl TransitionRepository for SqliteTransitionRepository<'_> {
    fn get_active(&self) -> RepoResult<Option<Transition>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, number, title, tasks_json, start_time
             FROM active_transition
             WHERE slot = 'current';",
        )?;

        let mut rows = stmt.query([])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_active_row(row)?));
        }
        Ok(None)
    }

    fn put_active(&self, transition: &Transition) -> RepoResult<()> {
        self.conn.execute(
            ACTIVE_UPSERT_SQL,
            params![
                transition.id.to_string(),
                transition.number,
                transition.title.as_deref(),
                tasks_to_json(&transition.tasks)?,
                transition.start_time,
            ],
        )?;
        Ok(())
    }

    fn archive_and_reset(
        &mut self,
        archived: &ArchivedTransition,
        next: &Transition,
    ) -> RepoResult<()> {
        if next.number != archived.number + 1 {
            return Err(RepoError::InvalidData(format!(
                "successor number {} does not follow archived number {}",
                next.number, archived.number
            )));
        }

        let archived_tasks = tasks_to_json(&archived.tasks)?;
        let next_tasks = tasks_to_json(&next.tasks)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT INTO archived_transitions (
                uuid,
                number,
                title,
                tasks_json,
                start_time,
                completed_at,
                elapsed_seconds
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                archived.id.to_string(),
                archived.number,
                archived.title.as_str(),
                archived_tasks,
                archived.start_time,
                archived.completed_at,
                archived.elapsed_seconds,
            ],
        )?;

        tx.execute(
            ACTIVE_UPSERT_SQL,
            params![
                next.id.to_string(),
                next.number,
                next.title.as_deref(),
                next_tasks,
                next.start_time,
            ],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn list_archived(&self, query: &ArchiveWindowQuery) -> RepoResult<Vec<ArchivedTransition>> {
        let mut sql = format!("{ARCHIVED_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(start_ms) = query.start_ms {
            sql.push_str(" AND completed_at >= ?");
            bind_values.push(Value::Integer(start_ms));
        }
        if let Some(end_ms) = query.end_ms {
            sql.push_str(" AND completed_at <= ?");
            bind_values.push(Value::Integer(end_ms));
        }

        sql.push_str(" ORDER BY completed_at ASC, uuid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut archives = Vec::new();
        while let Some(row) = rows.next()? {
            archives.push(parse_archived_row(row)?);
        }
        Ok(archives)
    }
}

fn parse_active_row(row: &Row<'_>) -> RepoResult<Transition> {
    let uuid_text: String = row.get("uuid")?;
    let tasks_json: String = row.get("tasks_json")?;

    Ok(Transition {
        id: parse_uuid(&uuid_text, "active_transition.uuid")?,
        number: row.get("number")?,
        title: row.get("title")?,
        tasks: tasks_from_json(&tasks_json, "active_transition.tasks_json")?,
        start_time: row.get("start_time")?,
    })
}

fn parse_archived_row(row: &Row<'_>) -> RepoResult<ArchivedTransition> {
    let uuid_text: String = row.get("uuid")?;
    let tasks_json: String = row.get("tasks_json")?;

    Ok(ArchivedTransition {
        id: parse_uuid(&uuid_text, "archived_transitions.uuid")?,
        number: row.get("number")?,
        title: row.get("title")?,
        tasks: tasks_from_json(&tasks_json, "archived_transitions.tasks_json")?,
        start_time: row.get("start_time")?,
        completed_at: row.get("completed_at")?,
        elapsed_seconds: row.get("elapsed_seconds")?,
    })
}
