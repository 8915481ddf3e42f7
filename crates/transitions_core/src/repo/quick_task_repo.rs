//! Quick-add task repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the standalone quick-add list (create/rename/trap/delete).
//! - Serve the list in display order: non-traps first, newest first
//!   inside each group.
//!
//! # Invariants
//! - Quick tasks are hard-deleted; there is no tombstone state.
//! - Mutations of a missing record report `NotFound` and change nothing.

use crate::model::quick_task::{QuickTask, QuickTaskId};
use crate::repo::{ensure_schema_current, ensure_table, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

/// Repository interface for the quick-add list.
pub trait QuickTaskRepository {
    /// Inserts one quick task.
    fn create(&self, quick: &QuickTask) -> RepoResult<()>;
    /// Gets one quick task by id.
    fn get(&self, id: QuickTaskId) -> RepoResult<Option<QuickTask>>;
    /// Replaces the title of one quick task.
    fn rename(&self, id: QuickTaskId, new_title: &str) -> RepoResult<()>;
    /// Sets the trap flag of one quick task.
    fn set_trap(&self, id: QuickTaskId, is_trap: bool) -> RepoResult<()>;
    /// Hard-deletes one quick task.
    fn delete(&self, id: QuickTaskId) -> RepoResult<()>;
    /// Lists quick tasks in display order.
    fn list(&self) -> RepoResult<Vec<QuickTask>>;
}

/// SQLite-backed quick-add repository.
pub struct SqliteQuickTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuickTaskRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_current(conn)?;
        ensure_table(
            conn,
            "quick_tasks",
            &["uuid", "title", "is_trap", "created_at"],
        )?;
        Ok(Self { conn })
    }
}

impl QuickTaskRepository for SqliteQuickTaskRepository<'_> {
    fn create(&self, quick: &QuickTask) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO quick_tasks (uuid, title, is_trap, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                quick.id.to_string(),
                quick.title.as_str(),
                i64::from(quick.is_trap),
                quick.created_at,
            ],
        )?;
        Ok(())
    }

    fn get(&self, id: QuickTaskId) -> RepoResult<Option<QuickTask>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, title, is_trap, created_at
             FROM quick_tasks
             WHERE uuid = ?1;",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_quick_task_row(row)?));
        }
        Ok(None)
    }

    fn rename(&self, id: QuickTaskId, new_title: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE quick_tasks SET title = ?2 WHERE uuid = ?1;",
            params![id.to_string(), new_title],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn set_trap(&self, id: QuickTaskId, is_trap: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE quick_tasks SET is_trap = ?2 WHERE uuid = ?1;",
            params![id.to_string(), i64::from(is_trap)],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete(&self, id: QuickTaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM quick_tasks WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn list(&self) -> RepoResult<Vec<QuickTask>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, title, is_trap, created_at
             FROM quick_tasks
             ORDER BY is_trap ASC, created_at DESC, uuid ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut quick_tasks = Vec::new();
        while let Some(row) = rows.next()? {
            quick_tasks.push(parse_quick_task_row(row)?);
        }
        Ok(quick_tasks)
    }
}

fn parse_quick_task_row(row: &Row<'_>) -> RepoResult<QuickTask> {
    let uuid_text: String = row.get("uuid")?;
    let is_trap = match row.get::<_, i64>("is_trap")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_trap value `{other}` in quick_tasks.is_trap"
            )));
        }
    };

    Ok(QuickTask {
        id: parse_uuid(&uuid_text, "quick_tasks.uuid")?,
        title: row.get("title")?,
        is_trap,
        created_at: row.get("created_at")?,
    })
}
