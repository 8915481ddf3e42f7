//! Key/value settings repository.
//!
//! A minimal store for user preferences the core must round-trip (for
//! now only the daily reset time). Values are opaque strings here;
//! semantic validation lives in the settings service.

use crate::repo::{ensure_schema_current, ensure_table, RepoResult};
use rusqlite::{params, Connection};

/// Repository interface for persisted settings.
pub trait SettingsRepository {
    /// Reads one setting value by key.
    fn get_value(&self, key: &str) -> RepoResult<Option<String>>;
    /// Upserts one setting value.
    fn put_value(&self, key: &str, value: &str) -> RepoResult<()>;
}

/// SQLite-backed settings repository.
pub struct SqliteSettingsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_current(conn)?;
        ensure_table(conn, "settings", &["key", "value"])?;
        Ok(Self { conn })
    }
}

impl SettingsRepository for SqliteSettingsRepository<'_> {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM settings WHERE key = ?1;")?;

        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }
        Ok(None)
    }

    fn put_value(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT (key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }
}
