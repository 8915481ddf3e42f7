//! Template repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Append captured templates as independent records and read them back.
//!
//! # Invariants
//! - Templates are append-only; capture never overwrites an existing
//!   record. Deletion is an external concern and has no API here.

use crate::model::template::{Template, TemplateId};
use crate::repo::{
    ensure_schema_current, ensure_table, parse_uuid, tasks_from_json, tasks_to_json, RepoResult,
};
use rusqlite::{params, Connection, Row};

const TEMPLATE_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    tasks_json,
    created_at
FROM templates";

/// Repository interface for stored templates.
pub trait TemplateRepository {
    /// Appends one captured template as a new record.
    fn append_template(&self, template: &Template) -> RepoResult<()>;
    /// Gets one template by id.
    fn get_template(&self, id: TemplateId) -> RepoResult<Option<Template>>;
    /// Lists all templates, newest capture first.
    fn list_templates(&self) -> RepoResult<Vec<Template>>;
}

/// SQLite-backed template repository.
pub struct SqliteTemplateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTemplateRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_current(conn)?;
        ensure_table(conn, "templates", &["uuid", "title", "tasks_json", "created_at"])?;
        Ok(Self { conn })
    }
}

impl TemplateRepository for SqliteTemplateRepository<'_> {
    fn append_template(&self, template: &Template) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO templates (uuid, title, tasks_json, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                template.id.to_string(),
                template.title.as_str(),
                tasks_to_json(&template.tasks)?,
                template.created_at,
            ],
        )?;
        Ok(())
    }

    fn get_template(&self, id: TemplateId) -> RepoResult<Option<Template>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEMPLATE_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_template_row(row)?));
        }
        Ok(None)
    }

    fn list_templates(&self) -> RepoResult<Vec<Template>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TEMPLATE_SELECT_SQL} ORDER BY created_at DESC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut templates = Vec::new();
        while let Some(row) = rows.next()? {
            templates.push(parse_template_row(row)?);
        }
        Ok(templates)
    }
}

fn parse_template_row(row: &Row<'_>) -> RepoResult<Template> {
    let uuid_text: String = row.get("uuid")?;
    let tasks_json: String = row.get("tasks_json")?;

    Ok(Template {
        id: parse_uuid(&uuid_text, "templates.uuid")?,
        title: row.get("title")?,
        tasks: tasks_from_json(&tasks_json, "templates.tasks_json")?,
        created_at: row.get("created_at")?,
    })
}
