//! `SQLite` task store.
//!
//! The database is stored at `~/.tend/tend.db` and holds a single `tasks`
//! table. It stands in for the remote document store a hosted deployment
//! would use; both sit behind [`TaskStore`].

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::core::{parse_date_only, parse_timestamp};
use crate::error::TendError;
use crate::tasks::{TaskRecord, TaskSeed, TaskStore};

use super::migrations;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_TASK: &str = "SELECT id, user_id, user_name, title, description, entry_date, tags,
        due_date, recurrence, completed, completed_at, parent_task_id
    FROM tasks";

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, TendError> {
        debug!(path = %path.display(), "opening task database");
        let conn = Connection::open(path).map_err(|e| {
            TendError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        Self::init(conn)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, TendError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            TendError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, TendError> {
        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, TendError> {
        migrations::get_version(&self.conn)
    }
}

/// Raw column values, converted to a [`TaskRecord`] outside the row callback.
struct TaskRow {
    id: i64,
    user_id: String,
    user_name: String,
    title: String,
    description: Option<String>,
    entry_date: Option<String>,
    tags: String,
    due_date: Option<String>,
    recurrence: Option<String>,
    completed: bool,
    completed_at: Option<String>,
    parent_task_id: Option<String>,
}

impl TaskRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            user_name: row.get(2)?,
            title: row.get(3)?,
            description: row.get(4)?,
            entry_date: row.get(5)?,
            tags: row.get(6)?,
            due_date: row.get(7)?,
            recurrence: row.get(8)?,
            completed: row.get(9)?,
            completed_at: row.get(10)?,
            parent_task_id: row.get(11)?,
        })
    }

    fn into_record(self) -> Result<TaskRecord, TendError> {
        Ok(TaskRecord {
            id: self.id.to_string(),
            user_id: self.user_id,
            user_name: self.user_name,
            title: self.title,
            description: self.description,
            entry_date: self.entry_date.as_deref().and_then(parse_timestamp),
            tags: serde_json::from_str(&self.tags)?,
            due_date: self.due_date.as_deref().and_then(parse_date_only),
            recurrence: self.recurrence,
            completed: self.completed,
            completed_at: self.completed_at.as_deref().and_then(parse_timestamp),
            parent_task_id: self.parent_task_id,
        })
    }
}

fn row_id(id: &str) -> Result<i64, TendError> {
    id.trim()
        .parse()
        .map_err(|_| TendError::NotFound(format!("task {id}")))
}

impl TaskStore for Database {
    fn add_task(&mut self, seed: &TaskSeed) -> Result<TaskRecord, TendError> {
        let tags = serde_json::to_string(&seed.tags)?;
        let description = (!seed.description.is_empty()).then_some(seed.description.as_str());

        self.conn.execute(
            "INSERT INTO tasks (user_id, user_name, title, description, entry_date, tags,
                due_date, recurrence, completed, parent_task_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                seed.user_id,
                seed.user_name,
                seed.title,
                description,
                seed.entry_date.format(TIMESTAMP_FORMAT).to_string(),
                tags,
                seed.due_date.map(|d| d.format(DATE_FORMAT).to_string()),
                seed.recurrence,
                seed.completed,
                seed.parent_task_id,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!(task_id = id, title = %seed.title, "task added");
        Ok(seed.clone().into_record(id.to_string()))
    }

    fn get_task(&self, id: &str) -> Result<TaskRecord, TendError> {
        let row = self
            .conn
            .query_row(
                &format!("{SELECT_TASK} WHERE id = ?1"),
                params![row_id(id)?],
                TaskRow::from_row,
            )
            .optional()?;

        row.ok_or_else(|| TendError::NotFound(format!("task {id}")))?
            .into_record()
    }

    fn list_tasks(
        &self,
        user_id: &str,
        include_completed: bool,
    ) -> Result<Vec<TaskRecord>, TendError> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_TASK} WHERE user_id = ?1 AND (?2 OR completed = 0)
             ORDER BY due_date IS NULL, due_date, id"
        ))?;

        let rows = stmt
            .query_map(params![user_id, include_completed], TaskRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(TaskRow::into_record).collect()
    }

    fn update_task(&mut self, task: &TaskRecord) -> Result<(), TendError> {
        let tags = serde_json::to_string(&task.tags)?;

        let changed = self.conn.execute(
            "UPDATE tasks SET user_id = ?2, user_name = ?3, title = ?4, description = ?5,
                entry_date = ?6, tags = ?7, due_date = ?8, recurrence = ?9, completed = ?10,
                completed_at = ?11, parent_task_id = ?12
             WHERE id = ?1",
            params![
                row_id(&task.id)?,
                task.user_id,
                task.user_name,
                task.title,
                task.description,
                task.entry_date.map(|d| d.format(TIMESTAMP_FORMAT).to_string()),
                tags,
                task.due_date.map(|d| d.format(DATE_FORMAT).to_string()),
                task.recurrence,
                task.completed,
                task.completed_at.map(|d| d.format(TIMESTAMP_FORMAT).to_string()),
                task.parent_task_id,
            ],
        )?;

        if changed == 0 {
            return Err(TendError::NotFound(format!("task {}", task.id)));
        }
        debug!(task_id = %task.id, "task updated");
        Ok(())
    }

    fn delete_task(&mut self, id: &str) -> Result<(), TendError> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![row_id(id)?])?;

        if changed == 0 {
            return Err(TendError::NotFound(format!("task {id}")));
        }
        debug!(task_id = %id, "task deleted");
        Ok(())
    }
}
