//! Database migrations for tend.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;

use crate::error::TendError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, TendError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| TendError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), TendError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| TendError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), TendError> {
    let current = get_version(conn)?;

    for version in (current + 1)..=CURRENT_VERSION {
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), TendError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(TendError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: the tasks table.
///
/// Tags are a JSON array. Dates are ISO 8601 text.
fn migrate_v1(conn: &Connection) -> Result<(), TendError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            user_name TEXT NOT NULL DEFAULT '',
            title TEXT NOT NULL,
            description TEXT,
            entry_date TEXT,
            tags TEXT NOT NULL DEFAULT '[]',
            due_date TEXT,
            recurrence TEXT,
            completed INTEGER NOT NULL DEFAULT 0,
            completed_at TEXT,
            parent_task_id TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_user
        ON tasks(user_id, completed);

        CREATE INDEX IF NOT EXISTS idx_tasks_due
        ON tasks(due_date);
        ",
    )
    .map_err(|e| TendError::Database(format!("Migration v1 failed: {e}")))
}
