use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::Connection;
use tracing::debug;

/// Ordered schema steps. The position in the list (1-based) is the version
/// recorded in `PRAGMA user_version` once the step has run.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "core tables",
        r#"
        CREATE TABLE IF NOT EXISTS technicians (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS projects (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            duration    TEXT,
            start_date  TEXT NOT NULL,
            end_date    TEXT
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            duration    TEXT,
            start_date  TEXT NOT NULL,
            end_date    TEXT,
            project_id  INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            state       TEXT NOT NULL DEFAULT 'pending' CHECK(state IN ('pending','complete')),
            note        TEXT
        );

        CREATE TABLE IF NOT EXISTS locations (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            latitude       REAL NOT NULL,
            longitude      REAL NOT NULL,
            recorded_at    TEXT NOT NULL,
            technician_id  INTEGER REFERENCES technicians(id) ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_project ON tasks(project_id);
        CREATE INDEX IF NOT EXISTS idx_locations_recorded_at ON locations(recorded_at);
        "#,
    ),
    (
        "assignment tables",
        r#"
        CREATE TABLE IF NOT EXISTS project_technicians (
            project_id     INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            technician_id  INTEGER NOT NULL REFERENCES technicians(id) ON DELETE CASCADE,
            PRIMARY KEY (project_id, technician_id)
        );

        CREATE TABLE IF NOT EXISTS task_technicians (
            task_id        INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
            technician_id  INTEGER NOT NULL REFERENCES technicians(id) ON DELETE CASCADE,
            PRIMARY KEY (task_id, technician_id)
        );
        "#,
    ),
    (
        "controlled zones",
        r#"
        CREATE TABLE IF NOT EXISTS controlled_zones (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL,
            lat        REAL NOT NULL,
            lon        REAL NOT NULL,
            tolerance  REAL NOT NULL CHECK(tolerance >= 0)
        );
        "#,
    ),
];

pub fn current_version(conn: &Connection) -> AppResult<u32> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

pub fn latest_version() -> u32 {
    MIGRATIONS.len() as u32
}

/// Apply every step newer than the recorded schema version.
/// Returns the number of steps applied.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    let from = current_version(conn)?;
    let mut applied = 0;

    for (idx, (name, sql)) in MIGRATIONS.iter().enumerate() {
        let version = idx as u32 + 1;
        if version <= from {
            continue;
        }

        debug!(version, name, "applying migration");
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)
            .map_err(|e| AppError::Migration(format!("{name}: {e}")))?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;

        success(format!("Migration {version} applied: {name}"));
        applied += 1;
    }

    Ok(applied)
}
