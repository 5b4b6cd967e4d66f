use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    ttlog(conn, "migration_applied", version, message)
}

// ---------------------------------------------------------------------------
// main database
// ---------------------------------------------------------------------------

fn create_projects_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            name           TEXT NOT NULL,
            password       TEXT NOT NULL,
            created_at     TEXT NOT NULL,
            pending_delete INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_projects_created_at ON projects(created_at);
        "#,
    )?;
    Ok(())
}

/// Older registries have no journal flag for interrupted deletions.
fn migrate_add_pending_delete(conn: &Connection) -> AppResult<()> {
    if has_column(conn, "projects", "pending_delete")? {
        return Ok(());
    }

    warning("Adding 'pending_delete' column to projects table...");

    conn.execute(
        "ALTER TABLE projects ADD COLUMN pending_delete INTEGER NOT NULL DEFAULT 0",
        [],
    )
    .map_err(|e| AppError::Migration(format!("Failed to add 'pending_delete' column: {e}")))?;

    mark_applied(
        conn,
        "main_v2",
        "Added pending_delete journal flag to projects",
    )?;
    success("Migration applied: main_v2 → added 'pending_delete' to projects table");
    Ok(())
}

/// Bring the shared registry database up to date.
pub fn run_main_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "projects")? {
        create_projects_table(conn)?;
        mark_applied(conn, "main_v1", "Created projects table")?;
    } else {
        migrate_add_pending_delete(conn)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// project databases
// ---------------------------------------------------------------------------

fn create_members_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS members (
            project_id INTEGER NOT NULL,
            name       TEXT NOT NULL,
            PRIMARY KEY (project_id, name)
        );

        CREATE INDEX IF NOT EXISTS idx_members_project ON members(project_id);
        "#,
    )?;
    Ok(())
}

fn create_check_ins_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS check_ins (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id    INTEGER NOT NULL,
            member_name   TEXT NOT NULL,
            check_in_time TEXT NOT NULL,
            location      TEXT NOT NULL DEFAULT '',
            photo_path    TEXT NOT NULL DEFAULT '',
            latitude      REAL NOT NULL DEFAULT 0,
            longitude     REAL NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_check_ins_member_time
            ON check_ins(project_id, member_name, check_in_time);
        "#,
    )?;
    Ok(())
}

/// Older project databases stored only the textual location.
fn migrate_add_coordinates(conn: &Connection) -> AppResult<()> {
    let mut added = Vec::new();

    for column in ["latitude", "longitude"] {
        if has_column(conn, "check_ins", column)? {
            continue;
        }

        conn.execute(
            &format!("ALTER TABLE check_ins ADD COLUMN {column} REAL NOT NULL DEFAULT 0"),
            [],
        )
        .map_err(|e| AppError::Migration(format!("Failed to add '{column}' column: {e}")))?;
        added.push(column);
    }

    if !added.is_empty() {
        mark_applied(
            conn,
            "project_v2",
            &format!("Added {} to check_ins", added.join(", ")),
        )?;
        success(format!(
            "Migration applied: project_v2 → added {} to check_ins table",
            added.join(", ")
        ));
    }

    Ok(())
}

/// Bring a per-project database up to date.
pub fn run_project_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "members")? {
        create_members_table(conn)?;
        mark_applied(conn, "project_v1", "Created members table")?;
    }

    if !table_exists(conn, "check_ins")? {
        create_check_ins_table(conn)?;
        mark_applied(conn, "project_v1", "Created check_ins table")?;
    } else {
        migrate_add_coordinates(conn)?;
    }

    Ok(())
}
