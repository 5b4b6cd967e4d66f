//! Persistence access for the `projects` registry table (main database).

use crate::errors::{AppError, AppResult};
use crate::models::{DATETIME_FMT, Project};
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Project> {
    let created_str: String = row.get("created_at")?;
    let created_at = NaiveDateTime::parse_from_str(&created_str, DATETIME_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(created_str.clone())),
        )
    })?;

    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        password: row.get("password")?,
        created_at,
    })
}

/// Insert a project and return its new id.
pub fn insert(conn: &Connection, project: &Project) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO projects (name, password, created_at) VALUES (?1, ?2, ?3)",
        params![project.name, project.password, project.created_at_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Active projects, newest first. Projects being deleted are hidden.
pub fn list_active(conn: &Connection) -> AppResult<Vec<Project>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, password, created_at FROM projects
         WHERE pending_delete = 0
         ORDER BY created_at DESC, id DESC",
    )?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_by_id(conn: &Connection, id: i64) -> AppResult<Option<Project>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, password, created_at FROM projects
         WHERE id = ?1 AND pending_delete = 0",
    )?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn is_active(conn: &Connection, id: i64) -> AppResult<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT id FROM projects WHERE id = ?1 AND pending_delete = 0",
            [id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Returns `false` when no active project has this id.
pub fn update_password(conn: &Connection, id: i64, new_password: &str) -> AppResult<bool> {
    let n = conn.execute(
        "UPDATE projects SET password = ?1 WHERE id = ?2 AND pending_delete = 0",
        params![new_password, id],
    )?;
    Ok(n > 0)
}

/// Journal the start of a deletion. Returns `false` when the row is gone.
pub fn mark_pending_delete(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn.execute(
        "UPDATE projects SET pending_delete = 1 WHERE id = ?1",
        [id],
    )?;
    Ok(n > 0)
}

pub fn list_pending_delete(conn: &Connection) -> AppResult<Vec<i64>> {
    let mut stmt =
        conn.prepare_cached("SELECT id FROM projects WHERE pending_delete = 1 ORDER BY id")?;
    let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_by_id(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM projects WHERE id = ?1", [id])?;
    Ok(())
}
