//! Persistence access for the `members` table (project database).

use crate::errors::AppResult;
use crate::models::Member;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Member> {
    Ok(Member {
        project_id: row.get("project_id")?,
        name: row.get("name")?,
    })
}

/// Insert-or-replace: adding an existing name is a no-op.
pub fn insert(conn: &Connection, member: &Member) -> AppResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO members (project_id, name) VALUES (?1, ?2)",
        params![member.project_id, member.name],
    )?;
    Ok(())
}

pub fn list_by_project(conn: &Connection, project_id: i64) -> AppResult<Vec<Member>> {
    let mut stmt = conn.prepare_cached(
        "SELECT project_id, name FROM members WHERE project_id = ?1 ORDER BY name",
    )?;

    let rows = stmt.query_map([project_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn exists(conn: &Connection, project_id: i64, name: &str) -> AppResult<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT name FROM members WHERE project_id = ?1 AND name = ?2",
            params![project_id, name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Returns the number of removed rows (0 or 1).
pub fn delete_by_name(conn: &Connection, project_id: i64, name: &str) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM members WHERE project_id = ?1 AND name = ?2",
        params![project_id, name],
    )?)
}

pub fn delete_by_project(conn: &Connection, project_id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM members WHERE project_id = ?1", [project_id])?)
}
