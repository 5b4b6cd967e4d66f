//! Persistence access for the `check_ins` table (project database).

use crate::errors::{AppError, AppResult};
use crate::models::{CheckIn, DATE_FMT, DATETIME_FMT};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const COLUMNS: &str =
    "id, project_id, member_name, check_in_time, location, photo_path, latitude, longitude";

pub fn map_row(row: &Row) -> Result<CheckIn> {
    let time_str: String = row.get("check_in_time")?;
    let check_in_time = NaiveDateTime::parse_from_str(&time_str, DATETIME_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(time_str.clone())),
        )
    })?;

    Ok(CheckIn {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        member_name: row.get("member_name")?,
        check_in_time,
        location: row.get("location")?,
        photo_path: row.get("photo_path")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
    })
}

fn collect(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> AppResult<Vec<CheckIn>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map(params, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert a check-in and return its new id.
pub fn insert(conn: &Connection, ci: &CheckIn) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO check_ins (project_id, member_name, check_in_time, location, photo_path, latitude, longitude)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            ci.project_id,
            ci.member_name,
            ci.timestamp_str(),
            ci.location,
            ci.photo_path,
            ci.latitude,
            ci.longitude,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, ci: &CheckIn) -> AppResult<bool> {
    let n = conn.execute(
        "UPDATE check_ins
         SET member_name = ?1, check_in_time = ?2, location = ?3, photo_path = ?4,
             latitude = ?5, longitude = ?6
         WHERE id = ?7",
        params![
            ci.member_name,
            ci.timestamp_str(),
            ci.location,
            ci.photo_path,
            ci.latitude,
            ci.longitude,
            ci.id,
        ],
    )?;
    Ok(n > 0)
}

pub fn get_by_id(conn: &Connection, id: i64) -> AppResult<Option<CheckIn>> {
    let mut stmt = conn.prepare_cached(&format!("SELECT {COLUMNS} FROM check_ins WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// All check-ins of a project, newest first.
pub fn list_by_project(conn: &Connection, project_id: i64) -> AppResult<Vec<CheckIn>> {
    collect(
        conn,
        &format!(
            "SELECT {COLUMNS} FROM check_ins
             WHERE project_id = ?1
             ORDER BY check_in_time DESC, id DESC"
        ),
        [project_id],
    )
}

/// Check-ins whose calendar day falls in `[start, end]`, oldest first.
pub fn list_in_range(
    conn: &Connection,
    project_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<CheckIn>> {
    collect(
        conn,
        &format!(
            "SELECT {COLUMNS} FROM check_ins
             WHERE project_id = ?1 AND date(check_in_time) BETWEEN ?2 AND ?3
             ORDER BY check_in_time ASC, id ASC"
        ),
        params![
            project_id,
            start.format(DATE_FMT).to_string(),
            end.format(DATE_FMT).to_string()
        ],
    )
}

/// Returns the photo path of the removed row, `None` when the id is unknown.
pub fn delete_by_id(conn: &Connection, id: i64) -> AppResult<Option<String>> {
    let photo: Option<String> = conn
        .query_row("SELECT photo_path FROM check_ins WHERE id = ?1", [id], |row| row.get(0))
        .optional()?;
    if photo.is_some() {
        conn.execute("DELETE FROM check_ins WHERE id = ?1", [id])?;
    }
    Ok(photo)
}

pub fn delete_by_project(conn: &Connection, project_id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM check_ins WHERE project_id = ?1", [project_id])?)
}

/// Remove the member's check-ins on the same calendar day as `time`,
/// optionally sparing the row `except`. Returns the photo paths of the
/// removed rows.
pub fn delete_same_day(
    conn: &Connection,
    project_id: i64,
    member_name: &str,
    time: &NaiveDateTime,
    except: Option<i64>,
) -> AppResult<Vec<String>> {
    let time = time.format(DATETIME_FMT).to_string();
    let except = except.unwrap_or(0);
    const SCOPE: &str = "project_id = ?1 AND member_name = ?2 AND date(check_in_time) = date(?3)
           AND id != ?4";

    let mut stmt = conn.prepare_cached(&format!("SELECT photo_path FROM check_ins WHERE {SCOPE}"))?;
    let photos = stmt
        .query_map(params![project_id, member_name, time, except], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<String>>>()?;

    conn.execute(
        &format!("DELETE FROM check_ins WHERE {SCOPE}"),
        params![project_id, member_name, time, except],
    )?;
    Ok(photos)
}
