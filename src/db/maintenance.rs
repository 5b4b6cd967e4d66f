use crate::errors::AppResult;
use rusqlite::Connection;

/// Run `PRAGMA integrity_check`; `"ok"` means healthy.
pub fn integrity_check(conn: &Connection) -> AppResult<String> {
    let result: String = conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
    Ok(result)
}

pub fn vacuum(conn: &Connection) -> AppResult<()> {
    conn.execute_batch("VACUUM;")?;
    Ok(())
}

/// Row count of a table owned by this crate's schema.
pub fn count_rows(conn: &Connection, table: &str) -> AppResult<i64> {
    let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
    Ok(n)
}
