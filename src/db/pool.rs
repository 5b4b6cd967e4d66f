//! SQLite connection wrapper (one per database file).

use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct DbPool {
    pub conn: Connection,
    path: PathBuf,
}

impl DbPool {
    /// Open (or create) the database at `path` in WAL mode with foreign keys on.
    pub fn new(path: &Path) -> AppResult<Self> {
        let conn = Connection::open(path)?;

        conn.busy_timeout(Duration::from_secs(5))?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        if !mode.eq_ignore_ascii_case("wal") {
            crate::ui::messages::warning(format!(
                "{}: journal mode is '{}' instead of WAL",
                path.display(),
                mode
            ));
        }

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Helper to execute a closure with a mutable connection reference.
    pub fn with_conn<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        func(&mut self.conn)
    }

    /// Close the connection, checkpointing the WAL into the main file.
    pub fn close(self) -> AppResult<()> {
        self.conn.close().map_err(|(_, e)| AppError::Db(e))
    }
}
