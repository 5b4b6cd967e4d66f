use super::DATETIME_FMT;
use chrono::{Local, NaiveDateTime, Timelike};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Project {
    pub id: i64,                   // ⇔ projects.id (autoincrement)
    pub name: String,              // ⇔ projects.name
    #[serde(skip_serializing)]
    pub password: String,          // ⇔ projects.password (plaintext)
    pub created_at: NaiveDateTime, // ⇔ projects.created_at (TEXT "YYYY-MM-DD HH:MM:SS")
}

impl Project {
    /// Build a project not yet persisted (`id = 0`), stamped with the local time.
    pub fn new(name: &str, password: &str) -> Self {
        let now = Local::now().naive_local();
        Self {
            id: 0,
            name: name.trim().to_string(),
            password: password.to_string(),
            created_at: now.with_nanosecond(0).unwrap_or(now),
        }
    }

    pub fn created_at_str(&self) -> String {
        self.created_at.format(DATETIME_FMT).to_string()
    }
}
