use serde::Serialize;

/// Roster entry, keyed by (project_id, name).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Member {
    pub project_id: i64,
    pub name: String,
}

impl Member {
    pub fn new(project_id: i64, name: &str) -> Self {
        Self {
            project_id,
            name: name.trim().to_string(),
        }
    }
}
