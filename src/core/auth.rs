use crate::models::Project;

/// Who may administer a project.
///
/// The stored project password always works. A master password is only
/// honoured when an administrator configured one explicitly.
#[derive(Debug, Clone, Default)]
pub struct PasswordPolicy {
    master: Option<String>,
}

impl PasswordPolicy {
    pub fn new(master: Option<String>) -> Self {
        Self {
            master: master.filter(|m| !m.is_empty()),
        }
    }

    pub fn accepts(&self, project: &Project, candidate: &str) -> bool {
        if candidate == project.password {
            return true;
        }
        matches!(&self.master, Some(m) if m == candidate)
    }
}
