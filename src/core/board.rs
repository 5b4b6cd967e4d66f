//! Project list holder: the registry as seen by an administrator.

use crate::core::auth::PasswordPolicy;
use crate::core::validate::required;
use crate::db::PurgeReport;
use crate::errors::{AppError, AppResult};
use crate::models::Project;
use crate::repo::{ProjectRepository, Snapshots, Store};

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectListState {
    Loading,
    Success(Vec<Project>),
    Error(String),
}

pub struct ProjectBoard {
    projects: ProjectRepository,
    policy: PasswordPolicy,
    state: ProjectListState,
}

impl ProjectBoard {
    /// Build the board and load the project list right away.
    pub fn new(store: &Store, policy: PasswordPolicy) -> Self {
        let mut board = Self {
            projects: store.projects(),
            policy,
            state: ProjectListState::Loading,
        };
        board.refresh();
        board
    }

    pub fn state(&self) -> &ProjectListState {
        &self.state
    }

    pub fn refresh(&mut self) -> &ProjectListState {
        self.state = match self.projects.all() {
            Ok(list) => ProjectListState::Success(list),
            Err(e) => ProjectListState::Error(format!("Failed to load projects: {e}")),
        };
        &self.state
    }

    pub fn watch(&self) -> AppResult<Snapshots<Vec<Project>>> {
        self.projects.watch_all()
    }

    /// Record a failed command in the state and hand the error back.
    fn track<T>(&mut self, context: &str, result: AppResult<T>) -> AppResult<T> {
        match &result {
            Ok(_) => {
                self.refresh();
            }
            Err(e) => self.state = ProjectListState::Error(format!("{context}: {e}")),
        }
        result
    }

    pub fn create_project(&mut self, name: &str, password: &str) -> AppResult<Project> {
        let result = (|| -> AppResult<Project> {
            let name = required("project name", name)?;
            required("password", password)?;

            let mut project = Project::new(name, password);
            project.id = self.projects.create(&project)?;
            Ok(project)
        })();
        self.track("Failed to create project", result)
    }

    pub fn delete_project(&mut self, id: i64) -> AppResult<PurgeReport> {
        let result = self.projects.delete(id);
        self.track("Failed to delete project", result)
    }

    /// Change a password after checking the current one.
    pub fn change_password(&mut self, id: i64, old: &str, new: &str) -> AppResult<()> {
        let result = (|| -> AppResult<()> {
            required("new password", new)?;
            self.authorize(id, old)?;
            self.projects.update_password(id, new)
        })();
        self.track("Failed to update password", result)
    }

    pub fn verify_password(&self, id: i64, candidate: &str) -> bool {
        self.authorize(id, candidate).is_ok()
    }

    /// The project, if `candidate` may administer it.
    pub fn authorize(&self, id: i64, candidate: &str) -> AppResult<Project> {
        let project = self.projects.require(id)?;
        if self.policy.accepts(&project, candidate) {
            Ok(project)
        } else {
            Err(AppError::WrongPassword(id))
        }
    }
}
