//! Per-project holder: roster, check-ins and export for one project.

use crate::core::auth::PasswordPolicy;
use crate::core::validate::required;
use crate::errors::{AppError, AppResult};
use crate::export::{ExportOptions, export_attendance};
use crate::location::ResolvedLocation;
use crate::models::{CheckIn, Member, Project};
use crate::repo::{CheckInRepository, MemberRepository, ProjectRepository, Snapshots, Store};
use crate::ui::messages::error;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::Builder;

#[derive(Debug, Clone, PartialEq)]
pub enum CheckInState {
    Loading,
    Ready,
    Error(String),
}

pub struct CheckInDesk {
    store: Store,
    projects: ProjectRepository,
    members: MemberRepository,
    check_ins: CheckInRepository,
    policy: PasswordPolicy,
    project: Project,
    state: CheckInState,
}

impl CheckInDesk {
    /// Load `project_id`; fails with `ProjectNotFound` for unknown ids.
    pub fn open(store: &Store, policy: PasswordPolicy, project_id: i64) -> AppResult<Self> {
        let projects = store.projects();
        let project = projects.require(project_id)?;

        Ok(Self {
            store: store.clone(),
            projects,
            members: store.members(),
            check_ins: store.check_ins(),
            policy,
            project,
            state: CheckInState::Ready,
        })
    }

    pub fn project_id(&self) -> i64 {
        self.project.id
    }

    pub fn current_project(&self) -> &Project {
        &self.project
    }

    pub fn state(&self) -> &CheckInState {
        &self.state
    }

    fn track<T>(&mut self, context: &str, result: AppResult<T>) -> AppResult<T> {
        self.state = match &result {
            Ok(_) => CheckInState::Ready,
            Err(e) => CheckInState::Error(format!("{context}: {e}")),
        };
        result
    }

    pub fn reload(&mut self) -> AppResult<&Project> {
        self.state = CheckInState::Loading;
        let result = self.projects.require(self.project.id);
        self.project = self.track("Failed to load project", result)?;
        Ok(&self.project)
    }

    // ---------------------------
    // Reads
    // ---------------------------

    pub fn members(&self) -> AppResult<Vec<Member>> {
        self.members.members_of(self.project.id)
    }

    pub fn watch_members(&self) -> AppResult<Snapshots<Vec<Member>>> {
        self.members.watch_members(self.project.id)
    }

    pub fn check_ins(&self) -> AppResult<Vec<CheckIn>> {
        self.check_ins.check_ins_of(self.project.id)
    }

    pub fn watch_check_ins(&self) -> AppResult<Snapshots<Vec<CheckIn>>> {
        self.check_ins.watch_check_ins(self.project.id)
    }

    pub fn check_in_by_id(&self, id: i64) -> AppResult<CheckIn> {
        self.check_ins
            .check_in(self.project.id, id)?
            .ok_or(AppError::CheckInNotFound(id))
    }

    pub fn watch_check_in(&self, id: i64) -> AppResult<Snapshots<Option<CheckIn>>> {
        self.check_ins.watch_check_in(self.project.id, id)
    }

    // ---------------------------
    // Authorization
    // ---------------------------

    pub fn verify_password(&self, candidate: &str) -> bool {
        self.policy.accepts(&self.project, candidate)
    }

    pub fn authorize(&self, candidate: &str) -> AppResult<()> {
        if self.verify_password(candidate) {
            Ok(())
        } else {
            Err(AppError::WrongPassword(self.project.id))
        }
    }

    // ---------------------------
    // Commands
    // ---------------------------

    pub fn add_member(&mut self, name: &str) -> AppResult<Member> {
        let result = (|| -> AppResult<Member> {
            let member = Member::new(self.project.id, required("member name", name)?);
            self.members.add(&member)?;
            Ok(member)
        })();
        self.track("Failed to add member", result)
    }

    pub fn remove_member(&mut self, name: &str) -> AppResult<()> {
        let result = (|| -> AppResult<()> {
            let name = required("member name", name)?;
            if self.members.remove(self.project.id, name)? {
                Ok(())
            } else {
                Err(AppError::MemberNotFound {
                    project_id: self.project.id,
                    name: name.to_string(),
                })
            }
        })();
        self.track("Failed to remove member", result)
    }

    /// Record a check-in for a rostered member. The photo is copied into
    /// the project's photo directory; an earlier check-in of the same day
    /// is replaced.
    pub fn check_in(
        &mut self,
        member_name: &str,
        at: NaiveDateTime,
        location: &ResolvedLocation,
        photo: &Path,
    ) -> AppResult<CheckIn> {
        let result = (|| -> AppResult<CheckIn> {
            let member_name = required("member name", member_name)?;
            let place = required("location", &location.address)?;

            if !self.members.exists(self.project.id, member_name)? {
                return Err(AppError::MemberNotFound {
                    project_id: self.project.id,
                    name: member_name.to_string(),
                });
            }
            if !photo.is_file() {
                return Err(AppError::Photo(format!("{} is not a file", photo.display())));
            }

            let stored = self.store_photo(member_name, at, photo)?;

            let mut ci = CheckIn::new(
                self.project.id,
                member_name,
                at,
                place,
                &stored.to_string_lossy(),
                location.latitude,
                location.longitude,
            );
            match self.check_ins.insert(&ci) {
                Ok(id) => ci.id = id,
                Err(e) => {
                    let _ = fs::remove_file(&stored);
                    return Err(e);
                }
            }
            Ok(ci)
        })();
        self.track("Failed to check in", result)
    }

    fn store_photo(&self, member_name: &str, at: NaiveDateTime, photo: &Path) -> AppResult<PathBuf> {
        let dir = self.store.registry().photo_dir(self.project.id)?;

        let ext = photo
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("jpg")
            .to_ascii_lowercase();
        let safe_name: String = member_name
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();

        // Names can collide after sanitizing; the random suffix keeps
        // every stored photo distinct.
        let mut stored = Builder::new()
            .prefix(&format!("{}_{}_", safe_name, at.format("%Y%m%d_%H%M%S")))
            .suffix(&format!(".{ext}"))
            .tempfile_in(&dir)?;
        io::copy(&mut fs::File::open(photo)?, stored.as_file_mut())?;

        let (_, dest) = stored.keep().map_err(|e| AppError::Io(e.error))?;
        Ok(dest)
    }

    pub fn update_check_in(
        &mut self,
        id: i64,
        new_time: NaiveDateTime,
        new_location: &str,
    ) -> AppResult<()> {
        let result = (|| -> AppResult<()> {
            let place = required("location", new_location)?;
            if self.check_ins.update(self.project.id, id, new_time, place)? {
                Ok(())
            } else {
                Err(AppError::CheckInNotFound(id))
            }
        })();
        self.track("Failed to update check-in", result)
    }

    pub fn delete_check_in(&mut self, id: i64) -> AppResult<()> {
        let result = match self.check_ins.delete(self.project.id, id) {
            Ok(true) => Ok(()),
            Ok(false) => Err(AppError::CheckInNotFound(id)),
            Err(e) => Err(e),
        };
        self.track("Failed to delete check-in", result)
    }

    /// Export attendance of `[start, end]` to `target`. Returns `false` on
    /// failure, with the reason in [`CheckInDesk::state`].
    pub fn export(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        target: &Path,
        opts: &ExportOptions,
    ) -> bool {
        let loaded = (|| -> AppResult<(Vec<Member>, Vec<CheckIn>)> {
            let members = self.members()?;
            let check_ins = self.check_ins.in_range(self.project.id, start, end)?;
            Ok((members, check_ins))
        })();

        let (members, check_ins) = match self.track("Failed to read attendance", loaded) {
            Ok(data) => data,
            Err(e) => {
                error(format!("Export failed: {e}"));
                return false;
            }
        };

        let ok = export_attendance(&members, &check_ins, start, end, target, opts);
        if !ok {
            self.state = CheckInState::Error(format!("Failed to export to {}", target.display()));
        }
        ok
    }
}
