use super::{Snapshots, Store, Topic};
use crate::db::log::ttlog_quiet;
use crate::db::{PurgeReport, check_ins, members, projects};
use crate::errors::{AppError, AppResult};
use crate::models::Project;
use crate::ui::messages::warning;

#[derive(Clone)]
pub struct ProjectRepository {
    store: Store,
}

impl ProjectRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn all(&self) -> AppResult<Vec<Project>> {
        self.store.registry().main()?.with_conn(|conn| projects::list_active(conn))
    }

    pub fn watch_all(&self) -> AppResult<Snapshots<Vec<Project>>> {
        let rx = self.store.feed.subscribe(Topic::Projects)?;
        let repo = self.clone();
        Ok(Snapshots::new(rx, Box::new(move || repo.all())))
    }

    pub fn by_id(&self, id: i64) -> AppResult<Option<Project>> {
        self.store
            .registry()
            .main()?
            .with_conn(|conn| projects::get_by_id(conn, id))
    }

    pub fn require(&self, id: i64) -> AppResult<Project> {
        self.by_id(id)?.ok_or(AppError::ProjectNotFound(id))
    }

    /// Persist a new project and return its id.
    pub fn create(&self, project: &Project) -> AppResult<i64> {
        let id = self.store.registry().main()?.with_conn(|conn| {
            let id = projects::insert(conn, project)?;
            ttlog_quiet(
                conn,
                "project_add",
                &format!("project_{id}"),
                &format!("Created project '{}'", project.name),
            );
            Ok(id)
        })?;

        self.store.notify(Topic::Projects);
        Ok(id)
    }

    pub fn update_password(&self, id: i64, new_password: &str) -> AppResult<()> {
        let updated = self.store.registry().main()?.with_conn(|conn| {
            let updated = projects::update_password(conn, id, new_password)?;
            if updated {
                ttlog_quiet(conn, "project_passwd", &format!("project_{id}"), "Password changed");
            }
            Ok(updated)
        })?;

        if !updated {
            return Err(AppError::ProjectNotFound(id));
        }
        self.store.notify(Topic::Projects);
        Ok(())
    }

    /// Journaled delete: flag the row, purge files, then drop the row.
    pub fn delete(&self, id: i64) -> AppResult<PurgeReport> {
        let main = self.store.registry().main()?;

        let found = main.with_conn(|conn| projects::mark_pending_delete(conn, id))?;
        if !found {
            return Err(AppError::ProjectNotFound(id));
        }
        self.store.notify(Topic::Projects);

        self.finish_delete(id)
    }

    /// Empty the project database, purge its files, and drop the registry
    /// row once nothing is left. An unclean purge keeps the row flagged so
    /// the next start retries it.
    fn finish_delete(&self, id: i64) -> AppResult<PurgeReport> {
        if let Err(e) = self.clear_rows(id) {
            warning(format!("Could not empty the database of project {id}: {e}"));
        }

        let report = self.store.registry().purge(id);

        self.store.registry().main()?.with_conn(|conn| {
            if report.is_clean() {
                projects::delete_by_id(conn, id)?;
                ttlog_quiet(conn, "project_del", &format!("project_{id}"), "Project deleted");
            } else {
                ttlog_quiet(
                    conn,
                    "project_del",
                    &format!("project_{id}"),
                    "Project removed, cleanup of leftover files pending",
                );
            }
            Ok(())
        })?;

        self.store.notify(Topic::Projects);
        self.store.notify(Topic::Members(id));
        self.store.notify(Topic::CheckIns(id));
        Ok(report)
    }

    fn clear_rows(&self, id: i64) -> AppResult<()> {
        let Some(handle) = self.store.registry().project_for_purge(id)? else {
            return Ok(());
        };

        handle.with_conn(|conn| {
            let tx = conn.transaction()?;
            let removed_check_ins = check_ins::delete_by_project(&tx, id)?;
            let removed_members = members::delete_by_project(&tx, id)?;
            ttlog_quiet(
                &tx,
                "project_clear",
                &format!("project_{id}"),
                &format!("Removed {removed_members} members and {removed_check_ins} check-ins"),
            );
            tx.commit()?;
            Ok(())
        })
    }

    /// Retry every deletion whose registry row is still flagged.
    pub fn resume_pending_deletes(&self) -> AppResult<Vec<PurgeReport>> {
        let pending = self
            .store
            .registry()
            .main()?
            .with_conn(|conn| projects::list_pending_delete(conn))?;

        let mut reports = Vec::with_capacity(pending.len());
        for id in pending {
            reports.push(self.finish_delete(id)?);
        }
        Ok(reports)
    }
}
