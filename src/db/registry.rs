//! Owner of every database handle of the process.
//!
//! One shared *main* database holds the project registry; each project gets
//! its own database file plus a photo directory. The registry is built once
//! at startup and handed to the repositories; handles are opened lazily and
//! live until [`DatabaseRegistry::release`], [`DatabaseRegistry::purge`] or
//! [`DatabaseRegistry::release_all`].

use crate::db::log::ttlog_quiet;
use crate::db::migrate::{run_main_migrations, run_project_migrations};
use crate::db::pool::DbPool;
use crate::db::projects;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use rusqlite::Connection;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// File-system layout under a single storage root.
#[derive(Debug, Clone)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn databases_dir(&self) -> PathBuf {
        self.root.join("databases")
    }

    pub fn files_dir(&self) -> PathBuf {
        self.root.join("files")
    }

    pub fn main_db(&self) -> PathBuf {
        self.databases_dir().join("main.db")
    }

    pub fn project_db(&self, project_id: i64) -> PathBuf {
        self.databases_dir().join(format!("project_{project_id}.db"))
    }

    /// The database file followed by its WAL and shared-memory side files.
    pub fn project_db_files(&self, project_id: i64) -> [PathBuf; 3] {
        let db = self.project_db(project_id);
        let wal = side_file(&db, "-wal");
        let shm = side_file(&db, "-shm");
        [db, wal, shm]
    }

    pub fn photo_dir(&self, project_id: i64) -> PathBuf {
        self.files_dir().join(format!("project_{project_id}"))
    }
}

fn side_file(db: &Path, suffix: &str) -> PathBuf {
    let mut name = db.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Shared, lock-protected connection.
#[derive(Clone)]
pub struct DbHandle(Arc<Mutex<DbPool>>);

impl DbHandle {
    fn new(pool: DbPool) -> Self {
        Self(Arc::new(Mutex::new(pool)))
    }

    pub fn with_conn<F, T>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        let mut pool = self
            .0
            .lock()
            .map_err(|_| AppError::Handle("connection lock poisoned".into()))?;
        pool.with_conn(func)
    }

    pub fn path(&self) -> AppResult<PathBuf> {
        let pool = self
            .0
            .lock()
            .map_err(|_| AppError::Handle("connection lock poisoned".into()))?;
        Ok(pool.path().to_path_buf())
    }

    /// Close the connection if this is the last reference to it.
    /// Otherwise the connection closes when the remaining users drop it.
    fn close(self) -> AppResult<bool> {
        match Arc::try_unwrap(self.0) {
            Ok(mutex) => {
                let pool = mutex
                    .into_inner()
                    .map_err(|_| AppError::Handle("connection lock poisoned".into()))?;
                pool.close()?;
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }
}

/// Outcome of one step of a project purge.
#[derive(Debug, Clone)]
pub struct PurgeStep {
    pub target: PathBuf,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PurgeReport {
    pub project_id: i64,
    pub steps: Vec<PurgeStep>,
}

impl PurgeReport {
    pub fn is_clean(&self) -> bool {
        self.steps.iter().all(|s| s.error.is_none())
    }

    pub fn failures(&self) -> impl Iterator<Item = &PurgeStep> {
        self.steps.iter().filter(|s| s.error.is_some())
    }
}

pub struct DatabaseRegistry {
    layout: StorageLayout,
    main: Mutex<Option<DbHandle>>,
    projects: Mutex<HashMap<i64, DbHandle>>,
}

impl DatabaseRegistry {
    pub fn new(layout: StorageLayout) -> Self {
        Self {
            layout,
            main: Mutex::new(None),
            projects: Mutex::new(HashMap::new()),
        }
    }

    pub fn layout(&self) -> &StorageLayout {
        &self.layout
    }

    fn lock_projects(&self) -> AppResult<MutexGuard<'_, HashMap<i64, DbHandle>>> {
        self.projects
            .lock()
            .map_err(|_| AppError::Handle("project cache lock poisoned".into()))
    }

    /// Shared registry database, opened and migrated on first use.
    pub fn main(&self) -> AppResult<DbHandle> {
        let mut slot = self
            .main
            .lock()
            .map_err(|_| AppError::Handle("main database lock poisoned".into()))?;

        if let Some(handle) = slot.as_ref() {
            return Ok(handle.clone());
        }

        fs::create_dir_all(self.layout.databases_dir())?;
        let pool = DbPool::new(&self.layout.main_db())?;
        run_main_migrations(&pool.conn)?;

        let handle = DbHandle::new(pool);
        *slot = Some(handle.clone());
        Ok(handle)
    }

    /// Acquire the database of an active project, opening it if needed.
    pub fn project(&self, project_id: i64) -> AppResult<DbHandle> {
        let active = self
            .main()?
            .with_conn(|conn| projects::is_active(conn, project_id))?;
        if !active {
            return Err(AppError::ProjectNotFound(project_id));
        }

        let mut cache = self.lock_projects()?;
        if let Some(handle) = cache.get(&project_id) {
            return Ok(handle.clone());
        }

        fs::create_dir_all(self.layout.databases_dir())?;
        let pool = DbPool::new(&self.layout.project_db(project_id))?;
        run_project_migrations(&pool.conn)?;

        let handle = DbHandle::new(pool);
        cache.insert(project_id, handle.clone());
        Ok(handle)
    }

    /// Handle on the database of a project being deleted, or `None` when
    /// its file is already gone. Never creates the file.
    pub fn project_for_purge(&self, project_id: i64) -> AppResult<Option<DbHandle>> {
        let mut cache = self.lock_projects()?;
        if let Some(handle) = cache.get(&project_id) {
            return Ok(Some(handle.clone()));
        }

        let path = self.layout.project_db(project_id);
        if !path.is_file() {
            return Ok(None);
        }

        let pool = DbPool::new(&path)?;
        run_project_migrations(&pool.conn)?;

        let handle = DbHandle::new(pool);
        cache.insert(project_id, handle.clone());
        Ok(Some(handle))
    }

    /// Ids of the project databases currently open.
    pub fn open_project_ids(&self) -> AppResult<Vec<i64>> {
        let mut ids: Vec<i64> = self.lock_projects()?.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    /// Close and evict a project handle. Returns `false` if none was cached.
    pub fn release(&self, project_id: i64) -> AppResult<bool> {
        let handle = self.lock_projects()?.remove(&project_id);

        match handle {
            Some(h) => {
                if !h.close()? {
                    warning(format!(
                        "Project {project_id} database still in use; it will close when released by its users."
                    ));
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Release every cached handle, the main database last.
    pub fn release_all(&self) -> AppResult<()> {
        let handles: Vec<DbHandle> = self.lock_projects()?.drain().map(|(_, h)| h).collect();
        for h in handles {
            h.close()?;
        }

        let main = self
            .main
            .lock()
            .map_err(|_| AppError::Handle("main database lock poisoned".into()))?
            .take();
        if let Some(h) = main {
            h.close()?;
        }
        Ok(())
    }

    /// Photo directory of a project, created on demand.
    pub fn photo_dir(&self, project_id: i64) -> AppResult<PathBuf> {
        let dir = self.layout.photo_dir(project_id);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Remove every on-disk trace of a project.
    ///
    /// Steps run in order: release the handle, delete the database file and
    /// its `-wal` / `-shm` side files, delete the photo directory. A failing
    /// step is logged and reported, and the sequence continues. Missing files
    /// count as removed, so the purge can be repeated after an interruption.
    pub fn purge(&self, project_id: i64) -> PurgeReport {
        let mut steps = Vec::new();

        if let Err(e) = self.release(project_id) {
            steps.push(PurgeStep {
                target: self.layout.project_db(project_id),
                error: Some(format!("release failed: {e}")),
            });
        }

        for file in self.layout.project_db_files(project_id) {
            let error = match fs::remove_file(&file) {
                Ok(()) => None,
                Err(e) if e.kind() == io::ErrorKind::NotFound => None,
                Err(e) => Some(e.to_string()),
            };
            steps.push(PurgeStep {
                target: file,
                error,
            });
        }

        let photos = self.layout.photo_dir(project_id);
        let error = match fs::remove_dir_all(&photos) {
            Ok(()) => None,
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => Some(e.to_string()),
        };
        steps.push(PurgeStep {
            target: photos,
            error,
        });

        let report = PurgeReport { project_id, steps };
        self.log_purge_failures(&report);
        report
    }

    fn log_purge_failures(&self, report: &PurgeReport) {
        let failures: Vec<&PurgeStep> = report.failures().collect();
        if failures.is_empty() {
            return;
        }

        let main = self.main();
        for step in failures {
            let message = format!(
                "Failed to remove {}: {}",
                step.target.display(),
                step.error.as_deref().unwrap_or_default()
            );
            warning(&message);

            if let Ok(handle) = &main {
                let _ = handle.with_conn(|conn| {
                    ttlog_quiet(conn, "purge_failed", &format!("project_{}", report.project_id), &message);
                    Ok(())
                });
            }
        }
    }
}
