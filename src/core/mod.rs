pub mod auth;
pub mod board;
pub mod desk;
pub mod log;
pub mod validate;

pub use auth::PasswordPolicy;
pub use board::{ProjectBoard, ProjectListState};
pub use desk::{CheckInDesk, CheckInState};

use crate::config::Config;
use crate::db::StorageLayout;
use crate::errors::AppResult;
use crate::repo::Store;
use crate::ui::messages::warning;

/// Open the storage under the configured data dir and finish any project
/// deletion a previous run left half done.
pub fn open_store(cfg: &Config) -> AppResult<Store> {
    let store = Store::open(StorageLayout::new(cfg.data_path()));

    for report in store.projects().resume_pending_deletes()? {
        if !report.is_clean() {
            warning(format!(
                "Project {} is removed, but some files could not be deleted yet; cleanup is retried on the next start.",
                report.project_id
            ));
        }
    }

    Ok(store)
}

pub fn policy_from(cfg: &Config) -> PasswordPolicy {
    PasswordPolicy::new(cfg.master_password.clone())
}
