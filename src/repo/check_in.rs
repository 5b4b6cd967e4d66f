use super::{Snapshots, Store, Topic};
use crate::db::check_ins;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::models::CheckIn;
use crate::ui::messages::warning;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::io;
use std::path::Path;

#[derive(Clone)]
pub struct CheckInRepository {
    store: Store,
}

impl CheckInRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// All check-ins of a project, newest first.
    pub fn check_ins_of(&self, project_id: i64) -> AppResult<Vec<CheckIn>> {
        self.store
            .registry()
            .project(project_id)?
            .with_conn(|conn| check_ins::list_by_project(conn, project_id))
    }

    pub fn watch_check_ins(&self, project_id: i64) -> AppResult<Snapshots<Vec<CheckIn>>> {
        let rx = self.store.feed.subscribe(Topic::CheckIns(project_id))?;
        let repo = self.clone();
        Ok(Snapshots::new(rx, Box::new(move || repo.check_ins_of(project_id))))
    }

    pub fn in_range(
        &self,
        project_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<CheckIn>> {
        self.store
            .registry()
            .project(project_id)?
            .with_conn(|conn| check_ins::list_in_range(conn, project_id, start, end))
    }

    pub fn check_in(&self, project_id: i64, id: i64) -> AppResult<Option<CheckIn>> {
        self.store
            .registry()
            .project(project_id)?
            .with_conn(|conn| check_ins::get_by_id(conn, id))
    }

    pub fn watch_check_in(&self, project_id: i64, id: i64) -> AppResult<Snapshots<Option<CheckIn>>> {
        let rx = self.store.feed.subscribe(Topic::CheckIns(project_id))?;
        let repo = self.clone();
        Ok(Snapshots::new(rx, Box::new(move || repo.check_in(project_id, id))))
    }

    /// Insert a check-in, replacing any row of the same member on the same
    /// calendar day. Returns the new id.
    pub fn insert(&self, ci: &CheckIn) -> AppResult<i64> {
        let (id, replaced) = self
            .store
            .registry()
            .project(ci.project_id)?
            .with_conn(|conn| {
                let tx = conn.transaction()?;
                let replaced = check_ins::delete_same_day(
                    &tx,
                    ci.project_id,
                    &ci.member_name,
                    &ci.check_in_time,
                    None,
                )?;
                let id = check_ins::insert(&tx, ci)?;
                ttlog_quiet(
                    &tx,
                    "check_in",
                    &ci.member_name,
                    &format!("Checked in at {} ({})", ci.timestamp_str(), ci.location),
                );
                tx.commit()?;
                Ok((id, replaced))
            })?;

        self.discard_photos(ci.project_id, &replaced);
        self.store.notify(Topic::CheckIns(ci.project_id));
        Ok(id)
    }

    /// Change time and location of a check-in. Moving it onto a day where
    /// the member already checked in replaces that other row.
    /// Returns `false` when the id is unknown.
    pub fn update(
        &self,
        project_id: i64,
        id: i64,
        new_time: NaiveDateTime,
        new_location: &str,
    ) -> AppResult<bool> {
        let replaced = self
            .store
            .registry()
            .project(project_id)?
            .with_conn(|conn| {
                let tx = conn.transaction()?;

                let Some(existing) = check_ins::get_by_id(&tx, id)? else {
                    return Ok(None);
                };

                let mut edited = CheckIn::new(
                    existing.project_id,
                    &existing.member_name,
                    new_time,
                    new_location,
                    &existing.photo_path,
                    existing.latitude,
                    existing.longitude,
                );
                edited.id = id;

                let replaced = check_ins::delete_same_day(
                    &tx,
                    project_id,
                    &edited.member_name,
                    &edited.check_in_time,
                    Some(id),
                )?;
                check_ins::update(&tx, &edited)?;
                ttlog_quiet(
                    &tx,
                    "check_in_edit",
                    &format!("check_in_{id}"),
                    &format!("Moved to {} ({})", edited.timestamp_str(), edited.location),
                );
                tx.commit()?;
                Ok(Some(replaced))
            })?;

        let Some(replaced) = replaced else {
            return Ok(false);
        };
        self.discard_photos(project_id, &replaced);
        self.store.notify(Topic::CheckIns(project_id));
        Ok(true)
    }

    pub fn delete(&self, project_id: i64, id: i64) -> AppResult<bool> {
        let photo = self
            .store
            .registry()
            .project(project_id)?
            .with_conn(|conn| {
                let photo = check_ins::delete_by_id(conn, id)?;
                if photo.is_some() {
                    ttlog_quiet(conn, "check_in_del", &format!("check_in_{id}"), "Check-in deleted");
                }
                Ok(photo)
            })?;

        let Some(photo) = photo else {
            return Ok(false);
        };
        self.discard_photos(project_id, &[photo]);
        self.store.notify(Topic::CheckIns(project_id));
        Ok(true)
    }

    /// Best-effort removal of photos that no row points at any more.
    /// Only files inside the project's photo directory are touched.
    fn discard_photos(&self, project_id: i64, photos: &[String]) {
        let dir = self.store.registry().layout().photo_dir(project_id);

        for photo in photos.iter().map(Path::new).filter(|p| p.starts_with(&dir)) {
            match fs::remove_file(photo) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => warning(format!("Could not remove photo {}: {e}", photo.display())),
            }
        }
    }
}
