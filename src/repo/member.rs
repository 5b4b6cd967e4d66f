use super::{Snapshots, Store, Topic};
use crate::db::log::ttlog_quiet;
use crate::db::members;
use crate::errors::AppResult;
use crate::models::Member;

#[derive(Clone)]
pub struct MemberRepository {
    store: Store,
}

impl MemberRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn members_of(&self, project_id: i64) -> AppResult<Vec<Member>> {
        self.store
            .registry()
            .project(project_id)?
            .with_conn(|conn| members::list_by_project(conn, project_id))
    }

    pub fn watch_members(&self, project_id: i64) -> AppResult<Snapshots<Vec<Member>>> {
        let rx = self.store.feed.subscribe(Topic::Members(project_id))?;
        let repo = self.clone();
        Ok(Snapshots::new(rx, Box::new(move || repo.members_of(project_id))))
    }

    pub fn exists(&self, project_id: i64, name: &str) -> AppResult<bool> {
        self.store
            .registry()
            .project(project_id)?
            .with_conn(|conn| members::exists(conn, project_id, name))
    }

    pub fn add(&self, member: &Member) -> AppResult<()> {
        self.store
            .registry()
            .project(member.project_id)?
            .with_conn(|conn| {
                members::insert(conn, member)?;
                ttlog_quiet(conn, "member_add", &member.name, "Added to roster");
                Ok(())
            })?;

        self.store.notify(Topic::Members(member.project_id));
        Ok(())
    }

    /// Returns `false` when the name was not on the roster.
    pub fn remove(&self, project_id: i64, name: &str) -> AppResult<bool> {
        let removed = self
            .store
            .registry()
            .project(project_id)?
            .with_conn(|conn| {
                let removed = members::delete_by_name(conn, project_id, name)?;
                if removed > 0 {
                    ttlog_quiet(conn, "member_del", name, "Removed from roster");
                }
                Ok(removed)
            })?;

        if removed > 0 {
            self.store.notify(Topic::Members(project_id));
        }
        Ok(removed > 0)
    }
}
