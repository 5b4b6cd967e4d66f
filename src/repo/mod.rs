//! Repositories: orchestration over the persistence layer plus change
//! notification for observers.

pub mod check_in;
pub mod feed;
pub mod member;
pub mod project;

pub use check_in::CheckInRepository;
pub use feed::{ChangeFeed, Snapshots, Topic};
pub use member::MemberRepository;
pub use project::ProjectRepository;

use crate::db::{DatabaseRegistry, StorageLayout};
use std::sync::Arc;

/// Registry + change feed shared by every repository of the process.
#[derive(Clone)]
pub struct Store {
    registry: Arc<DatabaseRegistry>,
    feed: Arc<ChangeFeed>,
}

impl Store {
    pub fn open(layout: StorageLayout) -> Self {
        Self {
            registry: Arc::new(DatabaseRegistry::new(layout)),
            feed: Arc::new(ChangeFeed::default()),
        }
    }

    pub fn registry(&self) -> &DatabaseRegistry {
        &self.registry
    }

    pub fn projects(&self) -> ProjectRepository {
        ProjectRepository::new(self.clone())
    }

    pub fn members(&self) -> MemberRepository {
        MemberRepository::new(self.clone())
    }

    pub fn check_ins(&self) -> CheckInRepository {
        CheckInRepository::new(self.clone())
    }

    pub(crate) fn notify(&self, topic: Topic) {
        self.feed.notify(topic);
    }
}
