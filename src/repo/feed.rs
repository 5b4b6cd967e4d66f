//! Change notification for observable reads.

use crate::errors::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::watch;

/// What a write touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Projects,
    Members(i64),
    CheckIns(i64),
}

/// One version counter per topic, bumped after each committed write.
#[derive(Default)]
pub struct ChangeFeed {
    senders: Mutex<HashMap<Topic, watch::Sender<u64>>>,
}

impl ChangeFeed {
    pub fn subscribe(&self, topic: Topic) -> AppResult<watch::Receiver<u64>> {
        let mut senders = self
            .senders
            .lock()
            .map_err(|_| AppError::Other("change feed lock poisoned".into()))?;
        Ok(senders
            .entry(topic)
            .or_insert_with(|| watch::channel(0).0)
            .subscribe())
    }

    /// Wake every subscriber of `topic`. Topics nobody watches are skipped.
    pub fn notify(&self, topic: Topic) {
        if let Ok(senders) = self.senders.lock()
            && let Some(tx) = senders.get(&topic)
        {
            tx.send_modify(|version| *version = version.wrapping_add(1));
        }
    }
}

type Loader<T> = Box<dyn Fn() -> AppResult<T> + Send + Sync>;

/// A live query: yields the current snapshot, then a fresh one after every
/// write to the watched topic. Writes that land between two `next()` calls
/// are coalesced into a single snapshot.
pub struct Snapshots<T> {
    rx: watch::Receiver<u64>,
    load: Loader<T>,
    primed: bool,
}

impl<T> Snapshots<T> {
    pub(crate) fn new(rx: watch::Receiver<u64>, load: Loader<T>) -> Self {
        Self {
            rx,
            load,
            primed: false,
        }
    }

    pub async fn next(&mut self) -> AppResult<T> {
        if self.primed {
            self.rx
                .changed()
                .await
                .map_err(|_| AppError::Other("change feed closed".into()))?;
        }
        self.primed = true;
        (self.load)()
    }

    /// Re-run the query without waiting.
    pub fn current(&self) -> AppResult<T> {
        (self.load)()
    }

    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }
}
