//! Per-entry cache of resolved links.
//!
//! Keyed by link type and target id only: targets are always fetched for
//! every locale, so one cached resource answers reads in any locale.
//!
//! The map grows only. Each key owns a [`OnceCell`], so concurrent readers of
//! the same link wait on a single fetch instead of racing their own. A failed
//! fetch leaves the cell empty and the next reader tries again.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::clients::ResolveError;
use crate::engine::Entry;
use crate::model::Link;

#[derive(Default)]
pub struct LinkCache {
    slots: Mutex<HashMap<Link, Arc<OnceCell<Entry>>>>,
}

impl LinkCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached target of `link`, running `fetch` on a miss.
    ///
    /// `fetch` runs at most once per link until it succeeds.
    pub async fn get_or_resolve<F, Fut>(&self, link: &Link, fetch: F) -> Result<Entry, ResolveError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Entry, ResolveError>>,
    {
        let slot = self.slot(link);
        if let Some(hit) = slot.get() {
            debug!(link_type = %link.link_type(), link_id = link.id(), "Link cache hit");
            return Ok(hit.clone());
        }
        let entry = slot
            .get_or_try_init(|| {
                debug!(link_type = %link.link_type(), link_id = link.id(), "Link cache miss");
                fetch()
            })
            .await?;
        Ok(entry.clone())
    }

    /// Whether `link` has a resolved target cached.
    pub fn contains(&self, link: &Link) -> bool {
        self.lock()
            .get(link)
            .is_some_and(|slot| slot.initialized())
    }

    /// Number of resolved targets.
    pub fn len(&self) -> usize {
        self.lock().values().filter(|slot| slot.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, link: &Link) -> Arc<OnceCell<Entry>> {
        self.lock().entry(link.clone()).or_default().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Link, Arc<OnceCell<Entry>>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
