use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use crate::entity::TokenSnapshot;
use crate::services::clock::is_fresh;

/// The single entry of a single-key cache
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub snapshot: Arc<TokenSnapshot>,
    pub fetched_at: DateTime<Utc>,
}

/// Slot holding the current entry. Writers swap the whole entry, so readers
/// see either the previous snapshot or the new one.
#[derive(Debug, Default)]
pub struct CacheSlot {
    entry: RwLock<Option<CacheEntry>>,
}

impl CacheSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&self, now: DateTime<Utc>, ttl: Duration) -> Option<Arc<TokenSnapshot>> {
        let entry = self.entry.read().unwrap_or_else(PoisonError::into_inner);

        entry
            .as_ref()
            .filter(|entry| is_fresh(entry.fetched_at, now, ttl))
            .map(|entry| entry.snapshot.clone())
    }

    pub fn replace(&self, snapshot: Arc<TokenSnapshot>, fetched_at: DateTime<Utc>) {
        let mut entry = self.entry.write().unwrap_or_else(PoisonError::into_inner);
        *entry = Some(CacheEntry {
            snapshot,
            fetched_at,
        });
    }
}
