//! In-memory store backed by `moka` with per-entry TTL.

use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::Expiry;
use moka::future::Cache;

use super::CacheStore;

#[derive(Clone)]
struct Entry {
    payload: Arc<str>,
    ttl: Duration,
}

/// Expiry policy: every write restarts the countdown with the entry's own TTL.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, value: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Process-local TTL store.
#[derive(Clone)]
pub struct MemoryStore {
    entries: Cache<String, Entry>,
}

impl MemoryStore {
    /// Create a store holding at most `max_capacity` entries.
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        let entries = Cache::builder().max_capacity(max_capacity).expire_after(PerEntryTtl).build();
        Self { entries }
    }

    /// Approximate number of live entries.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }
}

#[async_trait::async_trait]
impl CacheStore for MemoryStore {
    async fn put(&self, key: &str, value: String, ttl: Duration) {
        let entry = Entry { payload: Arc::from(value), ttl };
        self.entries.insert(key.to_string(), entry).await;
    }

    async fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).await.map(|entry| entry.payload.to_string())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").field("entries", &self.entry_count()).finish()
    }
}
