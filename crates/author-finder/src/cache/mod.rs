//! Ephemeral result cache.
//!
//! One TTL-scoped key space holds two kinds of entries:
//! - query fingerprint -> JSON list of AuthorIDs, in aggregation order
//! - AuthorID -> JSON author record
//!
//! Entries expire on their own and are never deleted explicitly. Absence is
//! the only "not found" signal: a never-written key and an expired key look
//! the same. Each key is read and written atomically; nothing spans keys,
//! so an ID list may point at author entries that have already expired.

mod memory;

pub use memory::MemoryStore;

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::FinderResult;
use crate::keys::{AuthorId, FingerprintKey};
use crate::models::AuthorRecord;

/// Key-value store with per-entry TTL.
///
/// `put` overwrites unconditionally and restarts the TTL countdown; `get`
/// returns `None` once the TTL since the last `put` has elapsed.
#[async_trait::async_trait]
pub trait CacheStore: Send + Sync {
    /// Store `value` under `key` for `ttl`.
    async fn put(&self, key: &str, value: String, ttl: Duration);

    /// Fetch the live value under `key`.
    async fn get(&self, key: &str) -> Option<String>;
}

/// Typed view over a [`CacheStore`] with the configured TTLs.
#[derive(Clone)]
pub struct ResultCache {
    store: Arc<dyn CacheStore>,
    query_ttl: Duration,
    author_ttl: Duration,
}

impl ResultCache {
    /// Wrap a store.
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>, query_ttl: Duration, author_ttl: Duration) -> Self {
        Self { store, query_ttl, author_ttl }
    }

    /// In-memory cache sized and timed from configuration.
    #[must_use]
    pub fn in_memory(config: &Config) -> Self {
        Self::new(
            Arc::new(MemoryStore::new(config.cache_max_size)),
            config.query_ttl,
            config.author_ttl,
        )
    }

    /// Raw write.
    pub async fn put(&self, key: &str, value: String, ttl: Duration) {
        self.store.put(key, value, ttl).await;
    }

    /// Raw read.
    pub async fn get(&self, key: &str) -> Option<String> {
        self.store.get(key).await
    }

    /// Store an author record under its identifier.
    pub async fn put_author(&self, id: &AuthorId, record: &AuthorRecord) -> FinderResult<()> {
        let payload = serde_json::to_string(record)?;
        tracing::debug!(author_id = %id, "Caching author record");
        self.put(id.as_str(), payload, self.author_ttl).await;
        Ok(())
    }

    /// Fetch an author record; `None` if absent or expired.
    pub async fn get_author(&self, id: &AuthorId) -> FinderResult<Option<AuthorRecord>> {
        match self.get(id.as_str()).await {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    /// Store the ordered AuthorID list of a query.
    pub async fn put_query(&self, key: &FingerprintKey, ids: &[AuthorId]) -> FinderResult<()> {
        let payload = serde_json::to_string(ids)?;
        tracing::debug!(fingerprint = %key, authors = ids.len(), "Caching query pointers");
        self.put(key.as_str(), payload, self.query_ttl).await;
        Ok(())
    }

    /// Fetch the AuthorID list of a query; `None` if absent or expired.
    pub async fn get_query(&self, key: &FingerprintKey) -> FinderResult<Option<Vec<AuthorId>>> {
        match self.get(key.as_str()).await {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    /// TTL applied to query-level entries.
    #[must_use]
    pub const fn query_ttl(&self) -> Duration {
        self.query_ttl
    }

    /// TTL applied to author entries.
    #[must_use]
    pub const fn author_ttl(&self) -> Duration {
        self.author_ttl
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("query_ttl", &self.query_ttl)
            .field("author_ttl", &self.author_ttl)
            .finish()
    }
}
