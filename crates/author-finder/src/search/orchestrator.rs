//! Search submission.

use std::sync::Arc;

use crate::cache::ResultCache;
use crate::client::Aggregator;
use crate::error::{FinderError, FinderResult};
use crate::keys::{AuthorId, FingerprintKey, fingerprint};
use crate::models::SearchQuery;

/// Runs searches and caches their results.
#[derive(Clone)]
pub struct SearchOrchestrator {
    aggregator: Arc<dyn Aggregator>,
    cache: ResultCache,
}

impl SearchOrchestrator {
    #[must_use]
    pub fn new(aggregator: Arc<dyn Aggregator>, cache: ResultCache) -> Self {
        Self { aggregator, cache }
    }

    /// Run `query` and return its fingerprint.
    ///
    /// Each returned record is cached under its AuthorID, then the ordered
    /// ID list is cached under the fingerprint. If the aggregator fails,
    /// nothing is written.
    pub async fn run(&self, query: &SearchQuery) -> FinderResult<FingerprintKey> {
        query.validate()?;

        let engines = query.engine_list();
        if let Some(unknown) = engines.iter().find(|e| !self.aggregator.knows_engine(e)) {
            return Err(FinderError::validation(
                "engines",
                format!("unknown search engine '{unknown}'"),
            ));
        }

        let key = fingerprint(query);
        tracing::info!(fingerprint = %key, engines = ?engines, "Running search");

        let records = self
            .aggregator
            .aggregate(&query.arguments(), &engines)
            .await
            .map_err(FinderError::Aggregator)?;

        let mut pointers = Vec::with_capacity(records.len());
        for record in &records {
            let id = AuthorId::of(record);
            self.cache.put_author(&id, record).await?;
            pointers.push(id);
        }

        self.cache.put_query(&key, &pointers).await?;
        tracing::info!(fingerprint = %key, authors = pointers.len(), "Search cached");

        Ok(key)
    }
}

impl std::fmt::Debug for SearchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchOrchestrator").field("cache", &self.cache).finish()
    }
}
