//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use author_finder::cache::{MemoryStore, ResultCache};
use author_finder::client::Aggregator;
use author_finder::error::{ClientError, ClientResult};
use author_finder::models::{AuthorRecord, QueryArguments, SearchQuery};

/// In-process aggregator with canned per-engine answers.
#[derive(Default)]
pub struct StubAggregator {
    answers: BTreeMap<String, Vec<AuthorRecord>>,
    failing: BTreeSet<String>,
    calls: AtomicUsize,
}

impl StubAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(mut self, name: &str, records: Vec<AuthorRecord>) -> Self {
        self.answers.insert(name.to_string(), records);
        self
    }

    pub fn with_failing_engine(mut self, name: &str) -> Self {
        self.answers.insert(name.to_string(), Vec::new());
        self.failing.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Aggregator for StubAggregator {
    async fn aggregate(
        &self,
        _arguments: &QueryArguments,
        engines: &[String],
    ) -> ClientResult<Vec<AuthorRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut records = Vec::new();
        for engine in engines {
            if self.failing.contains(engine) {
                return Err(ClientError::server(503, format!("{engine} unavailable")));
            }
            let answer =
                self.answers.get(engine).ok_or_else(|| ClientError::UnknownEngine(engine.clone()))?;
            records.extend(answer.iter().cloned());
        }
        Ok(records)
    }

    fn knows_engine(&self, engine: &str) -> bool {
        self.answers.contains_key(engine)
    }
}

/// Minimal record with one affiliation.
pub fn author(name: &str, affiliation: &str) -> AuthorRecord {
    AuthorRecord::new(name, vec![affiliation.to_string()])
}

/// `count` distinct records named `{prefix} {i}`.
pub fn authors(prefix: &str, count: usize) -> Vec<AuthorRecord> {
    (0..count).map(|i| author(&format!("{prefix} {i}"), "Example University")).collect()
}

/// Query on the last name over the given engines.
pub fn query(last_name: &str, engines: &[&str]) -> SearchQuery {
    SearchQuery {
        last_name: last_name.to_string(),
        engines: engines.iter().map(|e| (*e).to_string()).collect(),
        ..SearchQuery::default()
    }
}

/// In-memory cache with explicit TTLs.
pub fn cache(query_ttl: Duration, author_ttl: Duration) -> ResultCache {
    ResultCache::new(Arc::new(MemoryStore::new(10_000)), query_ttl, author_ttl)
}
