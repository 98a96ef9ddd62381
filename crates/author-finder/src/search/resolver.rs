//! Fingerprint resolution.

use serde::Serialize;

use crate::cache::ResultCache;
use crate::error::{FinderError, FinderResult};
use crate::keys::{AuthorId, FingerprintKey};
use crate::models::AuthorRecord;

/// An author record together with the identifier it is cached under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAuthor {
    pub id: AuthorId,
    pub record: AuthorRecord,
}

/// Records a fingerprint still resolves to, plus what was lost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedList {
    /// Surviving records in aggregation order.
    pub authors: Vec<ResolvedAuthor>,
    /// Positions in the original ID list whose records had expired.
    pub dropped: Vec<usize>,
}

impl ResolvedList {
    /// Number of referenced records that were missing.
    #[must_use]
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    /// Some referenced records were missing.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.dropped.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.authors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}

/// Decides whether a previously issued fingerprint is still usable.
#[derive(Debug, Clone)]
pub struct StaleQueryResolver {
    cache: ResultCache,
}

impl StaleQueryResolver {
    #[must_use]
    pub const fn new(cache: ResultCache) -> Self {
        Self { cache }
    }

    /// Resolve `key` to its author records.
    ///
    /// Fails with [`FinderError::QueryExpired`] if the query entry is gone,
    /// regardless of whether the author entries it points at are alive.
    /// Author entries that have expired are skipped and reported in
    /// [`ResolvedList::dropped`].
    pub async fn resolve(&self, key: &FingerprintKey) -> FinderResult<ResolvedList> {
        let ids = self.cache.get_query(key).await?.ok_or(FinderError::QueryExpired)?;

        let mut resolved = ResolvedList::default();
        for (position, id) in ids.into_iter().enumerate() {
            match self.cache.get_author(&id).await? {
                Some(record) => resolved.authors.push(ResolvedAuthor { id, record }),
                None => resolved.dropped.push(position),
            }
        }

        if resolved.is_partial() {
            tracing::warn!(
                fingerprint = %key,
                dropped = resolved.dropped_count(),
                kept = resolved.len(),
                "Some cached authors expired before their query"
            );
        }

        Ok(resolved)
    }

    /// Resolve a raw client token; malformed tokens count as expired.
    pub async fn resolve_token(&self, token: Option<&str>) -> FinderResult<ResolvedList> {
        let key = token.and_then(FingerprintKey::parse).ok_or(FinderError::QueryExpired)?;
        self.resolve(&key).await
    }
}
