//! Result listing and profile lookup.

use serde::Serialize;

use super::resolver::{ResolvedAuthor, StaleQueryResolver};
use crate::cache::ResultCache;
use crate::config::Config;
use crate::error::{FinderError, FinderResult};
use crate::keys::{AuthorId, FingerprintKey};
use crate::models::AuthorRecord;
use crate::pagination::{PageSlot, PageWindow, WindowShape, paginate};

/// One row of the results listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorSummary {
    /// Identifier for the profile link.
    pub id: AuthorId,
    /// Display name.
    pub name: String,
    /// Affiliations.
    pub affiliation: Vec<String>,
    /// Image URL, or the placeholder.
    pub image: String,
}

impl AuthorSummary {
    fn from_resolved(author: &ResolvedAuthor, default_image: &str) -> Self {
        Self {
            id: author.id.clone(),
            name: author.record.display_name(),
            affiliation: author.record.affiliation.clone(),
            image: author.record.image.clone().unwrap_or_else(|| default_image.to_string()),
        }
    }
}

/// A page of the results listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage {
    /// Page metadata.
    pub window: PageWindow,
    /// Navigation strip.
    pub slots: Vec<PageSlot>,
    /// Rows on this page.
    pub authors: Vec<AuthorSummary>,
    /// Positions of expired records in the full result list.
    pub dropped: Vec<usize>,
}

impl ListingPage {
    /// Number of records lost to expiry across the whole result list.
    #[must_use]
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    /// Warning text for partial result loss, if any.
    #[must_use]
    pub fn warning(&self) -> Option<String> {
        match self.dropped.len() {
            0 => None,
            1 => Some("1 result expired and is no longer shown.".to_string()),
            n => Some(format!("{n} results expired and are no longer shown.")),
        }
    }
}

/// Paged view over a resolved search.
#[derive(Debug, Clone)]
pub struct ResultListing {
    resolver: StaleQueryResolver,
    per_page: u32,
    shape: WindowShape,
    default_image: String,
}

impl ResultListing {
    #[must_use]
    pub fn new(cache: ResultCache, config: &Config) -> Self {
        Self {
            resolver: StaleQueryResolver::new(cache),
            per_page: config.per_page,
            shape: WindowShape::default(),
            default_image: config.default_image.clone(),
        }
    }

    /// Use a different navigation strip shape.
    #[must_use]
    pub const fn with_shape(mut self, shape: WindowShape) -> Self {
        self.shape = shape;
        self
    }

    /// Build page `page` (1-based) of the results for `key`.
    pub async fn page(&self, key: &FingerprintKey, page: u32) -> FinderResult<ListingPage> {
        if page == 0 {
            return Err(FinderError::validation("page", "must be a positive integer"));
        }

        let resolved = self.resolver.resolve(key).await?;
        let window = paginate(page, self.per_page, resolved.len());

        if window.is_out_of_range() {
            return Err(FinderError::PageOutOfRange { page, pages: window.pages() });
        }

        let authors = resolved.authors[window.item_range()]
            .iter()
            .map(|author| AuthorSummary::from_resolved(author, &self.default_image))
            .collect();

        Ok(ListingPage {
            window,
            slots: window.window(self.shape).collect(),
            authors,
            dropped: resolved.dropped,
        })
    }

    /// Like [`Self::page`] for a raw client token; malformed tokens count as expired.
    pub async fn page_for_token(&self, token: Option<&str>, page: u32) -> FinderResult<ListingPage> {
        let key = token.and_then(FingerprintKey::parse).ok_or(FinderError::QueryExpired)?;
        self.page(&key, page).await
    }
}

/// Direct profile reads by AuthorID.
#[derive(Debug, Clone)]
pub struct ProfileLookup {
    cache: ResultCache,
}

impl ProfileLookup {
    #[must_use]
    pub const fn new(cache: ResultCache) -> Self {
        Self { cache }
    }

    /// Fetch the cached record for `id`.
    pub async fn fetch(&self, id: &AuthorId) -> FinderResult<AuthorRecord> {
        self.cache
            .get_author(id)
            .await?
            .ok_or_else(|| FinderError::profile_expired(id.as_str()))
    }
}
