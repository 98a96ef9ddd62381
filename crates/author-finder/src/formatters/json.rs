//! JSON output formatting.

use serde_json::{Value, json};

use super::ProfileView;
use crate::search::{AuthorSummary, ListingPage};

/// Compact listing row.
#[must_use]
pub fn compact_summary(author: &AuthorSummary) -> Value {
    let mut obj = json!({
        "id": author.id,
        "name": author.name,
        "image": author.image,
    });

    if !author.affiliation.is_empty() {
        obj["affiliation"] = json!(author.affiliation);
    }

    obj
}

/// Listing page with metadata, navigation strip and partial-loss report.
#[must_use]
pub fn listing_json(listing: &ListingPage) -> Value {
    let mut obj = json!({
        "page": listing.window.page,
        "perPage": listing.window.per_page,
        "total": listing.window.total_count,
        "pages": listing.window.pages(),
        "hasPrev": listing.window.has_prev(),
        "hasNext": listing.window.has_next(),
        "window": listing.slots,
        "authors": listing.authors.iter().map(compact_summary).collect::<Vec<_>>(),
        "dropped": listing.dropped_count(),
    });

    if let Some(warning) = listing.warning() {
        obj["warning"] = json!(warning);
        obj["droppedPositions"] = json!(listing.dropped);
    }

    obj
}

/// Profile as JSON.
#[must_use]
pub fn profile_json(profile: &ProfileView) -> Value {
    json!(profile)
}
