//! Search, listing and profile operations over the result cache.
//!
//! - [`SearchOrchestrator`] runs a query through the aggregator and caches
//!   the results under the query fingerprint.
//! - [`StaleQueryResolver`] turns a fingerprint back into author records,
//!   reporting entries that expired on their own.
//! - [`ResultListing`] pages a resolved list for display.
//! - [`ProfileLookup`] reads a single author record by AuthorID.

mod listing;
mod orchestrator;
mod resolver;

pub use listing::{AuthorSummary, ListingPage, ProfileLookup, ResultListing};
pub use orchestrator::SearchOrchestrator;
pub use resolver::{ResolvedAuthor, ResolvedList, StaleQueryResolver};
