//! Data models for search queries and author records.
//!
//! Optional engine-supplied fields use `#[serde(default)]` and accept either
//! a single string or a list.

mod author;
mod enums;
mod query;

pub use author::{AuthorName, AuthorRecord, Publication};
pub use enums::ResponseFormat;
pub use query::{QueryArguments, SearchQuery, YearRange};
