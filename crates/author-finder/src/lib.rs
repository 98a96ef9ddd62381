//! Author Finder
//!
//! Person search across academic search engines. A search fans out to the
//! selected engines, the merged result list is cached under a fingerprint
//! of the query, and listings and profile pages are served from that cache
//! until it expires.
//!
//! # Features
//!
//! - **Fingerprinted queries**: identical searches share one cache entry
//! - **Per-entry TTL**: query and author entries expire independently
//! - **Partial recovery**: listings survive individual author expiry
//! - **Paged listings**: navigation strips with elided page runs
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use author_finder::{Config, FinderServer, HttpAggregator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let aggregator = HttpAggregator::new(&config)?;
//!     let server = FinderServer::new(&config, Arc::new(aggregator));
//!
//!     server.run_http(8000).await
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod keys;
pub mod models;
pub mod pagination;
pub mod search;
pub mod server;

pub use cache::{CacheStore, ResultCache};
pub use client::{Aggregator, HttpAggregator};
pub use config::Config;
pub use error::{ClientError, FinderError};
pub use keys::{AuthorId, FingerprintKey};
pub use server::FinderServer;
