//! Fuzzing library for author-finder.
//!
//! This crate provides fuzzing targets for the engine payload and search
//! query parsers, and for the key derivation that runs on their output.
//!
//! # Usage
//!
//! ```bash
//! cd crates/author-finder-fuzz
//! cargo +nightly fuzz run fuzz_author_parse -- -max_total_time=60
//! ```

pub use author_finder::{keys, models};
