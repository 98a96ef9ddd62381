//! Query fingerprints.

use std::fmt;

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use super::{is_versioned_hex, write_field};
use crate::models::SearchQuery;

/// Fingerprint scheme version.
pub const FINGERPRINT_VERSION: &str = "q1";

/// Opaque key identifying a submitted search.
///
/// Handed to the client after a search and presented back on listing
/// requests; the core keeps no notion of a "current" query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FingerprintKey(String);

impl FingerprintKey {
    /// Accept a client-presented token if it is well formed.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        is_versioned_hex(token, FINGERPRINT_VERSION, 32).then(|| Self(token.to_string()))
    }

    /// Key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FingerprintKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the fingerprint of a query.
///
/// Hashes every normalized argument in sorted key order, with empty values
/// kept as the empty string, followed by the canonical engine selection.
/// Two queries that differ only in the engines they selected get different
/// fingerprints.
#[must_use]
pub fn fingerprint(query: &SearchQuery) -> FingerprintKey {
    let mut hasher = Md5::new();
    write_field(&mut hasher, FINGERPRINT_VERSION.as_bytes());

    for (key, value) in query.arguments().iter() {
        write_field(&mut hasher, key.as_bytes());
        write_field(&mut hasher, value.as_bytes());
    }

    let engines = query.engine_list();
    write_field(&mut hasher, b"engines");
    hasher.update((engines.len() as u64).to_le_bytes());
    for engine in &engines {
        write_field(&mut hasher, engine.as_bytes());
    }

    FingerprintKey(format!("{FINGERPRINT_VERSION}-{:x}", hasher.finalize()))
}
