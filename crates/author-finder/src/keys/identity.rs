//! Author identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{is_versioned_hex, write_field};
use crate::error::{FinderError, FinderResult};
use crate::models::AuthorRecord;

/// Identity scheme version.
pub const IDENTITY_VERSION: &str = "a1";

/// Fixed-width identifier of an author record.
///
/// A pure function of the record's name and affiliation text, so two
/// records with the same text share one cache slot even if they describe
/// different people. Unrelated (name, affiliation) pairs colliding under
/// SHA-256 is an accepted risk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(String);

impl AuthorId {
    /// Hex digits after the version prefix.
    pub const HEX_LEN: usize = 64;

    /// Derive the identifier of a record.
    #[must_use]
    pub fn of(record: &AuthorRecord) -> Self {
        let name = normalize(&record.name.flatten());
        let affiliation = normalize(&record.affiliation_text());

        let mut hasher = Sha256::new();
        write_field(&mut hasher, IDENTITY_VERSION.as_bytes());
        write_field(&mut hasher, name.as_bytes());
        write_field(&mut hasher, affiliation.as_bytes());

        Self(format!("{IDENTITY_VERSION}-{:x}", hasher.finalize()))
    }

    /// Parse an identifier presented by a client.
    pub fn parse(raw: &str) -> FinderResult<Self> {
        let raw = raw.trim();
        if is_versioned_hex(raw, IDENTITY_VERSION, Self::HEX_LEN) {
            Ok(Self(raw.to_string()))
        } else {
            Err(FinderError::validation("id", "not a valid author identifier"))
        }
    }

    /// Identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the identifier of a record.
#[must_use]
pub fn identify(record: &AuthorRecord) -> AuthorId {
    AuthorId::of(record)
}

/// Trim and collapse internal whitespace runs to one space.
fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
