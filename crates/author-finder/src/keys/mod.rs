//! Stable cache keys.
//!
//! Query fingerprints and AuthorIDs share one cache namespace. Both are
//! content hashes over a length-prefixed canonical encoding, tagged with a
//! scheme version so a hashing change never aliases old keys.

mod fingerprint;
mod identity;

pub use fingerprint::{FINGERPRINT_VERSION, FingerprintKey, fingerprint};
pub use identity::{AuthorId, IDENTITY_VERSION, identify};

use md5::Digest;

/// Feed one length-prefixed field into a hasher.
fn write_field<D: Digest>(hasher: &mut D, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// True if `raw` is `{version}-` followed by exactly `hex_len` lowercase hex digits.
fn is_versioned_hex(raw: &str, version: &str, hex_len: usize) -> bool {
    raw.strip_prefix(version)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| {
            hex.len() == hex_len && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        })
}
