#![no_main]

use author_finder::keys::fingerprint;
use author_finder::models::SearchQuery;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(query) = serde_json::from_slice::<SearchQuery>(data) {
        let _ = query.validate_at(2025);
        let _ = fingerprint(&query);
    }
});
