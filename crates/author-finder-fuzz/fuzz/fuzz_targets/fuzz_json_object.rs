#![no_main]

use author_finder::keys::{AuthorId, FingerprintKey};
use author_finder::models::{AuthorRecord, SearchQuery};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First try to parse as valid JSON
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        // Then try each model type
        let _ = serde_json::from_value::<AuthorRecord>(json.clone());
        let _ = serde_json::from_value::<SearchQuery>(json.clone());

        if let Some(token) = json.as_str() {
            let _ = FingerprintKey::parse(token);
            let _ = AuthorId::parse(token);
        }
    }
});
