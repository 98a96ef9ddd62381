#![no_main]

use author_finder::keys::AuthorId;
use author_finder::models::AuthorRecord;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Engine payloads are a JSON array of records; identity must never panic
    if let Ok(records) = serde_json::from_slice::<Vec<AuthorRecord>>(data) {
        for record in &records {
            let _ = AuthorId::of(record);
            let _ = record.display_name();
        }
    }
});
