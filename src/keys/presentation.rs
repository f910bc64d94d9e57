use std::cmp::Reverse;

use chrono::{DateTime, Utc};

use crate::keys::record::ApiKeyRecord;

/// A key whose usage counter reaches this value is treated as inactive
/// (read-only) everywhere in the UI.
pub const INACTIVE_USAGE_THRESHOLD: i64 = 1000;

/// Map a stored full word to its short display code. Unrecognized input
/// passes through unchanged.
pub fn to_short_type(full_word: &str) -> String {
    match full_word.to_lowercase().as_str() {
        "development" => "dev".to_string(),
        "production" => "prod".to_string(),
        "testing" => "test".to_string(),
        "inactive" => "inactive".to_string(),
        _ => full_word.to_string(),
    }
}

/// Map a short display code back to the stored full word. Unrecognized
/// input passes through unchanged.
pub fn to_full_word(short_type: &str) -> String {
    match short_type.to_lowercase().as_str() {
        "dev" => "Development".to_string(),
        "prod" => "Production".to_string(),
        "test" => "Testing".to_string(),
        "inactive" => "Inactive".to_string(),
        _ => short_type.to_string(),
    }
}

/// Whether a stored record has crossed the usage threshold.
pub fn is_inactive(record: &ApiKeyRecord) -> bool {
    record.usage >= INACTIVE_USAGE_THRESHOLD
}

/// Sort key for the display order: active keys first, newest first,
/// then inactive keys, also newest first. Every view that orders keys
/// derives its key from this.
pub fn display_rank(inactive: bool, created_at: DateTime<Utc>) -> (bool, Reverse<DateTime<Utc>>) {
    (inactive, Reverse(created_at))
}

/// Order stored records for display.
pub fn sort_for_display(records: &mut [ApiKeyRecord]) {
    records.sort_by_key(|r| display_rank(is_inactive(r), r.created_at));
}

/// Masked rendering of a secret token: the first ten characters followed
/// by 24 asterisks, e.g. `JBK-Key-XX************************`.
pub fn masked_key(key: &str) -> String {
    let visible: String = key.chars().take(10).collect();
    format!("{}{}", visible, "*".repeat(24))
}
