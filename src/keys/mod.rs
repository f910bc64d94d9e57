mod presentation;
mod record;
mod token;

pub use presentation::{
    INACTIVE_USAGE_THRESHOLD,
    display_rank,
    is_inactive,
    masked_key,
    sort_for_display,
    to_full_word,
    to_short_type,
};
pub use record::{ApiKeyRecord, DecodeError, KeyType};
pub use token::{KEY_PREFIX, KEY_SUFFIX_LEN, generate_key};
