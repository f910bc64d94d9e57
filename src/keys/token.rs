use rand::Rng;
use rand::distributions::Alphanumeric;

/// Fixed literal prefix of every generated secret token.
pub const KEY_PREFIX: &str = "JBK-Key-";

/// Number of random alphanumeric characters after the prefix.
pub const KEY_SUFFIX_LEN: usize = 24;

/// Generate a demo secret token: `JBK-Key-` followed by exactly 24
/// characters from [A-Za-z0-9]. Uses a non-cryptographic source; these
/// are mock keys, never real credentials.
pub fn generate_key() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(KEY_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{}{}", KEY_PREFIX, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_match_the_token_format() {
        for _ in 0..100 {
            let key = generate_key();
            assert!(key.starts_with(KEY_PREFIX));
            let suffix = &key[KEY_PREFIX.len()..];
            assert_eq!(suffix.len(), KEY_SUFFIX_LEN);
            assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn generated_keys_are_not_constant() {
        let a = generate_key();
        let b = generate_key();
        assert_ne!(a, b);
    }
}
