//! Cryptographic utilities for token storage

use sha2::Sha256;

/// Securely hash a token for storage.
///
/// Uses SHA-256 to create a one-way hash of the token.
/// The original token cannot be recovered from the hash.
pub fn hash_token(token: &str) -> String {
    use sha2::Digest;
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_deterministic() {
        let token = "refresh_token_value";
        let hash1 = hash_token(token);
        let hash2 = hash_token(token);
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64); // SHA-256 = 32 bytes = 64 hex chars

        // Different tokens produce different hashes
        let hash3 = hash_token("different_token");
        assert_ne!(hash1, hash3);
    }

    #[test]
    fn test_hash_token_known_vector() {
        // SHA-256 of the empty string
        assert_eq!(
            hash_token(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash_token_is_lowercase_hex() {
        let hash = hash_token("abc");
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
