//! Property-based tests for token signing and validation
//!
//! These tests verify:
//! - Issued refresh tokens always round-trip to the issuing user
//! - Malformed tokens never validate and never cause panics
//! - Single-character tampering is always detected
//! - Token hashing is deterministic lowercase hex

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use proptest::prelude::*;
use quill_auth_core::{hash_token, AuthConfig, TokenClaims, TokenSigner, TokenUse};
use quill_types::UserId;
use uuid::Uuid;

const TEST_SECRET: &str = "proptest-secret-0123456789abcdefghij";

fn test_signer() -> TokenSigner {
    let config = AuthConfig::try_new(TEST_SECRET).unwrap();
    TokenSigner::new(&config)
}

// ============================================================================
// Strategies
// ============================================================================

/// Generate malformed token strings
fn arb_malformed_token() -> impl Strategy<Value = String> {
    prop_oneof![
        // No dots at all
        "[A-Za-z0-9_-]{10,60}",
        // One dot only
        "[A-Za-z0-9_-]{5,20}\\.[A-Za-z0-9_-]{5,20}",
        // Four segments
        "[A-Za-z0-9_-]{5,15}\\.[A-Za-z0-9_-]{5,15}\\.[A-Za-z0-9_-]{5,15}\\.[A-Za-z0-9_-]{5,15}",
        // Empty parts
        Just("..".to_string()),
        Just(".".to_string()),
        Just(String::new()),
        Just("e30..signature".to_string()),
        // Characters outside the base64url alphabet
        "[!@#$%^&*()]{5,20}\\.[A-Za-z0-9_-]{10,20}\\.[A-Za-z0-9_-]{10,20}",
        // Decodable segments that are not JSON claims (hex is a subset of
        // the base64url alphabet)
        any::<[u8; 24]>().prop_map(|bytes| {
            let seg = hex::encode(bytes);
            format!("{seg}.{seg}.{seg}")
        }),
    ]
}

// ============================================================================
// Validation Properties
// ============================================================================

proptest! {
    /// Property: issued refresh tokens round-trip to the issuing user
    #[test]
    fn prop_refresh_token_round_trips(id_bytes in any::<[u8; 16]>()) {
        let signer = test_signer();
        let user_id = UserId(Uuid::from_bytes(id_bytes));

        let token = signer.generate_refresh_token(user_id).unwrap();

        prop_assert!(signer.validate_refresh_token(&token));
        prop_assert_eq!(signer.user_id_from_token(&token).unwrap(), user_id);
        // A refresh token is never accepted where an access token is expected.
        prop_assert!(signer.validate_access_token(&token).is_err());
    }

    /// Property: malformed tokens never validate and never panic
    #[test]
    fn prop_malformed_tokens_rejected(token in arb_malformed_token()) {
        let signer = test_signer();

        prop_assert!(!signer.validate_refresh_token(&token));
        prop_assert!(signer.validate_access_token(&token).is_err());
        prop_assert!(signer.user_id_from_token(&token).is_err());
    }

    /// Property: changing any single character invalidates a token
    #[test]
    fn prop_tampered_tokens_rejected(
        id_bytes in any::<[u8; 16]>(),
        pos in any::<prop::sample::Index>(),
    ) {
        let signer = test_signer();
        let token = signer
            .generate_refresh_token(UserId(Uuid::from_bytes(id_bytes)))
            .unwrap();

        let idx = pos.index(token.len());
        let mut bytes = token.into_bytes();
        bytes[idx] = if bytes[idx] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        prop_assert!(!signer.validate_refresh_token(&tampered));
    }

    /// Property: tokens expired beyond leeway never validate
    #[test]
    fn prop_backdated_tokens_rejected(
        id_bytes in any::<[u8; 16]>(),
        age_secs in 3600i64..40 * 86400,
    ) {
        let signer = test_signer();
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: UserId(Uuid::from_bytes(id_bytes)).to_string(),
            token_use: TokenUse::Refresh,
            jti: Uuid::new_v4().to_string(),
            iat: now - age_secs - 60,
            exp: now - age_secs,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        prop_assert!(!signer.validate_refresh_token(&token));
    }
}

// ============================================================================
// Hashing Properties
// ============================================================================

proptest! {
    /// Property: token hashes are deterministic 64-char lowercase hex
    #[test]
    fn prop_hash_token_is_hex64(token in ".*") {
        let hash = hash_token(&token);

        prop_assert_eq!(hash.len(), 64);
        prop_assert!(hash.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        prop_assert_eq!(hash, hash_token(&token));
    }
}
