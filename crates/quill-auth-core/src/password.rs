//! Password hashing with Argon2id

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordVerifier, SaltString},
    Argon2,
};

use crate::AuthError;

/// Argon2id password hasher
///
/// Produces PHC-format hash strings with a per-password random salt, so
/// hashing the same password twice yields different strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher
    pub fn new() -> Self {
        Self
    }

    /// Hash a password for storage
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        use argon2::PasswordHasher as _;

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("Password hashing failed: {}", e);
                AuthError::Internal("password hashing failed".to_string())
            })?;

        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash
    ///
    /// Returns `false` for wrong passwords and for stored hashes that do
    /// not parse as PHC strings.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
