//! Configuration types for auth service

use std::time::Duration;

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret used to sign and verify JWTs (HS256)
    pub jwt_secret: String,
    /// How long access tokens stay valid
    pub access_token_validity: Duration,
    /// How long refresh tokens stay valid
    pub refresh_token_validity: Duration,
}

impl AuthConfig {
    /// Minimum allowed secret length in bytes (256 bits)
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Create a new auth config with default validity windows
    ///
    /// # Errors
    /// Returns error if the secret is shorter than 32 bytes.
    pub fn try_new(jwt_secret: impl Into<String>) -> Result<Self, AuthConfigError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(AuthConfigError::SecretTooShort {
                actual: jwt_secret.len(),
                minimum: Self::MIN_SECRET_LENGTH,
            });
        }
        Ok(Self {
            jwt_secret,
            access_token_validity: Duration::from_secs(15 * 60), // 15 minutes
            refresh_token_validity: Duration::from_secs(30 * 24 * 60 * 60), // 30 days
        })
    }

    /// Set access token validity
    pub fn with_access_token_validity(mut self, validity: Duration) -> Self {
        self.access_token_validity = validity;
        self
    }

    /// Set refresh token validity
    pub fn with_refresh_token_validity(mut self, validity: Duration) -> Self {
        self.refresh_token_validity = validity;
        self
    }
}

/// Errors that can occur when creating an auth config
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthConfigError {
    #[error("JWT secret too short: got {actual} bytes, need at least {minimum}")]
    SecretTooShort { actual: usize, minimum: usize },
}
