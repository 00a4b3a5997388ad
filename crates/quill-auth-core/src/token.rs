//! JWT signing and validation
//!
//! Access and refresh tokens are HS256 JWTs sharing one secret. The
//! `token_use` claim keeps the two kinds apart so a refresh token can
//! never pass as an access token or vice versa.

use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use quill_types::UserId;
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::AuthError;

/// What a token is good for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
    /// Short-lived API credential
    Access,
    /// Long-lived credential redeemable for a new pair
    Refresh,
}

impl std::fmt::Display for TokenUse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access => write!(f, "access"),
            Self::Refresh => write!(f, "refresh"),
        }
    }
}

/// JWT claims carried by both token kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Token kind
    pub token_use: TokenUse,
    /// Unique token ID; keeps tokens minted within the same second distinct
    pub jti: String,
    /// Issue timestamp (seconds)
    pub iat: i64,
    /// Expiration timestamp (seconds)
    pub exp: i64,
}

impl TokenClaims {
    /// Get the user ID from the subject claim
    pub fn user_id(&self) -> Option<UserId> {
        UserId::parse(&self.sub).ok()
    }
}

/// Token signer issues and validates HS256 JWTs
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_validity_secs: i64,
    refresh_validity_secs: i64,
}

impl TokenSigner {
    /// Create a new token signer from auth config
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation: Validation::default(),
            access_validity_secs: config.access_token_validity.as_secs() as i64,
            refresh_validity_secs: config.refresh_token_validity.as_secs() as i64,
        }
    }

    /// Generate a short-lived access token
    pub fn generate_access_token(&self, user_id: UserId) -> Result<String, AuthError> {
        self.generate(user_id, TokenUse::Access, self.access_validity_secs)
    }

    /// Generate a long-lived refresh token
    pub fn generate_refresh_token(&self, user_id: UserId) -> Result<String, AuthError> {
        self.generate(user_id, TokenUse::Refresh, self.refresh_validity_secs)
    }

    fn generate(
        &self,
        user_id: UserId,
        token_use: TokenUse,
        validity_secs: i64,
    ) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: user_id.to_string(),
            token_use,
            jti: uuid::Uuid::new_v4().to_string(),
            iat: now,
            exp: now + validity_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Token signing failed: {}", e);
            AuthError::Configuration("token signing failed".to_string())
        })
    }

    /// Decode and validate signature and expiry
    fn decode(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken,
                }
            })?;

        Ok(token_data.claims)
    }

    /// Validate an access token and return its claims
    pub fn validate_access_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let claims = self.decode(token)?;
        if claims.token_use != TokenUse::Access {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }

    /// Check whether a token is a well-formed, unexpired refresh token
    pub fn validate_refresh_token(&self, token: &str) -> bool {
        matches!(self.decode(token), Ok(claims) if claims.token_use == TokenUse::Refresh)
    }

    /// Extract the subject user ID from a validated token
    pub fn user_id_from_token(&self, token: &str) -> Result<UserId, AuthError> {
        let claims = self.decode(token)?;
        claims.user_id().ok_or(AuthError::InvalidToken)
    }

    /// How long issued refresh tokens stay valid
    pub fn refresh_token_validity(&self) -> ChronoDuration {
        ChronoDuration::seconds(self.refresh_validity_secs)
    }
}
