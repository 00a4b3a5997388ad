//! Auth service - ties together password hashing, token signing, and
//! refresh token rotation

use std::sync::Arc;

use chrono::Utc;
use quill_db::{CreateUser, DbError, RefreshTokenRepository, UserRepository, UserRow};
use quill_types::{TokenPair, UserId};
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    crypto::hash_token,
    password::PasswordHasher,
    token::TokenSigner,
    AuthError,
};

/// Characters accepted as password specials
const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*";

/// Validate an email address shape
///
/// Accepts `local@domain` with non-empty parts, a single `@`, and no
/// whitespace. No attempt is made to verify deliverability.
pub fn validate_email(email: &str) -> Result<(), AuthError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(AuthError::InvalidEmail)
    }
}

/// Validate password complexity
///
/// Requires at least 8 characters drawn from letters, digits and
/// `!@#$%^&*`, with at least one lowercase, one uppercase, one digit
/// and one special among them.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < 8 {
        return Err(AuthError::WeakPassword(
            "must be at least 8 characters long".to_string(),
        ));
    }
    if !password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIAL_CHARS.contains(c))
    {
        return Err(AuthError::WeakPassword(format!(
            "may only contain letters, digits and {PASSWORD_SPECIAL_CHARS}"
        )));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(AuthError::WeakPassword(
            "must contain a lowercase letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(AuthError::WeakPassword(
            "must contain an uppercase letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AuthError::WeakPassword("must contain a digit".to_string()));
    }
    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        return Err(AuthError::WeakPassword(format!(
            "must contain one of {PASSWORD_SPECIAL_CHARS}"
        )));
    }
    Ok(())
}

/// Authentication service
///
/// Provides unified interface for:
/// - Registration with password complexity checks
/// - Login issuing access/refresh token pairs
/// - Single-use refresh token rotation
pub struct AuthService<U: UserRepository, R: RefreshTokenRepository> {
    password_hasher: PasswordHasher,
    token_signer: TokenSigner,
    user_repo: Arc<U>,
    refresh_token_repo: Arc<R>,
}

impl<U: UserRepository, R: RefreshTokenRepository> AuthService<U, R> {
    /// Create a new auth service
    pub fn new(config: &AuthConfig, user_repo: Arc<U>, refresh_token_repo: Arc<R>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_signer: TokenSigner::new(config),
            user_repo,
            refresh_token_repo,
        }
    }

    /// Register a new user
    ///
    /// Validates the email and password, hashes the password, and stores
    /// the user. A taken email surfaces as [`AuthError::EmailTaken`].
    pub async fn register(&self, email: &str, password: &str) -> Result<UserRow, AuthError> {
        validate_email(email)?;
        validate_password(password)?;

        let password_hash = self.password_hasher.hash(password)?;
        let user = self
            .user_repo
            .create(CreateUser {
                id: Uuid::new_v4(),
                email: email.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                DbError::UniqueViolation => AuthError::EmailTaken,
                other => other.into(),
            })?;

        Ok(user)
    }

    /// Log a user in, issuing a fresh token pair
    ///
    /// Unknown emails and wrong passwords both return
    /// [`AuthError::InvalidCredentials`].
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            // Burn a hash so unknown emails cost as much as a failed
            // verification.
            let _ = self.password_hasher.hash(password);
            return Err(AuthError::InvalidCredentials);
        };

        if !self.password_hasher.verify(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_token_pair(user.user_id()).await
    }

    /// Redeem a refresh token for a new token pair
    ///
    /// The presented token is consumed: each stored refresh token redeems
    /// exactly once, and concurrent redemptions of the same token leave
    /// exactly one winner.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        if !self.token_signer.validate_refresh_token(refresh_token) {
            return Err(AuthError::InvalidToken);
        }

        let user_id = self.token_signer.user_id_from_token(refresh_token)?;
        let user = self
            .user_repo
            .find_by_id(user_id.0)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        // The conditional delete is the consumption gate: only the caller
        // that removes the live row proceeds to mint a new pair.
        let token_hash = hash_token(refresh_token);
        let deleted = self
            .refresh_token_repo
            .delete_by_user_and_hash(user.id, &token_hash)
            .await?;
        if deleted == 0 {
            return Err(AuthError::InvalidToken);
        }

        self.issue_token_pair(user.user_id()).await
    }

    /// Verify an access token and return the subject user ID
    pub fn verify_access_token(&self, token: &str) -> Result<UserId, AuthError> {
        let claims = self.token_signer.validate_access_token(token)?;
        claims.user_id().ok_or(AuthError::InvalidToken)
    }

    async fn issue_token_pair(&self, user_id: UserId) -> Result<TokenPair, AuthError> {
        let access_token = self.token_signer.generate_access_token(user_id)?;
        let refresh_token = self.token_signer.generate_refresh_token(user_id)?;

        let token_hash = hash_token(&refresh_token);
        let expires_at = Utc::now() + self.token_signer.refresh_token_validity();
        self.refresh_token_repo
            .save(user_id.0, &token_hash, expires_at)
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_accepts_plain_addresses() {
        for email in ["a@b.com", "user.name@example.co.uk", "x@localhost"] {
            assert!(validate_email(email).is_ok(), "{email} should be valid");
        }
    }

    #[test]
    fn test_validate_email_rejects_malformed() {
        for email in [
            "",
            "no-at-sign",
            "@missing-local.com",
            "missing-domain@",
            "two@@ats.com",
            "white space@example.com",
        ] {
            assert!(
                matches!(validate_email(email), Err(AuthError::InvalidEmail)),
                "{email:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_password_accepts_complex() {
        for password in ["Abcdef1!", "Str0ng&Password", "xY9*aaaa"] {
            assert!(
                validate_password(password).is_ok(),
                "{password} should be valid"
            );
        }
    }

    #[test]
    fn test_validate_password_rejects_weak() {
        for password in [
            "",
            "Ab1!",            // too short
            "abcdefg1!",       // no uppercase
            "ABCDEFG1!",       // no lowercase
            "Abcdefgh!",       // no digit
            "Abcdefg1",        // no special
            "Abcdef1! space",  // disallowed character
            "Abcdef1\u{e9}x!", // non-ASCII character
        ] {
            assert!(
                matches!(validate_password(password), Err(AuthError::WeakPassword(_))),
                "{password:?} should be rejected"
            );
        }
    }
}
