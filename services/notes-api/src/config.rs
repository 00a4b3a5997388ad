//! Configuration for the Notes API service.

use quill_auth_core::AuthConfig;
use std::time::Duration;

/// Notes API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Database URL
    pub database_url: String,

    /// Auth core configuration
    pub auth: AuthConfig,

    /// How often expired refresh tokens are purged
    pub purge_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Database
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        // Server port
        let http_port = std::env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        // JWT secret (minimum 32 bytes)
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        // Token validity windows (defaults: 15 minutes / 30 days)
        let access_validity_secs: u64 = std::env::var("ACCESS_TOKEN_VALIDITY_SECS")
            .unwrap_or_else(|_| "900".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_VALIDITY_SECS"))?;

        let refresh_validity_secs: u64 = std::env::var("REFRESH_TOKEN_VALIDITY_SECS")
            .unwrap_or_else(|_| "2592000".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REFRESH_TOKEN_VALIDITY_SECS"))?;

        // Purge interval (default 1 hour)
        let purge_interval_secs: u64 = std::env::var("TOKEN_PURGE_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("TOKEN_PURGE_INTERVAL_SECS"))?;

        // Build auth config
        let auth = AuthConfig::try_new(&jwt_secret)
            .map_err(|e| ConfigError::AuthConfig(e.to_string()))?
            .with_access_token_validity(Duration::from_secs(access_validity_secs))
            .with_refresh_token_validity(Duration::from_secs(refresh_validity_secs));

        Ok(Self {
            http_port,
            database_url,
            auth,
            purge_interval: Duration::from_secs(purge_interval_secs),
        })
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Auth config error: {0}")]
    AuthConfig(String),
}
