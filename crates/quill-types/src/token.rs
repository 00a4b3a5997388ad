//! Issued token types

use serde::{Deserialize, Serialize};

/// A freshly issued access/refresh token pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer token for API requests
    pub access_token: String,
    /// Long-lived token redeemable for a new pair
    pub refresh_token: String,
}
