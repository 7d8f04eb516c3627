//! Auth token type

use chrono::{DateTime, Utc};

/// A bearer token with its expiry
///
/// Owned exclusively by the [`super::AuthManager`]; replaced wholesale on
/// refresh, never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    /// The token value, sent as the `token` query parameter
    pub value: String,
    /// When the token stops being valid
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    /// Create a new token
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// A token is usable only while `expires_at` is strictly in the future
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
