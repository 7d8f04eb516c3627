//! Auth manager implementation
//!
//! Obtains and caches the bearer token, refreshing through `/authenticate`
//! when the cached token is missing or past its expiry.

use super::types::AuthToken;
use crate::config::ConfigStore;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::types::parse_timestamp;
use std::collections::HashMap;
use tracing::info;

/// Manages the auth token lifecycle
///
/// Safe to call [`AuthManager::ensure_valid_token`] before every page fetch:
/// a still-valid cached token is returned without any network call.
#[derive(Debug)]
pub struct AuthManager {
    api_key: String,
    secret_key: String,
    cached: Option<AuthToken>,
    store: ConfigStore,
}

impl AuthManager {
    /// Create an auth manager seeded from the config store
    ///
    /// A token cached in the config file from a previous run is reused if
    /// its expiry still parses; a garbled pair is simply dropped and a
    /// fresh token fetched on first use.
    pub fn new(store: ConfigStore) -> Self {
        let config = store.config();
        let cached = match (&config.auth_token, &config.auth_token_expires_at) {
            (Some(token), Some(expires_at)) => parse_timestamp(expires_at)
                .ok()
                .map(|dt| AuthToken::new(token.clone(), dt)),
            _ => None,
        };

        Self {
            api_key: config.api_key.clone(),
            secret_key: config.secret_key.clone(),
            cached,
            store,
        }
    }

    /// Return a token whose expiry is strictly in the future, refreshing
    /// if needed
    ///
    /// Idempotent; transport failures during refresh propagate unchanged.
    pub async fn ensure_valid_token(&mut self, http: &HttpClient) -> Result<AuthToken> {
        if let Some(token) = &self.cached {
            if !token.is_expired() {
                return Ok(token.clone());
            }
        }

        info!("Generating new auth token");
        let token = self.refresh(http).await?;
        self.cached = Some(token.clone());
        Ok(token)
    }

    /// Call `/authenticate` and persist the new token pair to the config file
    async fn refresh(&mut self, http: &HttpClient) -> Result<AuthToken> {
        let data = HashMap::from([
            ("api_key".to_string(), self.api_key.clone()),
            ("secret_key".to_string(), self.secret_key.clone()),
        ]);

        let response = http.post("/authenticate", &HashMap::new(), &data).await?;

        let value = response
            .get("token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::auth("authenticate response missing 'token'"))?;
        let expires_at_str = response
            .get("expires_at")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::auth("authenticate response missing 'expires_at'"))?;
        let expires_at = parse_timestamp(expires_at_str)?;

        // Full rewrite of the config file so the next run reuses this token
        self.store.save_auth_token(value, expires_at_str)?;

        Ok(AuthToken::new(value, expires_at))
    }

    /// The currently cached token, if any
    pub fn cached_token(&self) -> Option<&AuthToken> {
        self.cached.as_ref()
    }
}
