//! HTTP client with fibonacci retry
//!
//! Every request to the Wonolo API goes through this client. It builds the
//! fixed header set, executes the request, raises on non-2xx, and retries
//! transient failures with fibonacci-spaced backoff until a total elapsed
//! budget runs out. Fatal status codes (see [`super::is_fatal`]) propagate
//! immediately.

use crate::error::{Error, Result};
use crate::types::StringMap;
use chrono::Utc;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Total elapsed time allowed for retries of a single logical request
const DEFAULT_RETRY_BUDGET: Duration = Duration::from_secs(120);

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Elapsed-time budget for the retry loop
    pub retry_budget: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: Duration::from_secs(30),
            retry_budget: DEFAULT_RETRY_BUDGET,
            user_agent: format!("tap-wonolo/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a config for a base URL with default retry settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Override the retry budget (tests use a short one)
    #[must_use]
    pub fn with_retry_budget(mut self, budget: Duration) -> Self {
        self.retry_budget = budget;
        self
    }

    /// Override the per-request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for the Wonolo REST API
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new client from a config
    ///
    /// Rejects a malformed base URL up front rather than on first request.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        url::Url::parse(&config.base_url)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;
        Ok(Self { client, config })
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Make a GET request and parse the JSON response
    pub async fn get(&self, endpoint: &str, params: &StringMap) -> Result<Value> {
        self.execute(Method::GET, endpoint, params, None).await
    }

    /// Make a POST request with a form-encoded body and parse the JSON response
    pub async fn post(
        &self,
        endpoint: &str,
        params: &StringMap,
        data: &StringMap,
    ) -> Result<Value> {
        self.execute(Method::POST, endpoint, params, Some(data))
            .await
    }

    /// Execute a request with the unified retry policy
    async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        params: &StringMap,
        data: Option<&StringMap>,
    ) -> Result<Value> {
        let started = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            let result = self.send_once(method.clone(), endpoint, params, data).await;

            match result {
                Ok(value) => {
                    debug!(%method, endpoint, "request succeeded");
                    return Ok(value);
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    let delay = fibonacci_delay(attempt);
                    if started.elapsed() + delay > self.config.retry_budget {
                        // Budget exhausted: the original error propagates unmodified
                        return Err(e);
                    }
                    warn!(
                        %method,
                        endpoint,
                        attempt = attempt + 1,
                        delay_secs = delay.as_secs(),
                        error = %e,
                        "transient failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Issue a single request, mapping failures into the error taxonomy
    async fn send_once(
        &self,
        method: Method,
        endpoint: &str,
        params: &StringMap,
        data: Option<&StringMap>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.config.base_url, endpoint);
        let mut req = self.client.request(method, &url);
        req = self.apply_headers(req);

        if !params.is_empty() {
            req = req.query(params);
        }
        if let Some(data) = data {
            req = req.form(data);
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        response.json().await.map_err(Error::Http)
    }

    /// Fixed header set for every request
    fn apply_headers(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("Content-Type", "application/x-www-form-urlencoded")
            .header("Cache-Control", "no-cache")
            .header(
                "Date",
                Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
            )
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Fibonacci-spaced delay for a retry attempt, in whole seconds
///
/// Attempt 0 waits 1s, then 1s, 2s, 3s, 5s, 8s and so on. The sequence is
/// capped only by the caller's elapsed-time budget.
pub(crate) fn fibonacci_delay(attempt: u32) -> Duration {
    let (mut a, mut b) = (1u64, 1u64);
    for _ in 0..attempt {
        let next = a.saturating_add(b);
        a = b;
        b = next;
    }
    Duration::from_secs(a)
}
