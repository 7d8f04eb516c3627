//! HTTP transport module
//!
//! Provides the transport used for every upstream call:
//!
//! - **Fixed headers**: content type, cache control, RFC 1123 date, user agent
//! - **Retry policy**: fibonacci backoff bounded by an elapsed-time budget
//! - **Error classification**: `is_fatal` decides retry vs give up

mod client;

pub use client::{HttpClient, HttpClientConfig};

/// Whether an HTTP status code is a permanent client failure.
///
/// Fatal codes stop the retry loop immediately. 429 (rate limited) is the
/// one 4xx treated as transient; 5xx is always retried within the budget.
pub fn is_fatal(status: u16) -> bool {
    (400..500).contains(&status) && status != 429
}
