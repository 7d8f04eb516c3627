//! Authentication module
//!
//! The Wonolo API issues short-lived bearer tokens from `/authenticate`.
//! `AuthManager` owns the cached token, refreshes it when expired, and
//! persists the refreshed pair back into the config file so the next run
//! can reuse it.

mod manager;
mod types;

pub use manager::AuthManager;
pub use types::AuthToken;
