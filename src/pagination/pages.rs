//! Page walker for a single resource endpoint
//!
//! Produces a lazy, finite, single-pass sequence of raw records. Each page
//! is one GET with `{token, page, per}` merged over the caller's params. A
//! page shorter than `per` (including empty) terminates the walk; a full
//! final page costs one extra request that comes back empty.

use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::types::{JsonValue, StringMap};

/// Records requested per page
pub const PAGE_SIZE: usize = 50;

/// Lazy page walker for one resource
///
/// Single-pass and non-restartable: every page fetch is a request side
/// effect, so the sequence cannot be rewound.
pub struct RecordPages<'a> {
    http: &'a HttpClient,
    entity: String,
    params: StringMap,
    page: u32,
    done: bool,
}

impl<'a> RecordPages<'a> {
    /// Create a walker for `entity` with the caller's params plus the token
    pub fn new(http: &'a HttpClient, entity: impl Into<String>, params: StringMap, token: &str) -> Self {
        let mut params = params;
        params.insert("token".to_string(), token.to_string());
        params.insert("per".to_string(), PAGE_SIZE.to_string());

        Self {
            http,
            entity: entity.into(),
            params,
            page: 1,
            done: false,
        }
    }

    /// Fetch the next page of raw records
    ///
    /// Returns `Ok(None)` once the walk has terminated. An empty first page
    /// yields one `Some(vec![])` from a single request, then `None`.
    pub async fn next_page(&mut self) -> Result<Option<Vec<JsonValue>>> {
        if self.done {
            return Ok(None);
        }

        self.params.insert("page".to_string(), self.page.to_string());
        let body = self
            .http
            .get(&format!("/{}", self.entity), &self.params)
            .await?;

        // The response contract is {entity: [records...]}; anything else is
        // a broken upstream, not an empty resource
        let records: Vec<JsonValue> = body
            .get(&self.entity)
            .and_then(JsonValue::as_array)
            .cloned()
            .ok_or_else(|| {
                Error::schema(
                    self.entity.clone(),
                    format!("response body missing '{}' array", self.entity),
                )
            })?;

        if records.len() < PAGE_SIZE {
            self.done = true;
        }
        self.page += 1;

        Ok(Some(records))
    }
}
