//! Request specification type

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::{Header, Headers, HttpMethod, RequestBody};
use crate::error::{DomainError, DomainResult};

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Complete specification for an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Unique identifier for this request
    pub id: Uuid,
    /// Human-readable name
    pub name: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL, without query string
    pub url: String,
    /// HTTP headers
    #[serde(default)]
    pub headers: Headers,
    /// Query parameters appended to the URL, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<(String, String)>,
    /// Request body
    #[serde(default)]
    pub body: RequestBody,
    /// Timeout for the whole exchange
    pub timeout_ms: u64,
}

impl RequestSpec {
    /// Creates a request specification for `method` and `url`.
    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            method,
            url: url.into(),
            headers: Headers::new(),
            query: Vec::new(),
            body: RequestBody::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Creates a GET request with the given URL.
    #[must_use]
    pub fn get(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Get, url)
    }

    /// Sets a header (builder pattern).
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(Header::new(name, value));
        self
    }

    /// Appends a query parameter (builder pattern).
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the body (builder pattern).
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Sets the timeout (builder pattern).
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Returns the URL with all query parameters applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed.
    pub fn full_url(&self) -> DomainResult<Url> {
        let mut url = Url::parse(&self.url)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.url)))?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_get_request() {
        let req = RequestSpec::get("Pet", "https://api.example.com/pet/1");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://api.example.com/pet/1");
        assert_eq!(req.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_full_url_appends_query() {
        let req = RequestSpec::get("Find", "https://api.example.com/pet/findByStatus")
            .with_query("status", "sold");
        assert_eq!(
            req.full_url().unwrap().as_str(),
            "https://api.example.com/pet/findByStatus?status=sold"
        );
    }

    #[test]
    fn test_full_url_encodes_values() {
        let req = RequestSpec::get("Find", "https://api.example.com/search").with_query("q", "a b&c");
        assert_eq!(
            req.full_url().unwrap().as_str(),
            "https://api.example.com/search?q=a+b%26c"
        );
    }

    #[test]
    fn test_full_url_rejects_garbage() {
        let req = RequestSpec::get("Bad", "not a url");
        assert!(matches!(req.full_url(), Err(DomainError::InvalidUrl(_))));
    }

    #[test]
    fn test_with_header_overrides() {
        let req = RequestSpec::get("Pet", "https://api.example.com")
            .with_header("Accept", "text/plain")
            .with_header("accept", "application/json");
        assert_eq!(req.headers.get("Accept"), Some("application/json"));
    }
}
