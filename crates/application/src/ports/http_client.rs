//! HTTP Client port

use async_trait::async_trait;
use thiserror::Error;
use petstore_domain::{DomainError, request::RequestSpec, response::ResponseSpec};

/// Transport-level failures.
///
/// These describe an environment problem rather than a late write, so the
/// retry engine never re-attempts a probe that produced one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be produced.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The request could not be built for another reason.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request exceeded its timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("DNS lookup failed for {host}: {message}")]
    DnsError {
        /// Host being resolved.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// The remote end refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Remote host.
        host: String,
        /// Remote port.
        port: u16,
    },

    /// Any other connection failure.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect limit was hit.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// The response claimed to be JSON but was not.
    #[error("malformed response body: {0}")]
    MalformedResponse(String),

    /// Anything else reported by the client library.
    #[error("{0}")]
    Other(String),
}

impl From<DomainError> for HttpClientError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::InvalidUrl(msg) => Self::InvalidUrl(msg),
            DomainError::InvalidBody(msg) => Self::InvalidBody(msg),
            other => Self::InvalidRequest(other.to_string()),
        }
    }
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the suite to be independent of specific HTTP libraries.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Executes an HTTP request and returns the response.
    ///
    /// Any status code, including 4xx and 5xx, is a successful exchange.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or other HTTP-related problems.
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError>;
}
