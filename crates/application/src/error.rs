//! Application error types

use thiserror::Error;
use petstore_domain::{AssertionFailure, DomainError};

use crate::ports::HttpClientError;
use crate::retry::{ProbeError, RetryError};

/// Why a scenario step failed.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The HTTP exchange itself failed.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpClientError),

    /// A response did not meet its expectations.
    #[error("assertion failed: {0}")]
    Assertion(#[from] AssertionFailure),

    /// Polling gave up or hit a transport error.
    #[error("{0}")]
    Retry(#[from] RetryError),
}

impl From<ProbeError> for ApplicationError {
    fn from(error: ProbeError) -> Self {
        match error {
            ProbeError::Assertion(failure) => Self::Assertion(failure),
            ProbeError::Transport(source) => Self::Http(source),
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
