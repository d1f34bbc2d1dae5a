//! Domain error types

use thiserror::Error;

/// Errors raised while building domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body is invalid for the given content type.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A pet status outside of `available | pending | sold`.
    #[error("unknown pet status: {0}")]
    UnknownPetStatus(String),

    /// A path template references a parameter that was not supplied.
    #[error("missing path parameter: {0}")]
    MissingPathParameter(String),

    /// A poll policy violates its timing constraints.
    #[error("invalid poll policy: {0}")]
    InvalidPollPolicy(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
