//! Schema validator port

use thiserror::Error;

/// Errors reported by a schema validator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// No schema is registered under this name.
    #[error("unknown schema: {0}")]
    UnknownSchema(String),

    /// The schema document itself is unusable.
    #[error("invalid schema '{name}': {message}")]
    InvalidSchema {
        /// Schema name.
        name: String,
        /// Compiler message.
        message: String,
    },

    /// The instance does not conform.
    #[error("schema violations: {}", .0.join("; "))]
    Violations(Vec<String>),
}

/// Port for checking a JSON document against a named schema.
pub trait SchemaValidator: Send + Sync {
    /// Validates `instance` against the schema registered as `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Violations`] listing every violation, or
    /// [`SchemaError::UnknownSchema`] if the name is not registered.
    fn validate(&self, schema: &str, instance: &serde_json::Value) -> Result<(), SchemaError>;
}
