//! Outgoing request bodies.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Serialized body of a request, with its media type.
///
/// The default value is "no body".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Media type sent as `Content-Type`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Serialized content.
    #[serde(default)]
    pub content: String,
}

impl RequestBody {
    /// A JSON body from already serialized text.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self {
            media_type: Some("application/json".to_string()),
            content: content.into(),
        }
    }

    /// Serializes `value` into a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBody`] if the value cannot be serialized.
    pub fn to_json<T: Serialize>(value: &T) -> DomainResult<Self> {
        serde_json::to_string(value)
            .map(Self::json)
            .map_err(|e| DomainError::InvalidBody(e.to_string()))
    }

    /// True when nothing would be sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Media type of the content.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    /// True if the media type is JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type().is_some_and(|ct| ct.contains("json"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_empty() {
        let body = RequestBody::default();
        assert!(body.is_empty());
        assert!(!body.is_json());
        assert_eq!(body.content_type(), None);
    }

    #[test]
    fn test_to_json_serializes_value() {
        let body = RequestBody::to_json(&serde_json::json!({"name": "test-dog"})).unwrap();
        assert_eq!(body.content, r#"{"name":"test-dog"}"#);
        assert_eq!(body.content_type(), Some("application/json"));
        assert!(body.is_json());
    }
}
