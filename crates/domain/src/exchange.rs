//! Record of one request/response pair, kept for reporting.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::request::{HttpMethod, RequestSpec};
use crate::response::ResponseSpec;

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// Id of the originating request.
    pub request_id: Uuid,
    /// Request name.
    pub name: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// URL including the query string.
    pub url: String,
    /// Request body, if one was sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<String>,
    /// Response status.
    pub status: u16,
    /// Response body.
    pub response_body: String,
    /// Round-trip time.
    #[serde(with = "crate::response::duration_millis")]
    pub duration: Duration,
    /// When the exchange was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl Exchange {
    /// Captures `request` and `response` as one exchange.
    #[must_use]
    pub fn new(request: &RequestSpec, response: &ResponseSpec) -> Self {
        let url = request
            .full_url()
            .map_or_else(|_| request.url.clone(), |u| u.to_string());
        let request_body = (!request.body.is_empty()).then(|| request.body.content.clone());

        Self {
            request_id: request.id,
            name: request.name.clone(),
            method: request.method,
            url,
            request_body,
            status: response.status,
            response_body: response.body.clone(),
            duration: response.duration,
            recorded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestBody;

    #[test]
    fn test_exchange_captures_query_and_body() {
        let request = RequestSpec::new("update", HttpMethod::Put, "https://api.example.com/pet")
            .with_query("dry", "1")
            .with_body(RequestBody::json(r#"{"id":1}"#));
        let response = ResponseSpec::json(200, &serde_json::json!({"id": 1}));

        let exchange = Exchange::new(&request, &response);
        assert_eq!(exchange.url, "https://api.example.com/pet?dry=1");
        assert_eq!(exchange.request_body.as_deref(), Some(r#"{"id":1}"#));
        assert_eq!(exchange.status, 200);
        assert_eq!(exchange.request_id, request.id);
    }

    #[test]
    fn test_exchange_without_body() {
        let request = RequestSpec::get("read", "https://api.example.com/pet/1");
        let response = ResponseSpec::json(404, &serde_json::json!({}));

        let exchange = Exchange::new(&request, &response);
        assert!(exchange.request_body.is_none());
        assert_eq!(exchange.method, HttpMethod::Get);
    }
}
