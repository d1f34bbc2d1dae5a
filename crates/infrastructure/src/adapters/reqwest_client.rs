//! `HttpClient` port backed by reqwest.
//!
//! Every status code, 4xx and 5xx included, comes back as a response.
//! Only failures to complete the exchange map to [`HttpClientError`].

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use petstore_application::ports::{HttpClient, HttpClientError};
use petstore_domain::{
    request::{HttpMethod, RequestBody, RequestSpec},
    response::ResponseSpec,
};
use reqwest::{Client, Method, RequestBuilder};

const MAX_REDIRECTS: usize = 10;
const USER_AGENT: &str = concat!("petstore-e2e/", env!("CARGO_PKG_VERSION"));

/// Pooled reqwest client shared by every step of a run.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Builds the client: rustls, at most 10 redirects, suite user agent.
    /// Timeouts are set per request.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, HttpClientError> {
        Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map(Self::with_client)
            .map_err(|e| HttpClientError::Other(e.to_string()))
    }

    /// Wraps an already configured client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

const fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Attaches `body`, refusing JSON bodies that do not parse.
fn attach_body(builder: RequestBuilder, body: &RequestBody) -> Result<RequestBuilder, HttpClientError> {
    if body.is_empty() {
        return Ok(builder);
    }
    if body.is_json() {
        serde_json::from_str::<serde_json::Value>(&body.content)
            .map_err(|e| HttpClientError::InvalidBody(format!("Invalid JSON: {e}")))?;
    }
    Ok(builder.body(body.content.clone()))
}

/// Sorts a reqwest failure into the port's error kinds.
fn classify(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
    let host = || {
        error
            .url()
            .and_then(reqwest::Url::host_str)
            .unwrap_or("unknown")
            .to_string()
    };

    if error.is_timeout() {
        HttpClientError::Timeout { timeout_ms }
    } else if error.is_connect() {
        let message = error.to_string();
        let lower = message.to_lowercase();
        if lower.contains("dns") || lower.contains("resolve") {
            HttpClientError::DnsError { host: host(), message }
        } else if lower.contains("refused") {
            let port = error
                .url()
                .and_then(reqwest::Url::port_or_known_default)
                .unwrap_or(80);
            HttpClientError::ConnectionRefused { host: host(), port }
        } else {
            HttpClientError::ConnectionFailed(message)
        }
    } else if error.is_redirect() {
        HttpClientError::TooManyRedirects { max: MAX_REDIRECTS }
    } else if error.is_builder() {
        HttpClientError::InvalidRequest(error.to_string())
    } else {
        HttpClientError::Other(error.to_string())
    }
}

fn header_map(response: &reqwest::Response) -> HashMap<String, String> {
    response
        .headers()
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_str().unwrap_or("<binary>").to_string()))
        .collect()
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        let url = request.full_url()?;
        let timeout_ms = request.timeout_ms;
        let started = Instant::now();

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), url)
            .timeout(Duration::from_millis(timeout_ms));
        for header in request.headers.iter() {
            builder = builder.header(&header.name, &header.value);
        }
        if let Some(media_type) = request.body.content_type() {
            if !request.headers.contains("content-type") {
                builder = builder.header(reqwest::header::CONTENT_TYPE, media_type);
            }
        }
        let builder = attach_body(builder, &request.body)?;

        let response = builder.send().await.map_err(|e| classify(&e, timeout_ms))?;
        let status = response.status().as_u16();
        let headers = header_map(&response);
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                HttpClientError::Timeout { timeout_ms }
            } else {
                HttpClientError::MalformedResponse(format!("failed to read body: {e}"))
            }
        })?;
        let elapsed = started.elapsed();

        tracing::debug!(
            request = %request.name,
            status,
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "exchange completed"
        );

        Ok(ResponseSpec::new(status, headers, body.to_vec(), elapsed))
    }
}
