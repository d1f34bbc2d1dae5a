//! Session fixtures shared by every step of a run.
//!
//! Built once before the first step and read-only afterwards.

use std::ops::Range;

use petstore_domain::{
    Assertion, DomainError, DomainResult, Expectations, PetId,
    request::{HttpMethod, PathTemplate, RequestSpec},
};
use rand::Rng;
use url::Url;

/// Range generated identifiers are drawn from (upper bound exclusive).
pub const GENERATED_ID_RANGE: Range<i64> = 100_000_000..999_999_999;

/// Defaults applied to every request of the suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDefaults {
    endpoint: String,
    timeout_ms: u64,
}

impl RequestDefaults {
    /// Joins `base_url` and `base_path` into the API endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if the joined endpoint is not an
    /// absolute http(s) URL.
    pub fn new(base_url: &str, base_path: &str, timeout_ms: u64) -> DomainResult<Self> {
        let base = base_url.trim_end_matches('/');
        let path = base_path.trim_matches('/');
        let endpoint = if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        };

        let parsed = Url::parse(&endpoint).map_err(|e| DomainError::InvalidUrl(format!("{e}: {endpoint}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "unsupported scheme '{}': {endpoint}",
                parsed.scheme()
            )));
        }

        Ok(Self { endpoint, timeout_ms })
    }

    /// The joined base endpoint, without trailing slash.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Builds a request to `path` with the JSON content type and accept
    /// headers applied.
    ///
    /// # Errors
    ///
    /// Returns an error if a path placeholder has no value in `params`.
    pub fn request(
        &self,
        name: impl Into<String>,
        method: HttpMethod,
        path: &PathTemplate,
        params: &[(&str, &str)],
    ) -> DomainResult<RequestSpec> {
        let path = path.render(params)?;
        let json = mime::APPLICATION_JSON.essence_str();

        Ok(RequestSpec::new(name, method, format!("{}{path}", self.endpoint))
            .with_header("Content-Type", json)
            .with_header("Accept", json)
            .with_timeout_ms(self.timeout_ms))
    }
}

/// The two immutable fixtures every step consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionFixtures {
    /// Request defaults.
    pub request: RequestDefaults,
    /// Response is JSON.
    pub ok_json: Expectations,
}

impl SessionFixtures {
    /// Builds the fixtures over `request` defaults.
    #[must_use]
    pub fn new(request: RequestDefaults) -> Self {
        let ok_json =
            Expectations::new("ok json").with(Assertion::content_type(mime::APPLICATION_JSON.essence_str()));
        Self { request, ok_json }
    }
}

/// Picks the session identifier.
///
/// A valid override wins; otherwise an identifier is drawn from
/// [`GENERATED_ID_RANGE`].
///
/// # Errors
///
/// Returns [`DomainError::InvalidIdentifier`] only if the generated value is
/// not positive.
pub fn resolve_pet_id<R: Rng>(override_value: Option<&str>, rng: &mut R) -> DomainResult<PetId> {
    if let Some(id) = override_value.and_then(PetId::parse_override) {
        return Ok(id);
    }
    if let Some(raw) = override_value {
        tracing::warn!(value = raw, "ignoring invalid PET_ID override");
    }

    PetId::new(rng.random_range(GENERATED_ID_RANGE))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_endpoint_join() {
        let defaults = RequestDefaults::new("https://petstore3.swagger.io/", "/api/v3/", 5_000).unwrap();
        assert_eq!(defaults.endpoint(), "https://petstore3.swagger.io/api/v3");

        let bare = RequestDefaults::new("http://127.0.0.1:8080", "", 5_000).unwrap();
        assert_eq!(bare.endpoint(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_endpoint_rejects_bad_urls() {
        assert!(RequestDefaults::new("petstore", "/api/v3", 5_000).is_err());
        assert!(RequestDefaults::new("ftp://example.com", "/api/v3", 5_000).is_err());
    }

    #[test]
    fn test_request_applies_json_headers() {
        let defaults = RequestDefaults::new("https://petstore3.swagger.io", "/api/v3", 7_000).unwrap();
        let req = defaults
            .request("Get pet", HttpMethod::Get, &PathTemplate::new("/pet/{id}"), &[("id", "42")])
            .unwrap();

        assert_eq!(req.url, "https://petstore3.swagger.io/api/v3/pet/42");
        assert_eq!(req.headers.get("content-type"), Some("application/json"));
        assert_eq!(req.headers.get("accept"), Some("application/json"));
        assert_eq!(req.timeout_ms, 7_000);
    }

    #[test]
    fn test_request_missing_parameter() {
        let defaults = RequestDefaults::new("https://petstore3.swagger.io", "/api/v3", 7_000).unwrap();
        let err = defaults
            .request("Get pet", HttpMethod::Get, &PathTemplate::new("/pet/{id}"), &[])
            .unwrap_err();
        assert_eq!(err, DomainError::MissingPathParameter("id".to_string()));
    }

    #[test]
    fn test_ok_json_fixture() {
        let defaults = RequestDefaults::new("https://petstore3.swagger.io", "/api/v3", 7_000).unwrap();
        let fixtures = SessionFixtures::new(defaults);
        assert_eq!(
            fixtures.ok_json.assertions,
            vec![Assertion::content_type("application/json")]
        );
    }

    #[test]
    fn test_valid_override_is_used() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(resolve_pet_id(Some("123456789"), &mut rng).unwrap().get(), 123_456_789);
    }

    #[test]
    fn test_invalid_override_falls_back_to_generated() {
        let mut rng = StdRng::seed_from_u64(7);
        for raw in [None, Some(""), Some("0"), Some("abc"), Some("-4")] {
            let id = resolve_pet_id(raw, &mut rng).unwrap().get();
            assert!(GENERATED_ID_RANGE.contains(&id), "{id} out of range");
        }
    }
}
