//! Response verification.
//!
//! Evaluates [`Expectations`] against a [`ResponseSpec`] and produces a
//! [`Verdict`] with one result per assertion. Every assertion is evaluated,
//! so a failed verdict lists every violated predicate.

mod json_path;

use std::sync::Arc;

use petstore_domain::{
    Assertion, AssertionResult, Expectations, JsonKind, Verdict, response::ResponseSpec,
};
use serde_json::Value;

use crate::ports::{HttpClientError, SchemaError, SchemaValidator};
use crate::retry::ProbeError;

pub use json_path::query as query_json_path;

/// Checks responses against expectations.
#[derive(Clone)]
pub struct ResponseVerifier {
    schemas: Arc<dyn SchemaValidator>,
}

impl ResponseVerifier {
    /// Creates a verifier resolving schema names through `schemas`.
    #[must_use]
    pub fn new(schemas: Arc<dyn SchemaValidator>) -> Self {
        Self { schemas }
    }

    /// Evaluates every assertion of `expectations` against `response`.
    #[must_use]
    pub fn verify(&self, expectations: &Expectations, response: &ResponseSpec) -> Verdict {
        let body = response.body_as_json().map_err(|e| e.to_string());
        Verdict {
            name: expectations.name.clone(),
            results: expectations
                .assertions
                .iter()
                .map(|assertion| self.run_assertion(assertion, response, &body))
                .collect(),
        }
    }

    /// Evaluates `expectations` and classifies any failure for the retry
    /// engine.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Transport`] with
    /// [`HttpClientError::MalformedResponse`] when a successful response
    /// declares a JSON content type, the expectations inspect the JSON body
    /// and the body does not parse. Any other failed verdict is a
    /// [`ProbeError::Assertion`].
    pub fn check(&self, expectations: &Expectations, response: &ResponseSpec) -> Result<(), ProbeError> {
        let verdict = self.verify(expectations, response);
        if verdict.all_passed() {
            return Ok(());
        }

        if response.is_success() && response.is_json() && expectations.reads_json() {
            if let Err(e) = response.body_as_json() {
                return Err(ProbeError::Transport(HttpClientError::MalformedResponse(
                    format!("{}: {e}", expectations.name),
                )));
            }
        }

        verdict.into_result().map_err(ProbeError::from)
    }

    /// Runs a single assertion against a response and its parsed body.
    #[must_use]
    pub fn run_assertion(
        &self,
        assertion: &Assertion,
        response: &ResponseSpec,
        body: &Result<Value, String>,
    ) -> AssertionResult {
        let outcome = match assertion {
            Assertion::Status { code } => check_status(response.status, *code),
            Assertion::ContentType { essence } => check_content_type(response.content_type(), essence),
            Assertion::Schema { name } => match body {
                Ok(json) => self.check_schema(json, name),
                Err(e) => Err(not_json(assertion, e)),
            },
            _ => match body {
                Ok(json) => check_json(assertion, json),
                Err(e) => Err(not_json(assertion, e)),
            },
        };

        match outcome {
            Ok(actual) => AssertionResult::held(assertion.clone(), actual),
            Err(Violation { actual, message }) => {
                AssertionResult::violated(assertion.clone(), actual, message)
            }
        }
    }

    fn check_schema(&self, json: &Value, schema: &str) -> Outcome {
        match self.schemas.validate(schema, json) {
            Ok(()) => Ok(None),
            Err(SchemaError::Violations(violations)) => Err(Violation::message(format!(
                "Body does not match schema '{schema}': {}",
                violations.join("; ")
            ))),
            Err(e) => Err(Violation::message(e.to_string())),
        }
    }
}

impl std::fmt::Debug for ResponseVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseVerifier").finish_non_exhaustive()
    }
}

/// `Ok` carries the observed value, if any.
type Outcome = Result<Option<String>, Violation>;

struct Violation {
    actual: Option<String>,
    message: String,
}

impl Violation {
    fn message(message: impl Into<String>) -> Self {
        Self {
            actual: None,
            message: message.into(),
        }
    }

    fn observed(actual: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            actual: Some(actual.into()),
            message: message.into(),
        }
    }
}

fn not_json(assertion: &Assertion, error: &str) -> Violation {
    Violation::message(format!("Cannot check {assertion}: body is not JSON: {error}"))
}

fn check_status(actual: u16, expected: u16) -> Outcome {
    if actual == expected {
        Ok(Some(actual.to_string()))
    } else {
        Err(Violation::observed(
            actual.to_string(),
            format!("Expected status = {expected}, got {actual}"),
        ))
    }
}

fn check_content_type(actual: Option<&str>, essence: &str) -> Outcome {
    match actual {
        Some(actual) if actual.contains(essence) => Ok(Some(actual.to_string())),
        Some(actual) => Err(Violation::observed(
            actual,
            format!("Content-Type '{actual}' does not contain '{essence}'"),
        )),
        None => Err(Violation::message("No Content-Type header present")),
    }
}

fn check_json(assertion: &Assertion, json: &Value) -> Outcome {
    let Some(path) = assertion.json_path() else {
        return Ok(None);
    };
    let value = match json_path::query(json, path) {
        Ok(Some(value)) => value,
        Ok(None) => return Err(Violation::message(format!("JSON path '{path}' not found"))),
        Err(e) => return Err(Violation::message(format!("Invalid JSON path '{path}': {e}"))),
    };

    let held = match assertion {
        Assertion::JsonEquals { value: expected, .. } if &value != expected => Err(format!(
            "JSON path '{path}' value mismatch: expected {expected}, got {value}"
        )),
        Assertion::JsonContains { item, .. } if !contains(&value, item) => {
            Err(format!("JSON path '{path}' does not contain {item}: {value}"))
        }
        Assertion::JsonType { kind, .. } if JsonKind::of(&value) != *kind => Err(format!(
            "JSON path '{path}' is {}, expected {}",
            JsonKind::of(&value).as_str(),
            kind.as_str()
        )),
        _ => Ok(()),
    };

    let actual = match assertion {
        Assertion::JsonType { .. } => JsonKind::of(&value).as_str().to_string(),
        _ => value.to_string(),
    };
    match held {
        Ok(()) => Ok(Some(actual)),
        Err(message) => Err(Violation::observed(actual, message)),
    }
}

/// Array membership, or substring for strings.
fn contains(haystack: &Value, item: &Value) -> bool {
    match (haystack, item) {
        (Value::Array(items), _) => items.contains(item),
        (Value::String(s), Value::String(needle)) => s.contains(needle.as_str()),
        _ => false,
    }
}
