//! Response expectations and assertion outcomes.
//!
//! An [`Expectations`] set is evaluated against one response and yields a
//! [`Verdict`]. A failed verdict turns into an [`AssertionFailure`] listing
//! every violated predicate.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A single predicate checked against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Status code equals `code`.
    Status {
        /// Expected status code.
        code: u16,
    },
    /// `Content-Type` header contains `essence`.
    ContentType {
        /// Media type looked for, e.g. `application/json`.
        essence: String,
    },
    /// Value at `path` equals `value`.
    JsonEquals {
        /// JSON path expression, e.g. `$.category.id`.
        path: String,
        /// Expected value.
        value: Value,
    },
    /// `path` resolves to some value.
    JsonExists {
        /// JSON path expression.
        path: String,
    },
    /// Array at `path` holds `item`, or string at `path` contains it.
    JsonContains {
        /// JSON path expression.
        path: String,
        /// Element looked for.
        item: Value,
    },
    /// Value at `path` has JSON kind `kind`.
    JsonType {
        /// JSON path expression.
        path: String,
        /// Expected kind.
        kind: JsonKind,
    },
    /// Body conforms to the named schema.
    Schema {
        /// Schema name as known to the schema validator.
        name: String,
    },
}

impl Assertion {
    /// Status equals `code`.
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self::Status { code }
    }

    /// Content type contains `essence`.
    #[must_use]
    pub fn content_type(essence: impl Into<String>) -> Self {
        Self::ContentType {
            essence: essence.into(),
        }
    }

    /// Value at `path` equals `value`.
    #[must_use]
    pub fn json_eq(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::JsonEquals {
            path: path.into(),
            value: value.into(),
        }
    }

    /// `path` resolves to some value.
    #[must_use]
    pub fn json_exists(path: impl Into<String>) -> Self {
        Self::JsonExists { path: path.into() }
    }

    /// Array or string at `path` contains `item`.
    #[must_use]
    pub fn json_contains(path: impl Into<String>, item: impl Into<Value>) -> Self {
        Self::JsonContains {
            path: path.into(),
            item: item.into(),
        }
    }

    /// Value at `path` has the given JSON kind.
    #[must_use]
    pub fn json_type(path: impl Into<String>, kind: JsonKind) -> Self {
        Self::JsonType {
            path: path.into(),
            kind,
        }
    }

    /// Body conforms to the named schema.
    #[must_use]
    pub fn schema(name: impl Into<String>) -> Self {
        Self::Schema { name: name.into() }
    }

    /// JSON path this assertion reads, if it inspects the body.
    #[must_use]
    pub fn json_path(&self) -> Option<&str> {
        match self {
            Self::JsonEquals { path, .. }
            | Self::JsonExists { path }
            | Self::JsonContains { path, .. }
            | Self::JsonType { path, .. } => Some(path),
            Self::Status { .. } | Self::ContentType { .. } | Self::Schema { .. } => None,
        }
    }

    /// Whether evaluating this assertion needs the body parsed as JSON.
    #[must_use]
    pub fn reads_json(&self) -> bool {
        self.json_path().is_some() || matches!(self, Self::Schema { .. })
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status { code } => write!(f, "status is {code}"),
            Self::ContentType { essence } => write!(f, "Content-Type contains '{essence}'"),
            Self::JsonEquals { path, value } => write!(f, "{path} equals {value}"),
            Self::JsonExists { path } => write!(f, "{path} exists"),
            Self::JsonContains { path, item } => write!(f, "{path} contains {item}"),
            Self::JsonType { path, kind } => write!(f, "{path} is {}", kind.as_str()),
            Self::Schema { name } => write!(f, "body matches schema '{name}'"),
        }
    }
}

/// Kind of a JSON value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JsonKind {
    /// `null`
    Null,
    /// `true` / `false`
    Bool,
    /// Any number.
    Number,
    /// A string.
    String,
    /// An array.
    Array,
    /// An object.
    Object,
}

impl JsonKind {
    /// Returns the kind of `value`.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

/// Outcome of one assertion against one response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionResult {
    /// The evaluated assertion.
    pub assertion: Assertion,
    /// What the response actually held, when known.
    pub actual: Option<String>,
    /// Why the assertion did not hold. `None` means it passed.
    pub violation: Option<String>,
}

impl AssertionResult {
    /// The assertion held.
    #[must_use]
    pub const fn held(assertion: Assertion, actual: Option<String>) -> Self {
        Self {
            assertion,
            actual,
            violation: None,
        }
    }

    /// The assertion was violated.
    #[must_use]
    pub fn violated(assertion: Assertion, actual: Option<String>, violation: impl Into<String>) -> Self {
        Self {
            assertion,
            actual,
            violation: Some(violation.into()),
        }
    }

    /// Whether the assertion held.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.violation.is_none()
    }
}

/// A named set of assertions evaluated together against one response.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Expectations {
    /// Name used in failure messages.
    pub name: String,
    /// Assertions to run, in order.
    #[serde(default)]
    pub assertions: Vec<Assertion>,
}

impl Expectations {
    /// Creates an empty set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            assertions: Vec::new(),
        }
    }

    /// Appends `assertion`.
    #[must_use]
    pub fn with(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Appends every assertion of `other`.
    #[must_use]
    pub fn including(mut self, other: &Self) -> Self {
        self.assertions.extend_from_slice(&other.assertions);
        self
    }

    /// Whether any assertion needs the body parsed as JSON.
    #[must_use]
    pub fn reads_json(&self) -> bool {
        self.assertions.iter().any(Assertion::reads_json)
    }

    /// Number of assertions.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    /// Whether the set has no assertions.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }
}

/// Outcome of evaluating an [`Expectations`] set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    /// Name of the evaluated set.
    pub name: String,
    /// One result per assertion, in evaluation order.
    pub results: Vec<AssertionResult>,
}

impl Verdict {
    /// Number of evaluated assertions.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Whether every assertion held.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(AssertionResult::passed)
    }

    /// Messages of every violated assertion, in evaluation order.
    #[must_use]
    pub fn violations(&self) -> Vec<String> {
        self.results
            .iter()
            .filter_map(|r| r.violation.clone())
            .collect()
    }

    /// Converts the verdict into a result.
    ///
    /// # Errors
    ///
    /// Returns an [`AssertionFailure`] carrying every violation if any
    /// assertion failed.
    pub fn into_result(self) -> Result<(), AssertionFailure> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(AssertionFailure::new(self.name, violations))
        }
    }
}

/// One or more predicates did not hold.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{check}: {}", .violations.join("; "))]
pub struct AssertionFailure {
    /// What was being checked.
    pub check: String,
    /// Every violated predicate.
    pub violations: Vec<String>,
}

impl AssertionFailure {
    /// Creates a failure for `check`.
    #[must_use]
    pub fn new(check: impl Into<String>, violations: Vec<String>) -> Self {
        Self {
            check: check.into(),
            violations,
        }
    }

    /// Creates a failure with a single violation.
    #[must_use]
    pub fn single(check: impl Into<String>, violation: impl Into<String>) -> Self {
        Self::new(check, vec![violation.into()])
    }
}
