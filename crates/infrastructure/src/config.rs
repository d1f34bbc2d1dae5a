//! Suite configuration.
//!
//! Defaults first, then `PETSTORE_*` environment variables. The identifier
//! override is read from the bare `PET_ID` variable.

use std::collections::HashMap;
use std::path::PathBuf;

use config::{Config, Environment};
use serde::Deserialize;
use thiserror::Error;

/// Prefix of the suite's environment variables.
pub const ENV_PREFIX: &str = "PETSTORE";
/// Variable carrying the identifier override.
pub const PET_ID_VAR: &str = "PET_ID";

/// Public Pet Store host.
pub const DEFAULT_BASE_URL: &str = "https://petstore3.swagger.io";
/// Public Pet Store API root.
pub const DEFAULT_BASE_PATH: &str = "/api/v3";
/// Per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is out of range.
    #[error("invalid configuration value for {key}: {message}")]
    Invalid {
        /// Offending key.
        key: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

/// Settings of one suite run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuiteConfig {
    /// Scheme and host of the service.
    pub base_url: String,
    /// API root below the host.
    pub base_path: String,
    /// Per-request timeout.
    pub request_timeout_ms: u64,
    /// Where `report.json` is written, if anywhere.
    #[serde(default)]
    pub report_dir: Option<PathBuf>,
    /// Directory of extra `*.json` schemas.
    #[serde(default)]
    pub schema_dir: Option<PathBuf>,
    /// Skip the remaining steps after the first failure.
    pub stop_on_failure: bool,
    /// Raw `PET_ID` value, validated later.
    #[serde(skip)]
    pub pet_id_override: Option<String>,
}

impl SuiteConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(None, std::env::var(PET_ID_VAR).ok())
    }

    /// Loads configuration from an explicit variable map instead of the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let pet_id = vars.get(PET_ID_VAR).cloned();
        Self::build(Some(vars), pet_id)
    }

    fn build(vars: Option<HashMap<String, String>>, pet_id: Option<String>) -> Result<Self, ConfigError> {
        let vars = vars.map(|v| v.into_iter().collect::<config::Map<String, String>>());
        let timeout_default = i64::try_from(DEFAULT_REQUEST_TIMEOUT_MS).unwrap_or(i64::MAX);

        let mut config: Self = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("base_path", DEFAULT_BASE_PATH)?
            .set_default("request_timeout_ms", timeout_default)?
            .set_default("stop_on_failure", false)?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?
            .try_deserialize()?;

        if config.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "request_timeout_ms",
                message: "must be positive".to_string(),
            });
        }

        config.pet_id_override = pet_id.filter(|raw| !raw.is_empty());
        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = SuiteConfig::from_vars(HashMap::new()).unwrap();
        assert_eq!(
            config,
            SuiteConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                base_path: DEFAULT_BASE_PATH.to_string(),
                request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
                report_dir: None,
                schema_dir: None,
                stop_on_failure: false,
                pet_id_override: None,
            }
        );
    }

    #[test]
    fn test_environment_overrides() {
        let config = SuiteConfig::from_vars(vars(&[
            ("PETSTORE_BASE_URL", "http://127.0.0.1:8080"),
            ("PETSTORE_BASE_PATH", "/v3"),
            ("PETSTORE_REQUEST_TIMEOUT_MS", "2500"),
            ("PETSTORE_REPORT_DIR", "target/e2e"),
            ("PETSTORE_STOP_ON_FAILURE", "true"),
            ("PET_ID", "123456789"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.base_path, "/v3");
        assert_eq!(config.request_timeout_ms, 2_500);
        assert_eq!(config.report_dir, Some(PathBuf::from("target/e2e")));
        assert!(config.stop_on_failure);
        assert_eq!(config.pet_id_override.as_deref(), Some("123456789"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = SuiteConfig::from_vars(vars(&[("PETSTORE_REQUEST_TIMEOUT_MS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "request_timeout_ms", .. }));
    }

    #[test]
    fn test_unparsable_timeout_rejected() {
        let err = SuiteConfig::from_vars(vars(&[("PETSTORE_REQUEST_TIMEOUT_MS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_empty_pet_id_is_ignored() {
        let config = SuiteConfig::from_vars(vars(&[("PET_ID", "")])).unwrap();
        assert_eq!(config.pet_id_override, None);
    }
}
