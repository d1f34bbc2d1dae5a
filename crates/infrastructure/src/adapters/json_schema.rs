//! JSON Schema validation using the `jsonschema` crate.
//!
//! Schemas are compiled once and looked up by name. The `pet` schema is
//! built in; more can be loaded from a directory, keyed by file stem.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use jsonschema::Validator;
use petstore_application::ports::{SchemaError, SchemaValidator};
use serde_json::Value;

const PET_SCHEMA: &str = include_str!("../../schemas/pet.json");

/// Named, precompiled JSON schemas.
#[derive(Default)]
pub struct JsonSchemaValidator {
    schemas: HashMap<String, Validator>,
}

impl fmt::Debug for JsonSchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchemaValidator")
            .field("schemas", &self.names())
            .finish()
    }
}

impl JsonSchemaValidator {
    /// Creates a validator with no schemas registered.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a validator holding the built-in `pet` schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidSchema`] if the built-in document does
    /// not compile.
    pub fn with_builtin() -> Result<Self, SchemaError> {
        let mut validator = Self::empty();
        validator.register_str("pet", PET_SCHEMA)?;
        Ok(validator)
    }

    /// Compiles and registers `schema` under `name`, replacing any previous
    /// schema of that name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidSchema`] if the document is not a valid
    /// JSON Schema.
    pub fn register(&mut self, name: impl Into<String>, schema: &Value) -> Result<(), SchemaError> {
        let name = name.into();
        let compiled = Validator::new(schema).map_err(|e| SchemaError::InvalidSchema {
            name: name.clone(),
            message: e.to_string(),
        })?;
        self.schemas.insert(name, compiled);
        Ok(())
    }

    /// Parses and registers a schema given as JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidSchema`] if the text is not JSON or not a
    /// valid schema.
    pub fn register_str(&mut self, name: &str, schema: &str) -> Result<(), SchemaError> {
        let value: Value = serde_json::from_str(schema).map_err(|e| SchemaError::InvalidSchema {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        self.register(name, &value)
    }

    /// Registers every `*.json` file in `dir` under its file stem.
    ///
    /// Returns the number of schemas loaded.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidSchema`] for an unreadable directory,
    /// file, or schema document.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, SchemaError> {
        let unreadable = |message: String| SchemaError::InvalidSchema {
            name: dir.display().to_string(),
            message,
        };

        let mut paths = std::fs::read_dir(dir)
            .map_err(|e| unreadable(e.to_string()))?
            .map(|entry| entry.map(|e| e.path()).map_err(|e| unreadable(e.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        paths.retain(|path| path.extension().is_some_and(|ext| ext == "json"));
        paths.sort();

        for path in &paths {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let text = std::fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
            self.register_str(stem, &text)?;
            tracing::debug!(schema = stem, path = %path.display(), "registered schema");
        }

        Ok(paths.len())
    }

    /// Names of every registered schema, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, schema: &str, instance: &Value) -> Result<(), SchemaError> {
        let validator = self
            .schemas
            .get(schema)
            .ok_or_else(|| SchemaError::UnknownSchema(schema.to_string()))?;

        let violations: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| {
                let at = e.instance_path.to_string();
                if at.is_empty() {
                    e.to_string()
                } else {
                    format!("{e} at {at}")
                }
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Violations(violations))
        }
    }
}
