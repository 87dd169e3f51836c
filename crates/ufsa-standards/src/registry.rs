#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use jsonschema::JSONSchema;
use serde_json::Value;
use tracing::debug;

use ufsa_model::Registry;

use crate::error::StandardsError;

/// Schema document looked up next to the registry file.
pub const REGISTRY_SCHEMA_FILE: &str = "registry.schema.json";

/// Outcome of the optional registry schema check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaValidation {
    Passed,
    /// Validation was not possible or failed; the registry is used anyway.
    Skipped(String),
}

impl SchemaValidation {
    pub fn passed(&self) -> bool {
        matches!(self, SchemaValidation::Passed)
    }
}

/// Load the registry YAML, validating it against `registry.schema.json`
/// in the same directory when that file exists.
pub fn load_registry(path: &Path) -> Result<(Registry, SchemaValidation), StandardsError> {
    let schema_path = path
        .parent()
        .map(|dir| dir.join(REGISTRY_SCHEMA_FILE))
        .unwrap_or_else(|| PathBuf::from(REGISTRY_SCHEMA_FILE));
    load_registry_with_schema(path, Some(&schema_path))
}

/// Load the registry YAML with an explicit schema location.
///
/// Schema validation never fails the load. Missing registry fields do.
pub fn load_registry_with_schema(
    path: &Path,
    schema_path: Option<&Path>,
) -> Result<(Registry, SchemaValidation), StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let document: Value = serde_yaml::from_str(&contents).map_err(|e| StandardsError::Yaml {
        path: path.to_path_buf(),
        source: e,
    })?;

    let validation = match schema_path {
        Some(schema_path) if schema_path.is_file() => {
            match validate_against_schema(&document, schema_path) {
                Ok(()) => SchemaValidation::Passed,
                Err(reason) => {
                    debug!(
                        registry = %path.display(),
                        schema = %schema_path.display(),
                        reason = %reason,
                        "registry schema validation skipped"
                    );
                    SchemaValidation::Skipped(reason)
                }
            }
        }
        _ => SchemaValidation::Skipped("schema file not found".to_string()),
    };

    let registry = registry_from_document(document).map_err(|message| {
        StandardsError::InvalidRegistry {
            path: path.to_path_buf(),
            message,
        }
    })?;
    Ok((registry, validation))
}

fn registry_from_document(document: Value) -> Result<Registry, String> {
    let standards = match document {
        Value::Null => return Ok(Registry::default()),
        Value::Object(mut map) => map.remove("standards").unwrap_or(Value::Null),
        other => return Err(format!("expected a mapping at top level, got {other}")),
    };
    if standards.is_null() {
        return Ok(Registry::default());
    }
    let standards = serde_json::from_value(standards).map_err(|e| e.to_string())?;
    let registry = Registry { standards };
    registry.validate().map_err(|e| e.to_string())?;
    Ok(registry)
}

fn validate_against_schema(document: &Value, schema_path: &Path) -> Result<(), String> {
    let contents = std::fs::read_to_string(schema_path).map_err(|e| e.to_string())?;
    let schema: Value = serde_json::from_str(&contents).map_err(|e| e.to_string())?;
    let compiled = JSONSchema::compile(&schema).map_err(|e| e.to_string())?;
    if let Err(errors) = compiled.validate(document) {
        let messages: Vec<String> = errors.map(|error| error.to_string()).collect();
        return Err(messages.join("; "));
    }
    Ok(())
}
