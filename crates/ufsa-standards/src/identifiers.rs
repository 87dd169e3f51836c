#![deny(unsafe_code)]

//! Curated identifier-system and mapping registries.
//!
//! Both documents are optional YAML files:
//!
//! ```yaml
//! systems:
//!   - id: iso-3166-1-a2
//!     name: ISO 3166-1 Alpha-2 Country Codes
//!     authority: ISO
//!     uri: https://www.iso.org/iso-3166-country-codes.html
//!     description: Two-letter country code set
//! ```
//!
//! ```yaml
//! mappings:
//!   - subject: urn:ufsa:id:openfigi
//!     predicate: skos:relatedMatch
//!     object: urn:ufsa:id:isin
//!     confidence: 0.6
//!     provenance: curated
//! ```

use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::StandardsError;

pub const IDENTIFIER_SYSTEMS_FILE: &str = "identifier_systems.yaml";
pub const MAPPINGS_FILE: &str = "mappings.yaml";

/// Confidence assumed for curated mappings that do not state one.
pub const DEFAULT_MAPPING_CONFIDENCE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifierSystem {
    pub id: String,
    pub name: String,
    pub authority: String,
    pub uri: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingEntry {
    pub subject: String,
    pub predicate: String,
    pub object: String,
    pub confidence: f64,
    pub provenance: String,
}

/// Load `identifier_systems.yaml` from `registry_dir`. `None` when absent.
pub fn load_identifier_systems(
    registry_dir: &Path,
) -> Result<Option<Vec<IdentifierSystem>>, StandardsError> {
    let path = registry_dir.join(IDENTIFIER_SYSTEMS_FILE);
    let Some(document) = read_optional_yaml(&path)? else {
        return Ok(None);
    };
    let systems = entries(&document, "systems")
        .iter()
        .map(|entry| IdentifierSystem {
            id: text(entry, "id"),
            name: text(entry, "name"),
            authority: text(entry, "authority"),
            uri: text(entry, "uri"),
            description: text(entry, "description"),
        })
        .collect();
    Ok(Some(systems))
}

/// Load `mappings.yaml` from `registry_dir`. `None` when absent.
pub fn load_mappings(registry_dir: &Path) -> Result<Option<Vec<MappingEntry>>, StandardsError> {
    let path = registry_dir.join(MAPPINGS_FILE);
    let Some(document) = read_optional_yaml(&path)? else {
        return Ok(None);
    };
    let mut mappings = Vec::new();
    for entry in entries(&document, "mappings") {
        let confidence = confidence(entry).map_err(|message| StandardsError::InvalidDocument {
            path: path.clone(),
            message,
        })?;
        mappings.push(MappingEntry {
            subject: text(entry, "subject"),
            predicate: text(entry, "predicate"),
            object: text(entry, "object"),
            confidence,
            provenance: text(entry, "provenance"),
        });
    }
    Ok(Some(mappings))
}

fn read_optional_yaml(path: &Path) -> Result<Option<Value>, StandardsError> {
    if !path.is_file() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let document = serde_yaml::from_str(&contents).map_err(|e| StandardsError::Yaml {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Some(document))
}

/// The array under `key`; anything else (non-mapping document, missing key,
/// non-array value) yields no entries.
fn entries<'a>(document: &'a Value, key: &str) -> &'a [Value] {
    document
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn text(entry: &Value, key: &str) -> String {
    match entry.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(value)) => value.clone(),
        Some(other) => other.to_string(),
    }
}

fn confidence(entry: &Value) -> Result<f64, String> {
    match entry.get("confidence") {
        None | Some(Value::Null) => Ok(DEFAULT_MAPPING_CONFIDENCE),
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| format!("confidence out of range: {number}")),
        Some(Value::String(raw)) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid confidence '{raw}'")),
        Some(other) => Err(format!("invalid confidence {other}")),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_stringifies_scalars() {
        let entry = json!({"id": 42, "name": "ISO", "uri": null});
        assert_eq!(text(&entry, "id"), "42");
        assert_eq!(text(&entry, "name"), "ISO");
        assert_eq!(text(&entry, "uri"), "");
        assert_eq!(text(&entry, "missing"), "");
    }

    #[test]
    fn confidence_defaults_and_parses() {
        assert_eq!(confidence(&json!({})), Ok(1.0));
        assert_eq!(confidence(&json!({"confidence": 0.6})), Ok(0.6));
        assert_eq!(confidence(&json!({"confidence": "0.25"})), Ok(0.25));
        assert!(confidence(&json!({"confidence": "high"})).is_err());
    }

    #[test]
    fn entries_tolerates_unexpected_shapes() {
        assert!(entries(&json!(["x"]), "systems").is_empty());
        assert!(entries(&json!({"systems": "nope"}), "systems").is_empty());
        assert_eq!(entries(&json!({"systems": [{}, {}]}), "systems").len(), 2);
    }
}
