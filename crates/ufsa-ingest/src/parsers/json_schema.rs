//! JSON Schema documents.
//!
//! One concept per property path. The root schema is the concept with the
//! empty path (`<standard_id>:`); nested properties are dot-joined and array
//! items append `[]` to their parent path.

use serde_json::Value;
use ufsa_model::notes::{DESCRIPTION, TYPE, VALUESET_HINT};
use ufsa_model::{Concept, ConceptScheme};
use ufsa_standards::FileTracker;

use crate::error::{IngestError, Result};
use crate::request::ParseRequest;

/// Paths in the FHIR R4 Observation schema bound to LOINC.
const LOINC_BOUND_PATHS: &[&str] = &["code", "code.coding[]"];
const FHIR_OBSERVATION_STANDARD: &str = "fhir_r4_observation";

pub fn parse(request: &ParseRequest<'_>, tracker: &mut dyn FileTracker) -> Result<ConceptScheme> {
    let (path, text) = request.read_fixture(tracker)?;
    let document: Value = serde_json::from_str(&text).map_err(|source| IngestError::Json {
        path: path.clone(),
        source,
    })?;

    let mut scheme = request.new_scheme();
    add_property(request, &mut scheme, String::new(), &document);
    Ok(scheme)
}

fn add_property(request: &ParseRequest<'_>, scheme: &mut ConceptScheme, path: String, schema: &Value) {
    scheme.insert(property_concept(request, &path, schema));

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (key, child) in properties {
            let child_path = if path.is_empty() {
                key.clone()
            } else {
                format!("{path}.{key}")
            };
            add_property(request, scheme, child_path, child);
        }
    }

    if let Some(items) = schema.get("items").filter(|items| items.is_object()) {
        add_property(request, scheme, format!("{path}[]"), items);
    }
}

fn property_concept(request: &ParseRequest<'_>, path: &str, schema: &Value) -> Concept {
    let label = match schema.get("title") {
        Some(Value::String(title)) if !title.is_empty() => title.clone(),
        Some(title) if is_truthy(title) => title.to_string(),
        _ => path.rsplit('.').next().unwrap_or(path).to_string(),
    };
    let mut concept = request.concept(path, label);

    match schema.get("type") {
        Some(Value::String(kind)) => concept = concept.with_note(TYPE, kind.as_str()),
        Some(kind) => concept = concept.with_note(TYPE, kind.to_string()),
        None => {}
    }
    match schema.get("description") {
        Some(Value::String(description)) => {
            concept = concept.with_note(DESCRIPTION, description.as_str());
        }
        Some(description) => concept = concept.with_note(DESCRIPTION, description.to_string()),
        None => {}
    }

    if request.standard_id == FHIR_OBSERVATION_STANDARD && LOINC_BOUND_PATHS.contains(&path) {
        concept = concept.with_note(VALUESET_HINT, "loinc");
    }
    concept
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
