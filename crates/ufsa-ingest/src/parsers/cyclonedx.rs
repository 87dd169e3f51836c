//! CycloneDX SBOM documents (JSON).
//!
//! Components become `software_component` concepts; the `dependencies`
//! array is wired as `related` links between them.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;
use ufsa_model::notes::{
    DESCRIPTION, EXTERNAL_REFERENCES, HASHES, KIND, LICENSES, LIST_SEPARATOR, NOTATION, PURL,
};
use ufsa_model::{ConceptScheme, Kind};
use ufsa_standards::FileTracker;

use crate::error::{IngestError, Result};
use crate::request::ParseRequest;

pub fn parse(request: &ParseRequest<'_>, tracker: &mut dyn FileTracker) -> Result<ConceptScheme> {
    let (path, text) = request.read_fixture(tracker)?;
    let document: Value = serde_json::from_str(&text).map_err(|source| IngestError::Json {
        path: path.clone(),
        source,
    })?;

    let mut scheme = request.new_scheme();
    // bom-ref, purl and name@version all resolve to the concept id.
    let mut refs: BTreeMap<String, String> = BTreeMap::new();

    for component in array(&document, "components") {
        let name = text_field(component, "name");
        let version = text_field(component, "version");
        let purl = text_field(component, "purl");
        let bom_ref = text_field(component, "bom-ref");
        let name_at_version = if name.is_empty() && version.is_empty() {
            String::new()
        } else {
            format!("{name}@{version}")
        };

        let reference = [&bom_ref, &purl, &name_at_version]
            .into_iter()
            .find(|candidate| !candidate.is_empty())
            .cloned()
            .unwrap_or_default();
        if reference.is_empty() {
            debug!(standard_id = request.standard_id, "skipping component without identity");
            continue;
        }

        let label = [&name, &purl, &reference]
            .into_iter()
            .find(|candidate| !candidate.is_empty())
            .cloned()
            .unwrap_or_default();
        let concept = request
            .concept(&reference, label)
            .with_note(NOTATION, version.as_str())
            .with_note(DESCRIPTION, text_field(component, "description"))
            .with_note(PURL, purl.as_str())
            .with_note(KIND, Kind::SoftwareComponent.as_str())
            .with_note(LICENSES, collect_licenses(component).join(LIST_SEPARATOR))
            .with_note(HASHES, collect_hashes(component).join(LIST_SEPARATOR))
            .with_note(
                EXTERNAL_REFERENCES,
                collect_external_references(component).join(LIST_SEPARATOR),
            );
        let concept_id = concept.id.clone();
        scheme.insert(concept);

        refs.insert(reference, concept_id.clone());
        if !purl.is_empty() {
            refs.entry(purl).or_insert_with(|| concept_id.clone());
        }
        if !name_at_version.is_empty() {
            refs.entry(name_at_version).or_insert(concept_id);
        }
    }

    for dependency in array(&document, "dependencies") {
        let Some(source) = refs.get(&text_field(dependency, "ref")) else {
            continue;
        };
        let targets: Vec<&String> = array(dependency, "dependsOn")
            .iter()
            .filter_map(|target| refs.get(&scalar_text(target)))
            .collect();
        let Some(concept) = scheme.get_mut(source) else {
            continue;
        };
        for target in targets {
            if !concept.related.contains(target) {
                concept.related.push(target.clone());
            }
        }
    }
    Ok(scheme)
}

/// License identifiers, names or expressions. An expression wins over the
/// license object within the same entry.
pub fn collect_licenses(component: &Value) -> Vec<String> {
    array(component, "licenses")
        .iter()
        .filter_map(|entry| {
            let expression = text_field(entry, "expression");
            if !expression.is_empty() {
                return Some(expression);
            }
            let license = entry.get("license")?;
            [text_field(license, "id"), text_field(license, "name")]
                .into_iter()
                .find(|value| !value.is_empty())
        })
        .collect()
}

/// Hashes as `ALG:content`, algorithm uppercased.
pub fn collect_hashes(component: &Value) -> Vec<String> {
    array(component, "hashes")
        .iter()
        .filter_map(|hash| {
            let alg = text_field(hash, "alg").to_uppercase();
            let content = scalar_text(hash.get("content").unwrap_or(&Value::Null));
            (!alg.is_empty() && !content.is_empty()).then(|| format!("{alg}:{content}"))
        })
        .collect()
}

pub fn collect_external_references(component: &Value) -> Vec<String> {
    array(component, "externalReferences")
        .iter()
        .map(|reference| text_field(reference, "url"))
        .filter(|url| !url.is_empty())
        .collect()
}

fn array<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Trimmed text of a field; missing and null are empty.
fn text_field(value: &Value, key: &str) -> String {
    value.get(key).map(scalar_text).unwrap_or_default()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.trim().to_string(),
        other => other.to_string(),
    }
}
