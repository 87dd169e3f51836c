//! Per-scheme artifacts: `<scheme_id>.concepts.json` and `.csv`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use ufsa_model::{Concept, ConceptScheme};

use crate::common::{notes_json, write_csv, write_json};

pub const SCHEME_CSV_HEADER: [&str; 4] = ["id", "label", "in_scheme", "notes_json"];

pub fn scheme_json_path(out_dir: &Path, scheme_id: &str) -> PathBuf {
    out_dir.join(format!("{scheme_id}.concepts.json"))
}

pub fn scheme_csv_path(out_dir: &Path, scheme_id: &str) -> PathBuf {
    out_dir.join(format!("{scheme_id}.concepts.csv"))
}

#[derive(Serialize)]
struct SchemeDocument<'a> {
    id: &'a str,
    label: &'a str,
    concepts: Vec<ConceptDocument<'a>>,
}

/// Concept projection in the JSON artifact. Hierarchical relations live in
/// `semantic_relations.csv`; only the match lists are carried here.
#[derive(Serialize)]
struct ConceptDocument<'a> {
    id: &'a str,
    label: &'a str,
    notes: &'a BTreeMap<String, String>,
    in_scheme: Option<&'a str>,
    exact_match: &'a [String],
    close_match: &'a [String],
    broad_match: &'a [String],
    narrow_match: &'a [String],
    related_match: &'a [String],
}

impl<'a> From<&'a Concept> for ConceptDocument<'a> {
    fn from(concept: &'a Concept) -> Self {
        Self {
            id: &concept.id,
            label: &concept.label,
            notes: &concept.notes,
            in_scheme: concept.in_scheme.as_deref(),
            exact_match: &concept.exact_match,
            close_match: &concept.close_match,
            broad_match: &concept.broad_match,
            narrow_match: &concept.narrow_match,
            related_match: &concept.related_match,
        }
    }
}

#[derive(Deserialize)]
struct SchemeRecord {
    id: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    concepts: Vec<Concept>,
}

/// Write `<scheme_id>.concepts.json`.
pub fn write_scheme_json(scheme: &ConceptScheme, out_dir: &Path) -> Result<PathBuf> {
    let document = SchemeDocument {
        id: &scheme.id,
        label: &scheme.label,
        concepts: scheme.concepts.values().map(ConceptDocument::from).collect(),
    };
    let path = scheme_json_path(out_dir, &scheme.id);
    write_json(&path, &document)?;
    Ok(path)
}

/// Read a `<scheme_id>.concepts.json` artifact back into a scheme.
///
/// Missing match lists come back empty. Relations that the artifact does not
/// carry (`broader`, `narrower`, `related`) are empty.
pub fn read_scheme_json(path: &Path) -> Result<ConceptScheme> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let record: SchemeRecord =
        serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
    let mut scheme = ConceptScheme::new(record.id, record.label);
    for concept in record.concepts {
        scheme.insert(concept);
    }
    Ok(scheme)
}

/// Write `<scheme_id>.concepts.csv` with notes encoded as JSON.
pub fn write_scheme_csv(scheme: &ConceptScheme, out_dir: &Path) -> Result<PathBuf> {
    let path = scheme_csv_path(out_dir, &scheme.id);
    let rows = scheme
        .concepts
        .values()
        .map(|concept| {
            Ok([
                concept.id.clone(),
                concept.label.clone(),
                concept.in_scheme.clone().unwrap_or_default(),
                notes_json(&concept.notes)?,
            ])
        })
        .collect::<Result<Vec<_>>>()?;
    write_csv(&path, &SCHEME_CSV_HEADER, rows)?;
    Ok(path)
}

/// Write both per-scheme artifacts, JSON first.
pub fn write_scheme_outputs(scheme: &ConceptScheme, out_dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(vec![
        write_scheme_json(scheme, out_dir)?,
        write_scheme_csv(scheme, out_dir)?,
    ])
}
