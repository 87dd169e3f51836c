//! Consolidated indexes across all schemes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use ufsa_model::ConceptScheme;

use crate::common::{notes_json, write_all_or_nothing, write_csv, write_json};

pub const SCHEME_INDEX_FILE: &str = "concept_schemes.index.json";
pub const ALL_CONCEPTS_JSON_FILE: &str = "concepts.all.json";
pub const ALL_CONCEPTS_CSV_FILE: &str = "concepts.all.csv";

pub const ALL_CONCEPTS_CSV_HEADER: [&str; 6] =
    ["scheme", "scheme_label", "id", "label", "in_scheme", "notes_json"];

#[derive(Serialize)]
struct IndexEntry<'a> {
    label: &'a str,
    concepts: Vec<&'a str>,
}

#[derive(Serialize)]
struct ConceptRow<'a> {
    scheme: &'a str,
    scheme_label: &'a str,
    id: &'a str,
    label: &'a str,
    in_scheme: Option<&'a str>,
    notes: &'a BTreeMap<String, String>,
}

/// Write `concept_schemes.index.json`: scheme id -> label and concept ids.
pub fn write_scheme_index(
    schemes: &BTreeMap<String, ConceptScheme>,
    out_dir: &Path,
) -> Result<PathBuf> {
    let index: BTreeMap<&str, IndexEntry<'_>> = schemes
        .iter()
        .map(|(id, scheme)| {
            (
                id.as_str(),
                IndexEntry {
                    label: &scheme.label,
                    concepts: scheme.concepts.keys().map(String::as_str).collect(),
                },
            )
        })
        .collect();
    let path = out_dir.join(SCHEME_INDEX_FILE);
    write_json(&path, &index)?;
    Ok(path)
}

fn concept_rows(schemes: &BTreeMap<String, ConceptScheme>) -> Vec<ConceptRow<'_>> {
    schemes
        .iter()
        .flat_map(|(scheme_id, scheme)| {
            scheme.concepts.values().map(move |concept| ConceptRow {
                scheme: scheme_id,
                scheme_label: &scheme.label,
                id: &concept.id,
                label: &concept.label,
                in_scheme: concept.in_scheme.as_deref(),
                notes: &concept.notes,
            })
        })
        .collect()
}

/// Write the flattened `concepts.all.json` and `concepts.all.csv`.
pub fn write_global_indexes(
    schemes: &BTreeMap<String, ConceptScheme>,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let rows = concept_rows(schemes);

    write_all_or_nothing(|outputs| {
        let json_path = out_dir.join(ALL_CONCEPTS_JSON_FILE);
        write_json(&json_path, &rows)?;
        outputs.push(json_path);

        let csv_path = out_dir.join(ALL_CONCEPTS_CSV_FILE);
        let records = rows
            .iter()
            .map(|row| {
                Ok([
                    row.scheme.to_string(),
                    row.scheme_label.to_string(),
                    row.id.to_string(),
                    row.label.to_string(),
                    row.in_scheme.unwrap_or_default().to_string(),
                    notes_json(row.notes)?,
                ])
            })
            .collect::<Result<Vec<_>>>()?;
        write_csv(&csv_path, &ALL_CONCEPTS_CSV_HEADER, records)?;
        outputs.push(csv_path);
        Ok(())
    })
}
