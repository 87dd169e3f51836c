//! Global relational tables.
//!
//! `concept_schemes.csv`, `concepts.csv` and `semantic_relations.csv` are
//! always written. `software_components.csv` and `database_schemas.csv` are
//! written only when a scheme contributes concepts of that kind; such
//! concepts are left out of `concepts.csv`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use ufsa_model::notes::{CODE, DATA_TYPE, DESCRIPTION, NOTATION, PURL};
use ufsa_model::{Concept, ConceptScheme, Kind};

use crate::common::{write_all_or_nothing, write_csv};

pub const CONCEPT_SCHEMES_FILE: &str = "concept_schemes.csv";
pub const CONCEPTS_FILE: &str = "concepts.csv";
pub const SEMANTIC_RELATIONS_FILE: &str = "semantic_relations.csv";
pub const SOFTWARE_COMPONENTS_FILE: &str = "software_components.csv";
pub const DATABASE_SCHEMAS_FILE: &str = "database_schemas.csv";

pub const CONCEPT_SCHEMES_HEADER: [&str; 4] =
    ["scheme_id", "scheme_label", "scheme_uri", "governing_body"];
pub const CONCEPTS_HEADER: [&str; 5] =
    ["concept_id", "pref_label", "definition", "notation", "scheme_uri"];
pub const SEMANTIC_RELATIONS_HEADER: [&str; 3] = ["subject_id", "predicate", "object_id"];
pub const SOFTWARE_COMPONENTS_HEADER: [&str; 5] =
    ["purl", "name", "version", "description", "scheme_uri"];
pub const DATABASE_SCHEMAS_HEADER: [&str; 4] =
    ["table_name", "column_name", "data_type", "concept_uri"];

/// Write every global table; returns the paths actually written. On failure
/// no table is left behind.
pub fn write_global_tables(
    schemes: &BTreeMap<String, ConceptScheme>,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    write_all_or_nothing(|outputs| {
        outputs.push(write_concept_schemes(schemes, out_dir)?);
        outputs.push(write_concepts(schemes, out_dir)?);
        outputs.push(write_semantic_relations(schemes, out_dir)?);
        outputs.extend(write_software_components(schemes, out_dir)?);
        outputs.extend(write_database_schemas(schemes, out_dir)?);
        Ok(())
    })
}

fn all_concepts(schemes: &BTreeMap<String, ConceptScheme>) -> impl Iterator<Item = &Concept> {
    schemes.values().flat_map(|scheme| scheme.concepts.values())
}

fn note(concept: &Concept, key: &str) -> String {
    concept.note(key).unwrap_or_default().to_string()
}

fn scheme_uri(concept: &Concept) -> String {
    concept.in_scheme.clone().unwrap_or_default()
}

pub fn write_concept_schemes(
    schemes: &BTreeMap<String, ConceptScheme>,
    out_dir: &Path,
) -> Result<PathBuf> {
    let path = out_dir.join(CONCEPT_SCHEMES_FILE);
    // governing_body is a placeholder column.
    let rows = schemes.iter().map(|(id, scheme)| {
        [
            id.clone(),
            scheme.label.clone(),
            scheme.scheme_uri().unwrap_or_default().to_string(),
            String::new(),
        ]
    });
    write_csv(&path, &CONCEPT_SCHEMES_HEADER, rows)?;
    Ok(path)
}

pub fn write_concepts(schemes: &BTreeMap<String, ConceptScheme>, out_dir: &Path) -> Result<PathBuf> {
    let path = out_dir.join(CONCEPTS_FILE);
    let rows = all_concepts(schemes)
        .filter(|concept| concept.kind().is_none())
        .map(|concept| {
            let notation = concept
                .note(NOTATION)
                .or_else(|| concept.note(CODE))
                .unwrap_or_default();
            [
                concept.id.clone(),
                concept.label.clone(),
                note(concept, DESCRIPTION),
                notation.to_string(),
                scheme_uri(concept),
            ]
        });
    write_csv(&path, &CONCEPTS_HEADER, rows)?;
    Ok(path)
}

pub fn write_semantic_relations(
    schemes: &BTreeMap<String, ConceptScheme>,
    out_dir: &Path,
) -> Result<PathBuf> {
    let path = out_dir.join(SEMANTIC_RELATIONS_FILE);
    let rows = all_concepts(schemes).flat_map(|concept| {
        concept.edges().map(move |(relation, object)| {
            [concept.id.as_str(), relation.as_str(), object]
        })
    });
    write_csv(&path, &SEMANTIC_RELATIONS_HEADER, rows)?;
    Ok(path)
}

/// `software_components.csv`, or `None` when no scheme has components.
pub fn write_software_components(
    schemes: &BTreeMap<String, ConceptScheme>,
    out_dir: &Path,
) -> Result<Option<PathBuf>> {
    let components: Vec<&Concept> = all_concepts(schemes)
        .filter(|concept| concept.kind() == Some(Kind::SoftwareComponent))
        .collect();
    if components.is_empty() {
        return Ok(None);
    }
    let path = out_dir.join(SOFTWARE_COMPONENTS_FILE);
    let rows = components.iter().map(|concept| {
        [
            note(concept, PURL),
            concept.label.clone(),
            note(concept, NOTATION),
            note(concept, DESCRIPTION),
            scheme_uri(concept),
        ]
    });
    write_csv(&path, &SOFTWARE_COMPONENTS_HEADER, rows)?;
    Ok(Some(path))
}

/// `database_schemas.csv`, or `None` when no scheme has tables or columns.
///
/// Table rows leave `column_name` empty. Column labels are `table.column`;
/// the table part is taken from the column's `broader` table when there is
/// one, so schema-qualified names like `main.users.id` split after
/// `main.users`. Otherwise the label is split on the first `.`.
pub fn write_database_schemas(
    schemes: &BTreeMap<String, ConceptScheme>,
    out_dir: &Path,
) -> Result<Option<PathBuf>> {
    let entries: Vec<&Concept> = all_concepts(schemes)
        .filter(|concept| concept.kind().is_some_and(Kind::is_database))
        .collect();
    if entries.is_empty() {
        return Ok(None);
    }
    let tables: BTreeMap<&str, &str> = entries
        .iter()
        .filter(|concept| concept.kind() == Some(Kind::Table))
        .map(|concept| (concept.id.as_str(), concept.label.as_str()))
        .collect();
    let path = out_dir.join(DATABASE_SCHEMAS_FILE);
    let rows = entries.iter().map(|concept| {
        if concept.kind() == Some(Kind::Table) {
            return [concept.label.clone(), String::new(), String::new(), concept.id.clone()];
        }
        let (table, column) = split_column_label(concept, &tables);
        [
            table.to_string(),
            column.to_string(),
            note(concept, DATA_TYPE),
            concept.id.clone(),
        ]
    });
    write_csv(&path, &DATABASE_SCHEMAS_HEADER, rows)?;
    Ok(Some(path))
}

fn split_column_label<'a>(
    concept: &'a Concept,
    tables: &BTreeMap<&str, &str>,
) -> (&'a str, &'a str) {
    let label = concept.label.as_str();
    let owner = concept
        .broader
        .iter()
        .filter_map(|id| tables.get(id.as_str()))
        .find_map(|table| {
            label
                .strip_prefix(*table)
                .and_then(|rest| rest.strip_prefix('.'))
                .map(|column| (&label[..table.len()], column))
        });
    owner.unwrap_or_else(|| label.split_once('.').unwrap_or((label, "")))
}
