//! Identifier-system and curated-mapping registries projected to CSV.
//!
//! Both source documents are optional. An absent document writes nothing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ufsa_standards::{load_identifier_systems, load_mappings};

use crate::common::{format_score, write_all_or_nothing, write_csv};

pub const IDENTIFIER_SYSTEMS_CSV_FILE: &str = "identifier_systems.csv";
pub const MAPPINGS_CSV_FILE: &str = "mappings.csv";

pub const IDENTIFIER_SYSTEMS_HEADER: [&str; 5] = ["id", "name", "authority", "uri", "description"];
pub const MAPPINGS_HEADER: [&str; 5] = ["subject", "predicate", "object", "confidence", "provenance"];

pub fn write_identifier_systems(registry_dir: &Path, out_dir: &Path) -> Result<Option<PathBuf>> {
    let Some(systems) = load_identifier_systems(registry_dir)
        .with_context(|| format!("load identifier systems from {}", registry_dir.display()))?
    else {
        return Ok(None);
    };
    let path = out_dir.join(IDENTIFIER_SYSTEMS_CSV_FILE);
    let rows = systems.into_iter().map(|system| {
        [
            system.id,
            system.name,
            system.authority,
            system.uri,
            system.description,
        ]
    });
    write_csv(&path, &IDENTIFIER_SYSTEMS_HEADER, rows)?;
    Ok(Some(path))
}

pub fn write_mappings(registry_dir: &Path, out_dir: &Path) -> Result<Option<PathBuf>> {
    let Some(mappings) = load_mappings(registry_dir)
        .with_context(|| format!("load mappings from {}", registry_dir.display()))?
    else {
        return Ok(None);
    };
    let path = out_dir.join(MAPPINGS_CSV_FILE);
    let rows = mappings.into_iter().map(|mapping| {
        [
            mapping.subject,
            mapping.predicate,
            mapping.object,
            format_score(mapping.confidence),
            mapping.provenance,
        ]
    });
    write_csv(&path, &MAPPINGS_HEADER, rows)?;
    Ok(Some(path))
}

/// Write whichever registry tables have a source document. If either fails,
/// neither table is kept.
pub fn write_identifier_registries(registry_dir: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
    write_all_or_nothing(|outputs| {
        outputs.extend(write_identifier_systems(registry_dir, out_dir)?);
        outputs.extend(write_mappings(registry_dir, out_dir)?);
        Ok(())
    })
}
