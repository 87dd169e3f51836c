use std::path::{Path, PathBuf};

use ufsa_model::{Concept, ConceptScheme, Standard};
use ufsa_standards::FileTracker;

use crate::error::{IngestError, Result};
use crate::fixture::resolve_fixture;

/// Inputs every parser receives for one registry entry.
#[derive(Debug, Clone, Copy)]
pub struct ParseRequest<'a> {
    pub standard_id: &'a str,
    pub name: &'a str,
    pub governing_body: &'a str,
    pub specification_url: &'a str,
    pub concept_scheme_uri: &'a str,
    pub fixtures_dir: &'a Path,
}

impl<'a> ParseRequest<'a> {
    pub fn from_standard(standard: &'a Standard, fixtures_dir: &'a Path) -> Self {
        Self {
            standard_id: &standard.standard_id,
            name: &standard.name,
            governing_body: &standard.governing_body,
            specification_url: &standard.specification_url,
            concept_scheme_uri: &standard.concept_scheme_uri,
            fixtures_dir,
        }
    }

    /// Resolve the fixture and register it with the tracker.
    ///
    /// Fails before any file access when the locator is not a fixture.
    pub fn track_fixture(&self, tracker: &mut dyn FileTracker) -> Result<PathBuf> {
        let path = resolve_fixture(self.specification_url, self.fixtures_dir)?;
        tracker.track_file(&path)?;
        Ok(path)
    }

    /// Track the fixture and return its contents as text.
    pub fn read_fixture(&self, tracker: &mut dyn FileTracker) -> Result<(PathBuf, String)> {
        let path = self.track_fixture(tracker)?;
        let text = std::fs::read_to_string(&path).map_err(|e| IngestError::read(&path, e))?;
        Ok((path, text))
    }

    /// Empty scheme named after this standard.
    pub fn new_scheme(&self) -> ConceptScheme {
        ConceptScheme::new(self.standard_id, self.name)
    }

    /// Scheme-scoped concept id.
    pub fn concept_id(&self, local_id: &str) -> String {
        format!("{}:{local_id}", self.standard_id)
    }

    /// Concept with a scoped id, owned by this scheme.
    pub fn concept(&self, local_id: &str, label: impl Into<String>) -> Concept {
        Concept::new(self.concept_id(local_id), label).with_scheme(self.concept_scheme_uri)
    }
}
