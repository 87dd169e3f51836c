pub mod concept;
pub mod error;
pub mod mapping;
pub mod notes;
pub mod processing;
pub mod standard;

pub use concept::{Concept, ConceptScheme, Relation};
pub use error::{ModelError, Result};
pub use mapping::{LABEL_MATCH_SCORE, MappingCandidate};
pub use notes::Kind;
pub use processing::PipelineResult;
pub use standard::{ParserKind, Registry, Standard};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concepts_own_independent_collections() {
        let mut first = Concept::new("s:a", "A");
        let second = Concept::new("s:b", "B");
        first.broader.push("s:b".to_string());
        first.notes.insert("code".to_string(), "A".to_string());
        assert!(second.broader.is_empty());
        assert!(second.notes.is_empty());
    }

    #[test]
    fn insert_replaces_duplicate_ids() {
        let mut scheme = ConceptScheme::new("s", "Scheme");
        scheme.insert(Concept::new("s:a", "First"));
        let previous = scheme.insert(Concept::new("s:a", "Second"));
        assert_eq!(previous.map(|c| c.label), Some("First".to_string()));
        assert_eq!(scheme.len(), 1);
        assert_eq!(scheme.get("s:a").map(|c| c.label.as_str()), Some("Second"));
    }

    #[test]
    fn parser_kind_prefers_module_over_format() {
        let kind = ParserKind::resolve("ufsa_v2.parsers.fields_csv_parser", "csv").unwrap();
        assert_eq!(kind, ParserKind::FieldsCsv);
        let kind = ParserKind::resolve("", "sbom").unwrap();
        assert_eq!(kind, ParserKind::CycloneDx);
        assert!(ParserKind::resolve("mystery", "xlsx").is_err());
    }
}
