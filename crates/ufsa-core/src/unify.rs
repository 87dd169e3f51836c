use std::collections::BTreeMap;

use tracing::warn;
use ufsa_model::ConceptScheme;

/// Index schemes by id. A later scheme replaces an earlier one with the
/// same id; concepts are never merged across schemes.
pub fn unify(schemes: Vec<ConceptScheme>) -> BTreeMap<String, ConceptScheme> {
    let mut unified = BTreeMap::new();
    for scheme in schemes {
        if let Some(previous) = unified.insert(scheme.id.clone(), scheme) {
            warn!(scheme_id = %previous.id, "duplicate scheme id; keeping the later scheme");
        }
    }
    unified
}

#[cfg(test)]
mod tests {
    use ufsa_model::Concept;

    use super::*;

    #[test]
    fn last_scheme_wins_on_id_collision() {
        let mut first = ConceptScheme::new("iso", "First");
        first.insert(Concept::new("iso:a", "A"));
        let second = ConceptScheme::new("iso", "Second");
        let other = ConceptScheme::new("fhir", "FHIR");

        let unified = unify(vec![first, second, other]);

        assert_eq!(unified.len(), 2);
        assert_eq!(unified["iso"].label, "Second");
        assert!(unified["iso"].is_empty());
    }
}
