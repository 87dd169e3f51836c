//! Naive label-equality mapping candidates.
//!
//! Concepts are bucketed by trimmed, lowercased label. Every unordered pair
//! within a bucket is a candidate with score 1.0. There is no cross-kind
//! filtering: a table and a column sharing a label will pair up.

use std::collections::BTreeMap;

use ufsa_model::{ConceptScheme, LABEL_MATCH_SCORE, MappingCandidate};

/// Key concepts are bucketed by.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Candidates ordered by bucket label, then by position within the bucket
/// (scheme id, then concept id).
pub fn generate_mapping_candidates(
    schemes: &BTreeMap<String, ConceptScheme>,
) -> Vec<MappingCandidate> {
    let mut buckets: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    for scheme in schemes.values() {
        for concept in scheme.concepts.values() {
            buckets
                .entry(normalize_label(&concept.label))
                .or_default()
                .push(&concept.id);
        }
    }

    let mut candidates = Vec::new();
    for ids in buckets.values().filter(|ids| ids.len() > 1) {
        for (index, source) in ids.iter().enumerate() {
            for target in &ids[index + 1..] {
                candidates.push(MappingCandidate::new(*source, *target, LABEL_MATCH_SCORE));
            }
        }
    }
    candidates
}
