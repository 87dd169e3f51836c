use serde::{Deserialize, Serialize};

/// Score given to label-equality candidates.
pub const LABEL_MATCH_SCORE: f64 = 1.0;

/// An unverified suggestion that two concepts denote the same thing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingCandidate {
    pub source: String,
    pub target: String,
    pub score: f64,
}

impl MappingCandidate {
    pub fn new(source: impl Into<String>, target: impl Into<String>, score: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            score,
        }
    }

    /// True when the candidate links `a` and `b` in either direction.
    pub fn links(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}
