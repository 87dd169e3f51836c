//! SKOS-style concepts and concept schemes.
//!
//! A [`ConceptScheme`] is the normalized form of one ingested standard. Each
//! [`Concept`] owns its own annotation map and relation lists; relation lists
//! hold concept ids (hierarchical/associative) or external URIs (match
//! predicates) and are not validated against the scheme.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::notes::{KIND, Kind};

/// A normalized unit of meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    /// Globally unique id, conventionally `<scheme_id>:<local_id>`.
    pub id: String,
    /// Preferred human-readable label.
    pub label: String,
    /// Free-form annotations (description, notation, code, data_type, ...).
    #[serde(default)]
    pub notes: BTreeMap<String, String>,
    #[serde(default)]
    pub broader: Vec<String>,
    #[serde(default)]
    pub narrower: Vec<String>,
    #[serde(default)]
    pub related: Vec<String>,
    /// Canonical URI of the owning scheme.
    #[serde(default)]
    pub in_scheme: Option<String>,
    #[serde(default)]
    pub exact_match: Vec<String>,
    #[serde(default)]
    pub close_match: Vec<String>,
    #[serde(default)]
    pub broad_match: Vec<String>,
    #[serde(default)]
    pub narrow_match: Vec<String>,
    #[serde(default)]
    pub related_match: Vec<String>,
}

impl Concept {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Set the owning scheme URI.
    #[must_use]
    pub fn with_scheme(mut self, uri: impl Into<String>) -> Self {
        self.in_scheme = Some(uri.into());
        self
    }

    /// Add a note, replacing any previous value for the key.
    #[must_use]
    pub fn with_note(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.notes.insert(key.into(), value.into());
        self
    }

    pub fn note(&self, key: &str) -> Option<&str> {
        self.notes.get(key).map(String::as_str)
    }

    /// The `kind` tag, if it names one of the specialized kinds.
    pub fn kind(&self) -> Option<Kind> {
        self.note(KIND).and_then(Kind::parse)
    }

    /// Relation list for a predicate.
    pub fn relation(&self, relation: Relation) -> &[String] {
        match relation {
            Relation::Broader => &self.broader,
            Relation::Narrower => &self.narrower,
            Relation::Related => &self.related,
            Relation::ExactMatch => &self.exact_match,
            Relation::CloseMatch => &self.close_match,
            Relation::BroadMatch => &self.broad_match,
            Relation::NarrowMatch => &self.narrow_match,
            Relation::RelatedMatch => &self.related_match,
        }
    }

    pub fn relation_mut(&mut self, relation: Relation) -> &mut Vec<String> {
        match relation {
            Relation::Broader => &mut self.broader,
            Relation::Narrower => &mut self.narrower,
            Relation::Related => &mut self.related,
            Relation::ExactMatch => &mut self.exact_match,
            Relation::CloseMatch => &mut self.close_match,
            Relation::BroadMatch => &mut self.broad_match,
            Relation::NarrowMatch => &mut self.narrow_match,
            Relation::RelatedMatch => &mut self.related_match,
        }
    }

    /// All relation edges of this concept, in predicate order.
    pub fn edges(&self) -> impl Iterator<Item = (Relation, &str)> + '_ {
        Relation::ALL.into_iter().flat_map(move |relation| {
            self.relation(relation)
                .iter()
                .map(move |object| (relation, object.as_str()))
        })
    }
}

/// A named collection of concepts belonging to one standard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptScheme {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub concepts: BTreeMap<String, Concept>,
}

impl ConceptScheme {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            concepts: BTreeMap::new(),
        }
    }

    /// Insert a concept keyed by its id. A concept with the same id is replaced.
    pub fn insert(&mut self, concept: Concept) -> Option<Concept> {
        self.concepts.insert(concept.id.clone(), concept)
    }

    pub fn get(&self, id: &str) -> Option<&Concept> {
        self.concepts.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Concept> {
        self.concepts.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.concepts.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Scheme URI taken from the first concept that carries one.
    pub fn scheme_uri(&self) -> Option<&str> {
        self.concepts
            .values()
            .find_map(|concept| concept.in_scheme.as_deref())
    }
}

/// The eight SKOS relation predicates carried by a [`Concept`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relation {
    Broader,
    Narrower,
    Related,
    ExactMatch,
    CloseMatch,
    BroadMatch,
    NarrowMatch,
    RelatedMatch,
}

impl Relation {
    pub const ALL: [Relation; 8] = [
        Relation::Broader,
        Relation::Narrower,
        Relation::Related,
        Relation::ExactMatch,
        Relation::CloseMatch,
        Relation::BroadMatch,
        Relation::NarrowMatch,
        Relation::RelatedMatch,
    ];

    /// Cross-scheme match predicates, strongest first.
    pub const MATCHES: [Relation; 5] = [
        Relation::ExactMatch,
        Relation::CloseMatch,
        Relation::BroadMatch,
        Relation::NarrowMatch,
        Relation::RelatedMatch,
    ];

    /// Compact `skos:` name used in emitted relation tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Broader => "skos:broader",
            Relation::Narrower => "skos:narrower",
            Relation::Related => "skos:related",
            Relation::ExactMatch => "skos:exactMatch",
            Relation::CloseMatch => "skos:closeMatch",
            Relation::BroadMatch => "skos:broadMatch",
            Relation::NarrowMatch => "skos:narrowMatch",
            Relation::RelatedMatch => "skos:relatedMatch",
        }
    }

    pub fn is_match(self) -> bool {
        Self::MATCHES.contains(&self)
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
