//! RDF graphs carrying SKOS concepts.
//!
//! The fixture is loaded into a small in-memory index of
//! `subject -> [(predicate, object)]`. Every subject typed `skos:Concept`
//! with a `skos:prefLabel` or `rdfs:label` becomes a concept; relations are
//! wired in a second pass so targets are scoped the same way as sources.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use oxrdf::Term;
use oxrdfio::{RdfFormat, RdfParser};
use tracing::debug;
use ufsa_model::notes::{ALT_LABEL, DESCRIPTION, LIST_SEPARATOR, NOTATION};
use ufsa_model::{Concept, ConceptScheme, Relation};
use ufsa_standards::FileTracker;

use crate::error::{IngestError, Result};
use crate::request::ParseRequest;

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";

fn skos(local: &str) -> String {
    format!("{SKOS}{local}")
}

/// Subjects with their outgoing edges, in first-seen order. A repeated
/// triple is stored once.
#[derive(Debug, Default)]
struct Graph {
    order: Vec<String>,
    edges: BTreeMap<String, Vec<(String, String)>>,
}

impl Graph {
    fn add(&mut self, subject: String, predicate: String, object: String) {
        let edges = self.edges.entry(subject.clone()).or_insert_with(|| {
            self.order.push(subject);
            Vec::new()
        });
        let edge = (predicate, object);
        if !edges.contains(&edge) {
            edges.push(edge);
        }
    }

    fn objects<'a>(&'a self, subject: &str, predicate: &str) -> impl Iterator<Item = &'a str> {
        self.edges
            .get(subject)
            .into_iter()
            .flatten()
            .filter(move |(p, _)| p == predicate)
            .map(|(_, o)| o.as_str())
    }

    fn value(&self, subject: &str, predicate: &str) -> Option<&str> {
        self.objects(subject, predicate).find(|value| !value.is_empty())
    }

    /// Subjects typed as `class`, in first-seen order.
    fn subjects_of_type(&self, class: &str) -> Vec<&str> {
        self.order
            .iter()
            .filter(|subject| self.objects(subject, RDF_TYPE).any(|o| o == class))
            .map(String::as_str)
            .collect()
    }
}

/// Serialization chosen from the fixture extension; Turtle when unknown.
pub fn format_for_path(path: &Path) -> RdfFormat {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "nt" => RdfFormat::NTriples,
        "nq" => RdfFormat::NQuads,
        "trig" => RdfFormat::TriG,
        "rdf" | "owl" | "xml" => RdfFormat::RdfXml,
        _ => RdfFormat::Turtle,
    }
}

pub fn parse(request: &ParseRequest<'_>, tracker: &mut dyn FileTracker) -> Result<ConceptScheme> {
    let path = request.track_fixture(tracker)?;
    let graph = load_graph(&path)?;

    let mut scheme = request.new_scheme();
    let concepts = graph.subjects_of_type(&skos("Concept"));

    for subject in &concepts {
        let label = graph
            .value(subject, &skos("prefLabel"))
            .or_else(|| graph.value(subject, RDFS_LABEL));
        let Some(label) = label else {
            debug!(standard_id = request.standard_id, subject, "skipping unlabelled concept");
            continue;
        };
        let mut concept = request.concept(subject, label);
        if let Some(definition) = graph.value(subject, &skos("definition")) {
            concept = concept.with_note(DESCRIPTION, definition);
        }
        if let Some(notations) = joined(&graph, subject, &skos("notation")) {
            concept = concept.with_note(NOTATION, notations);
        }
        if let Some(alt_labels) = joined(&graph, subject, &skos("altLabel")) {
            concept = concept.with_note(ALT_LABEL, alt_labels);
        }
        scheme.insert(concept);
    }

    for subject in &concepts {
        let Some(concept) = scheme.get_mut(&request.concept_id(subject)) else {
            continue;
        };
        wire_relations(request, &graph, subject, concept);
    }

    if scheme.is_empty() {
        debug!(standard_id = request.standard_id, "no SKOS concepts found; adding scheme concept");
        scheme.insert(request.concept(request.concept_scheme_uri, request.name));
    }
    Ok(scheme)
}

/// Hierarchical relations are scheme-scoped; match predicates keep raw URIs.
fn wire_relations(request: &ParseRequest<'_>, graph: &Graph, subject: &str, concept: &mut Concept) {
    for (relation, local) in [
        (Relation::Broader, "broader"),
        (Relation::Narrower, "narrower"),
        (Relation::Related, "related"),
    ] {
        let predicate = skos(local);
        let targets = graph.objects(subject, &predicate).map(|o| request.concept_id(o));
        concept.relation_mut(relation).extend(targets);
    }
    for (relation, local) in [
        (Relation::ExactMatch, "exactMatch"),
        (Relation::CloseMatch, "closeMatch"),
        (Relation::BroadMatch, "broadMatch"),
        (Relation::NarrowMatch, "narrowMatch"),
        (Relation::RelatedMatch, "relatedMatch"),
    ] {
        let predicate = skos(local);
        let targets = graph.objects(subject, &predicate).map(str::to_string);
        concept.relation_mut(relation).extend(targets);
    }
}

fn joined(graph: &Graph, subject: &str, predicate: &str) -> Option<String> {
    let values: Vec<&str> = graph.objects(subject, predicate).collect();
    if values.is_empty() {
        None
    } else {
        Some(values.join(LIST_SEPARATOR))
    }
}

fn load_graph(path: &Path) -> Result<Graph> {
    let file = File::open(path).map_err(|e| IngestError::read(path, e))?;
    let parser = base_parser(path);

    let mut graph = Graph::default();
    for quad in parser.for_reader(BufReader::new(file)) {
        let quad = quad.map_err(|e| IngestError::Rdf {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        graph.add(
            term_text(&Term::from(quad.subject)),
            quad.predicate.as_str().to_string(),
            term_text(&quad.object),
        );
    }
    Ok(graph)
}

/// Relative IRIs resolve against the fixture's own location when possible.
fn base_parser(path: &Path) -> RdfParser {
    let parser = RdfParser::from_format(format_for_path(path));
    let Ok(absolute) = std::fs::canonicalize(path) else {
        return parser;
    };
    let base = format!("file://{}", absolute.display());
    match RdfParser::from_format(format_for_path(path)).with_base_iri(&base) {
        Ok(with_base) => with_base,
        Err(_) => parser,
    }
}

/// Lexical form of a node: IRI text, blank node id or literal value.
fn term_text(term: &Term) -> String {
    match term {
        Term::NamedNode(node) => node.as_str().to_string(),
        Term::BlankNode(node) => node.as_str().to_string(),
        Term::Literal(literal) => literal.value().to_string(),
        #[allow(unreachable_patterns)]
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(format_for_path(Path::new("a.ttl")), RdfFormat::Turtle);
        assert_eq!(format_for_path(Path::new("a.NT")), RdfFormat::NTriples);
        assert_eq!(format_for_path(Path::new("a.rdf")), RdfFormat::RdfXml);
        assert_eq!(format_for_path(Path::new("a.skos")), RdfFormat::Turtle);
    }

    #[test]
    fn graph_keeps_first_seen_subject_order() {
        let mut graph = Graph::default();
        graph.add("urn:b".into(), RDF_TYPE.into(), skos("Concept"));
        graph.add("urn:a".into(), RDF_TYPE.into(), skos("Concept"));
        graph.add("urn:b".into(), RDFS_LABEL.into(), "B".into());
        assert_eq!(graph.subjects_of_type(&skos("Concept")), vec!["urn:b", "urn:a"]);
        assert_eq!(graph.value("urn:b", RDFS_LABEL), Some("B"));
    }

    #[test]
    fn repeated_triples_collapse() {
        let mut graph = Graph::default();
        graph.add("urn:a".into(), skos("notation"), "D1".into());
        graph.add("urn:a".into(), skos("notation"), "D1".into());
        graph.add("urn:a".into(), skos("notation"), "D2".into());
        assert_eq!(joined(&graph, "urn:a", &skos("notation")).as_deref(), Some("D1;D2"));
    }
}
