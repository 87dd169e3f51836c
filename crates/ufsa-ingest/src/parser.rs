//! Parser trait and dispatch registry.
//!
//! Each source format is handled by a [`SchemeParser`] registered in a
//! [`ParserRegistry`] under its [`ParserKind`]. Registry entries name their
//! parser by module reference or data format; [`ParserKind::resolve`] maps
//! that to a kind and the registry supplies the implementation.
//!
//! # Example
//!
//! ```ignore
//! use ufsa_ingest::{ParseRequest, default_registry};
//!
//! let request = ParseRequest::from_standard(&standard, fixtures_dir);
//! let parser = default_registry().for_standard(&standard)?;
//! let scheme = parser.parse(&request, &mut tracker)?;
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use ufsa_model::{ConceptScheme, ParserKind, Standard};
use ufsa_standards::FileTracker;

use crate::error::{IngestError, Result};
use crate::parsers;
use crate::request::ParseRequest;

/// Converts one source format into a populated concept scheme.
///
/// Implementations must:
/// 1. Reject non-fixture locators before reading anything
/// 2. Register every file they read with the tracker
/// 3. Skip malformed records instead of failing the parse
pub trait SchemeParser: Send + Sync {
    /// The format this parser handles.
    fn kind(&self) -> ParserKind;

    /// Returns a human-readable description of the parser.
    fn description(&self) -> &'static str {
        "Scheme parser"
    }

    fn parse(
        &self,
        request: &ParseRequest<'_>,
        tracker: &mut dyn FileTracker,
    ) -> Result<ConceptScheme>;
}

/// Registry of parsers indexed by kind.
pub struct ParserRegistry {
    parsers: BTreeMap<ParserKind, Box<dyn SchemeParser>>,
}

impl ParserRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            parsers: BTreeMap::new(),
        }
    }

    /// Registers a parser for its kind, replacing any previous one.
    pub fn register(&mut self, parser: Box<dyn SchemeParser>) {
        self.parsers.insert(parser.kind(), parser);
    }

    pub fn get(&self, kind: ParserKind) -> Option<&dyn SchemeParser> {
        self.parsers.get(&kind).map(|parser| parser.as_ref())
    }

    /// Resolve the parser declared by a registry entry.
    pub fn for_standard(&self, standard: &Standard) -> Result<&dyn SchemeParser> {
        let kind = standard.parser_kind()?;
        self.get(kind)
            .ok_or(IngestError::ParserNotRegistered { kind })
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Registered kinds in sorted order.
    pub fn kinds(&self) -> impl Iterator<Item = ParserKind> + '_ {
        self.parsers.keys().copied()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        build_default_registry()
    }
}

static DEFAULT_REGISTRY: OnceLock<ParserRegistry> = OnceLock::new();

/// Returns the registry with every built-in parser.
pub fn default_registry() -> &'static ParserRegistry {
    DEFAULT_REGISTRY.get_or_init(build_default_registry)
}

fn build_default_registry() -> ParserRegistry {
    let mut registry = ParserRegistry::new();
    registry.register(Box::new(FunctionParser::new(
        ParserKind::Csv,
        "Code/name pair vocabularies",
        parsers::csv_codes::parse,
    )));
    registry.register(Box::new(FunctionParser::new(
        ParserKind::FieldsCsv,
        "Name/Description field lists",
        parsers::fields_csv::parse,
    )));
    registry.register(Box::new(FunctionParser::new(
        ParserKind::IanaCsv,
        "IANA media type registries",
        parsers::iana_csv::parse,
    )));
    registry.register(Box::new(FunctionParser::new(
        ParserKind::JsonSchema,
        "JSON Schema property trees",
        parsers::json_schema::parse,
    )));
    registry.register(Box::new(FunctionParser::new(
        ParserKind::Rdf,
        "RDF graphs with SKOS concepts",
        parsers::rdf::parse,
    )));
    registry.register(Box::new(FunctionParser::new(
        ParserKind::SqlDdl,
        "SQL CREATE TABLE statements",
        parsers::sql_ddl::parse,
    )));
    registry.register(Box::new(FunctionParser::new(
        ParserKind::CycloneDx,
        "CycloneDX SBOM components",
        parsers::cyclonedx::parse,
    )));
    registry
}

type ParseFn = fn(&ParseRequest<'_>, &mut dyn FileTracker) -> Result<ConceptScheme>;

/// Adapts a parse function to the [`SchemeParser`] trait.
struct FunctionParser {
    kind: ParserKind,
    description: &'static str,
    parse_fn: ParseFn,
}

impl FunctionParser {
    fn new(kind: ParserKind, description: &'static str, parse_fn: ParseFn) -> Self {
        Self {
            kind,
            description,
            parse_fn,
        }
    }
}

impl SchemeParser for FunctionParser {
    fn kind(&self) -> ParserKind {
        self.kind
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn parse(
        &self,
        request: &ParseRequest<'_>,
        tracker: &mut dyn FileTracker,
    ) -> Result<ConceptScheme> {
        (self.parse_fn)(request, tracker)
    }
}

/// Parse one registry entry with the default registry.
pub fn parse_standard(
    standard: &Standard,
    fixtures_dir: &Path,
    tracker: &mut dyn FileTracker,
) -> Result<ConceptScheme> {
    let parser = default_registry().for_standard(standard)?;
    let request = ParseRequest::from_standard(standard, fixtures_dir);
    parser.parse(&request, tracker)
}
