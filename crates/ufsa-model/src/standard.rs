//! Registry entries describing which standards to ingest and how.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// One "standard to ingest" entry from the registry document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standard {
    pub standard_id: String,
    pub name: String,
    pub governing_body: String,
    /// Source locator; only `fixtures://` locators are resolved by parsers.
    pub specification_url: String,
    pub data_format: String,
    /// Parser reference, e.g. `ufsa_v2.parsers.csv_parser` or `csv`.
    pub parser_module: String,
    /// URI assigned to every concept's `in_scheme`.
    pub concept_scheme_uri: String,
}

impl Standard {
    /// Resolve the parser declared by this entry.
    pub fn parser_kind(&self) -> Result<ParserKind> {
        ParserKind::resolve(&self.parser_module, &self.data_format)
    }
}

/// Ordered, immutable list of standards loaded once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub standards: Vec<Standard>,
}

impl Registry {
    pub fn len(&self) -> usize {
        self.standards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.standards.is_empty()
    }

    pub fn get(&self, standard_id: &str) -> Option<&Standard> {
        self.standards
            .iter()
            .find(|standard| standard.standard_id == standard_id)
    }

    /// Every entry needs a non-blank id: it names the scheme and its files.
    pub fn validate(&self) -> Result<()> {
        match self
            .standards
            .iter()
            .position(|standard| standard.standard_id.trim().is_empty())
        {
            Some(index) => Err(ModelError::EmptyStandardId { index }),
            None => Ok(()),
        }
    }
}

/// Format adapters available to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserKind {
    /// Code/name pair vocabularies.
    Csv,
    /// Generic `Name`/`Description` field lists.
    FieldsCsv,
    /// IANA media-type registries.
    IanaCsv,
    JsonSchema,
    /// RDF graphs carrying SKOS concepts.
    Rdf,
    SqlDdl,
    /// CycloneDX SBOM documents.
    CycloneDx,
}

impl ParserKind {
    pub const ALL: [ParserKind; 7] = [
        ParserKind::Csv,
        ParserKind::FieldsCsv,
        ParserKind::IanaCsv,
        ParserKind::JsonSchema,
        ParserKind::Rdf,
        ParserKind::SqlDdl,
        ParserKind::CycloneDx,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ParserKind::Csv => "csv",
            ParserKind::FieldsCsv => "fields_csv",
            ParserKind::IanaCsv => "iana_csv",
            ParserKind::JsonSchema => "json_schema",
            ParserKind::Rdf => "rdf",
            ParserKind::SqlDdl => "sql_ddl",
            ParserKind::CycloneDx => "cyclonedx",
        }
    }

    /// Resolve a parser from the declared module reference, falling back to
    /// the declared data format.
    pub fn resolve(parser_module: &str, data_format: &str) -> Result<Self> {
        Self::from_module(parser_module)
            .or_else(|| Self::from_format(data_format))
            .ok_or_else(|| ModelError::UnknownParser {
                module: parser_module.to_string(),
                format: data_format.to_string(),
            })
    }

    /// Match the last dotted segment of a module reference.
    pub fn from_module(parser_module: &str) -> Option<Self> {
        let name = parser_module
            .rsplit(['.', ':', '/'])
            .next()
            .unwrap_or(parser_module)
            .trim()
            .to_ascii_lowercase();
        match name.as_str() {
            "csv_parser" | "csv" => Some(ParserKind::Csv),
            "fields_csv_parser" | "fields_csv" => Some(ParserKind::FieldsCsv),
            "iana_csv_parser" | "iana_csv" => Some(ParserKind::IanaCsv),
            "json_schema_parser" | "json_schema" => Some(ParserKind::JsonSchema),
            "rdf_parser" | "rdf" => Some(ParserKind::Rdf),
            "parser_ast_sql" | "sql_ddl" => Some(ParserKind::SqlDdl),
            "parser_cyclonedx" | "cyclonedx" => Some(ParserKind::CycloneDx),
            _ => None,
        }
    }

    pub fn from_format(data_format: &str) -> Option<Self> {
        match data_format.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(ParserKind::Csv),
            "json" | "json_schema" | "jsonschema" => Some(ParserKind::JsonSchema),
            "rdf" | "skos" | "turtle" | "ttl" | "xml" | "rdf/xml" => Some(ParserKind::Rdf),
            "sql" | "ddl" => Some(ParserKind::SqlDdl),
            "sbom" | "cyclonedx" => Some(ParserKind::CycloneDx),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
