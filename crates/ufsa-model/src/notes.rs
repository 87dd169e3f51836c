//! Conventional note keys.
//!
//! `Concept::notes` is an open map. These keys are the conventions the
//! parsers write and the emitters read; any other key passes through
//! untouched.

pub const DESCRIPTION: &str = "description";
pub const NOTATION: &str = "notation";
pub const CODE: &str = "code";
pub const ALT_LABEL: &str = "altLabel";
pub const TYPE: &str = "type";
pub const DATA_TYPE: &str = "data_type";
pub const KIND: &str = "kind";
pub const PURL: &str = "purl";
pub const LICENSES: &str = "licenses";
pub const HASHES: &str = "hashes";
pub const EXTERNAL_REFERENCES: &str = "externalReferences";
pub const VALUESET_HINT: &str = "valueset_hint";

/// Separator used when a note joins several values.
pub const LIST_SEPARATOR: &str = ";";

/// Specialized concept kinds that get dedicated output tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    SoftwareComponent,
    Table,
    Column,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::SoftwareComponent => "software_component",
            Kind::Table => "table",
            Kind::Column => "column",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "software_component" => Some(Kind::SoftwareComponent),
            "table" => Some(Kind::Table),
            "column" => Some(Kind::Column),
            _ => None,
        }
    }

    pub fn is_database(self) -> bool {
        matches!(self, Kind::Table | Kind::Column)
    }
}
