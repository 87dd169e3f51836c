//! Error types for standards ingestion.

use std::path::PathBuf;

use thiserror::Error;
use ufsa_model::{ModelError, ParserKind};
use ufsa_standards::StandardsError;

/// Errors that can occur while parsing a standard into a concept scheme.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Configuration Errors ===
    /// The specification URL is not a `fixtures://` locator.
    #[error("specification url must use the fixtures:// scheme, got '{url}'")]
    FixtureLocatorRequired { url: String },

    /// The registry entry names a parser that cannot be resolved.
    #[error(transparent)]
    UnknownParser(#[from] ModelError),

    /// The parser kind resolved but nothing is registered for it.
    #[error("no parser registered for '{kind}'")]
    ParserNotRegistered { kind: ParserKind },

    // === File System Errors ===
    /// Failed to register a fixture with the file tracker.
    #[error("failed to track fixture: {0}")]
    Track(#[from] StandardsError),

    /// Failed to read a fixture file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Decoding Errors ===
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse RDF {path}: {message}")]
    Rdf { path: PathBuf, message: String },
}

impl IngestError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
