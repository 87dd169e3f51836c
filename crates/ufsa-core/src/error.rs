use std::path::PathBuf;

use thiserror::Error;
use ufsa_ingest::IngestError;
use ufsa_standards::StandardsError;

use crate::report::Stage;

/// Failures that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to load registry {path}: {source}")]
    Registry {
        path: PathBuf,
        #[source]
        source: StandardsError,
    },

    #[error("failed to parse standard '{standard_id}': {source}")]
    Parse {
        standard_id: String,
        #[source]
        source: IngestError,
    },

    #[error("failed to track {path}: {source}")]
    Track {
        path: PathBuf,
        #[source]
        source: StandardsError,
    },

    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} emission failed: {message}")]
    Emit { stage: Stage, message: String },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
