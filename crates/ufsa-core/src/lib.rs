//! Scheme unification, mapping candidates and the ingestion pipeline.
//!
//! [`run_pipeline`] is the entry point: it loads a registry, parses every
//! standard, unifies the schemes and emits all artifacts, returning a
//! [`RunReport`] with one outcome per emission stage.

#![deny(unsafe_code)]

pub mod candidates;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod unify;

pub use candidates::{generate_mapping_candidates, normalize_label};
pub use config::{DEFAULT_PROJECT_FILES, DEFAULT_TRACKER_FILE, PipelineConfig};
pub use error::{PipelineError, Result};
pub use pipeline::run_pipeline;
pub use report::{RunReport, Stage, StageOutcome, StageReport};
pub use unify::unify;
