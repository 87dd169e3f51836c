#![deny(unsafe_code)]

pub mod error;
pub mod hash;
pub mod identifiers;
pub mod paths;
pub mod registry;
pub mod tracker;

pub use crate::error::StandardsError;
pub use crate::identifiers::{
    IdentifierSystem, MappingEntry, load_identifier_systems, load_mappings,
};
pub use crate::paths::{FIXTURES_ENV_VAR, default_fixtures_dir};
pub use crate::registry::{SchemaValidation, load_registry, load_registry_with_schema};
pub use crate::tracker::{FileTracker, Mismatch, TrackedFile, Tracker, compute_mismatches};
