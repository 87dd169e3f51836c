//! Emitters for unified concept schemes.
//!
//! - **Per-scheme**: `<scheme_id>.concepts.json` and `.csv`
//! - **Indexes**: `concept_schemes.index.json`, `concepts.all.json/.csv`
//! - **Global tables**: schemes, concepts, relations, software components,
//!   database schemas
//! - **Registries**: identifier systems and curated mappings
//! - **Candidates**: label-equality mapping suggestions

pub mod candidates;
mod common;
pub mod idmap;
pub mod index;
pub mod scheme;
pub mod tables;

pub use candidates::write_candidate_mappings;
pub use common::{path_string, remove_outputs};
pub use idmap::write_identifier_registries;
pub use index::{write_global_indexes, write_scheme_index};
pub use scheme::{read_scheme_json, write_scheme_csv, write_scheme_json, write_scheme_outputs};
pub use tables::write_global_tables;
