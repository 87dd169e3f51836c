//! Built-in format adapters.

pub mod csv_codes;
pub mod cyclonedx;
pub mod fields_csv;
pub mod iana_csv;
pub mod json_schema;
pub mod rdf;
pub mod sql_ddl;
