#![deny(unsafe_code)]

pub mod csv_rows;
pub mod error;
pub mod fixture;
pub mod parser;
pub mod parsers;
pub mod request;

pub use csv_rows::{CsvRow, read_csv_rows};
pub use error::{IngestError, Result};
pub use fixture::{FIXTURE_SCHEME, is_fixture_locator, resolve_fixture};
pub use parser::{ParserRegistry, SchemeParser, default_registry, parse_standard};
pub use parsers::fields_csv::slugify;
pub use request::ParseRequest;
