//! Row-oriented CSV reading shared by the tabular parsers.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};

/// One CSV record keyed by header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    values: BTreeMap<String, String>,
    /// Lowercased header -> value. Later duplicate headers win.
    folded: BTreeMap<String, String>,
}

impl CsvRow {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Self::default();
        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            row.folded.insert(key.to_lowercase(), value.clone());
            row.values.insert(key, value);
        }
        row
    }

    /// Value for an exact header, if non-empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        non_empty(self.values.get(key))
    }

    /// First non-empty value among exact headers.
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    /// First non-empty value among headers, compared case-insensitively.
    pub fn first_of_ignore_case(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .find_map(|key| non_empty(self.folded.get(&key.to_lowercase())))
    }

    pub fn is_blank(&self) -> bool {
        self.values.values().all(|value| value.is_empty())
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|value| !value.is_empty())
}

/// Read a headed CSV file into rows.
///
/// Strips a UTF-8 BOM from headers and trims values. Short or long records
/// are accepted; missing cells are simply absent from the row. Records that
/// are not valid UTF-8 are skipped. An undecodable header row fails.
pub fn read_csv_rows(path: &Path) -> Result<Vec<CsvRow>> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(error) if matches!(error.kind(), csv::ErrorKind::Utf8 { .. }) => {
                debug!(path = %path.display(), row = index + 1, %error, "skipping undecodable row");
                continue;
            }
            Err(error) => return Err(csv_error(error)),
        };
        let row = CsvRow::from_pairs(
            headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.clone(), value.trim().to_string())),
        );
        rows.push(row);
    }
    Ok(rows)
}
