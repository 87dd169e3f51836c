//! Shared writers for emitted artifacts.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

/// Pretty JSON with a trailing newline.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("encode {}", path.display()))?;
    std::fs::write(path, format!("{json}\n"))
        .with_context(|| format!("write {}", path.display()))
        .inspect_err(|_| remove_outputs(&[path.to_path_buf()]))
}

/// Write a CSV file with a header row followed by `rows`. A file that fails
/// partway is removed.
pub fn write_csv<I, R>(path: &Path, header: &[&str], rows: I) -> Result<()>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    write_csv_records(path, header, rows).inspect_err(|_| remove_outputs(&[path.to_path_buf()]))
}

fn write_csv_records<I, R>(path: &Path, header: &[&str], rows: I) -> Result<()>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    writer
        .write_record(header)
        .with_context(|| format!("write header {}", path.display()))?;
    for row in rows {
        writer
            .write_record(row)
            .with_context(|| format!("write row {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))
}

/// Run a writer that produces several files. When it fails, the files it
/// already wrote are removed and only the error is returned.
pub fn write_all_or_nothing<F>(write: F) -> Result<Vec<PathBuf>>
where
    F: FnOnce(&mut Vec<PathBuf>) -> Result<()>,
{
    let mut outputs = Vec::new();
    if let Err(error) = write(&mut outputs) {
        remove_outputs(&outputs);
        return Err(error);
    }
    Ok(outputs)
}

/// Delete emitted files. Missing files are ignored.
pub fn remove_outputs(paths: &[PathBuf]) {
    for path in paths {
        match std::fs::remove_file(path) {
            Ok(()) => {}
            Err(error) if error.kind() == ErrorKind::NotFound => {}
            Err(error) => warn!(path = %path.display(), %error, "failed to remove output"),
        }
    }
}

/// Compact JSON encoding of a notes map, as stored in `notes_json` columns.
pub fn notes_json(notes: &BTreeMap<String, String>) -> Result<String> {
    serde_json::to_string(notes).context("encode notes")
}

/// Float as JSON would print it (`1.0`, `0.6`).
pub fn format_score(score: f64) -> String {
    serde_json::to_string(&score).unwrap_or_else(|_| score.to_string())
}

pub fn path_string(path: &Path) -> String {
    path.display().to_string()
}
