#![deny(unsafe_code)]

//! Artifact hash ledger.
//!
//! Every source file a parser reads and every artifact the pipeline writes is
//! recorded with its sha256 so a later `verify` can detect drift. The ledger
//! is a JSON document `{ "meta": {...}, "files": { path: { "sha256": .. } } }`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::StandardsError;
use crate::hash::file_sha256;

/// Records files whose content later runs must not silently change.
pub trait FileTracker {
    /// Hash `path` and record it. Fails if the file cannot be read.
    fn track_file(&mut self, path: &Path) -> Result<(), StandardsError>;

    /// Forget a previously tracked path.
    fn untrack(&mut self, _path: &Path) {}

    /// Attach run metadata. Trackers without a ledger ignore it.
    fn record_meta(&mut self, _key: &str, _value: Value) {}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedFile {
    pub sha256: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Ledger {
    #[serde(default)]
    meta: Map<String, Value>,
    #[serde(default)]
    files: BTreeMap<String, TrackedFile>,
}

/// File-backed ledger of tracked paths and run metadata.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    path: Option<PathBuf>,
    pub files: BTreeMap<String, TrackedFile>,
    pub meta: Map<String, Value>,
}

impl Tracker {
    /// A ledger that is never persisted.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the ledger at `path`, starting fresh when it is missing or
    /// unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ledger = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Ledger>(&contents) {
                Ok(ledger) => ledger,
                Err(error) => {
                    debug!(path = %path.display(), %error, "failed to read tracker file; starting fresh");
                    Ledger::default()
                }
            },
            Err(_) => Ledger::default(),
        };
        Self {
            path: Some(path),
            files: ledger.files,
            meta: ledger.meta,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_tracked(&self, path: &Path) -> bool {
        self.files.contains_key(&ledger_key(path))
    }

    pub fn set_meta(&mut self, key: impl Into<String>, value: Value) {
        self.meta.insert(key.into(), value);
    }

    /// Stamp and write the ledger to its path.
    pub fn save(&mut self) -> Result<PathBuf, StandardsError> {
        let path = self.path.clone().ok_or(StandardsError::NoLedgerPath)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&mut self, path: &Path) -> Result<(), StandardsError> {
        self.meta.insert(
            "generatedAt".to_string(),
            Value::String(chrono::Utc::now().to_rfc3339()),
        );
        self.meta.insert(
            "ufsa".to_string(),
            Value::String(env!("CARGO_PKG_VERSION").to_string()),
        );
        let ledger = Ledger {
            meta: self.meta.clone(),
            files: self.files.clone(),
        };
        let json = serde_json::to_string_pretty(&ledger).map_err(|e| StandardsError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StandardsError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(path, format!("{json}\n")).map_err(|e| StandardsError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl FileTracker for Tracker {
    fn track_file(&mut self, path: &Path) -> Result<(), StandardsError> {
        let sha256 = file_sha256(path)?;
        self.files.insert(ledger_key(path), TrackedFile { sha256 });
        Ok(())
    }

    fn untrack(&mut self, path: &Path) {
        self.files.remove(&ledger_key(path));
    }

    fn record_meta(&mut self, key: &str, value: Value) {
        self.set_meta(key, value);
    }
}

fn ledger_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// A tracked file whose current content differs from the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub path: String,
    pub expected_sha256: String,
    /// Empty when the file no longer exists.
    pub actual_sha256: String,
    pub exists: bool,
}

/// Compare every tracked file against the filesystem.
pub fn compute_mismatches(tracker: &Tracker) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();
    for (path, tracked) in &tracker.files {
        let file = Path::new(path);
        if !file.exists() {
            mismatches.push(Mismatch {
                path: path.clone(),
                expected_sha256: tracked.sha256.clone(),
                actual_sha256: String::new(),
                exists: false,
            });
            continue;
        }
        let actual = file_sha256(file).unwrap_or_default();
        if actual != tracked.sha256 {
            mismatches.push(Mismatch {
                path: path.clone(),
                expected_sha256: tracked.sha256.clone(),
                actual_sha256: actual,
                exists: true,
            });
        }
    }
    mismatches
}
