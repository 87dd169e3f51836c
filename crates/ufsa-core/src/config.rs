use std::path::{Path, PathBuf};

use ufsa_standards::default_fixtures_dir;

/// Ledger file name used when no tracker path is configured.
pub const DEFAULT_TRACKER_FILE: &str = "tracker.json";

/// Project files tracked for drift when they exist.
pub const DEFAULT_PROJECT_FILES: &[&str] = &["Cargo.toml", "Cargo.lock", "README.md"];

/// Inputs and locations for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub registry_path: PathBuf,
    /// Root that `fixtures://` locators resolve against.
    pub fixtures_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Directory holding `registry.schema.json`, `identifier_systems.yaml`
    /// and `mappings.yaml`. Defaults to the registry file's directory.
    pub registry_dir: Option<PathBuf>,
    /// Defaults to `<output_dir>/tracker.json`.
    pub tracker_path: Option<PathBuf>,
    pub project_files: Vec<PathBuf>,
}

impl PipelineConfig {
    pub fn new(registry_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry_path: registry_path.into(),
            fixtures_dir: default_fixtures_dir(),
            output_dir: output_dir.into(),
            registry_dir: None,
            tracker_path: None,
            project_files: DEFAULT_PROJECT_FILES.iter().map(PathBuf::from).collect(),
        }
    }

    #[must_use]
    pub fn with_fixtures_dir(mut self, fixtures_dir: impl Into<PathBuf>) -> Self {
        self.fixtures_dir = fixtures_dir.into();
        self
    }

    #[must_use]
    pub fn with_registry_dir(mut self, registry_dir: impl Into<PathBuf>) -> Self {
        self.registry_dir = Some(registry_dir.into());
        self
    }

    #[must_use]
    pub fn with_tracker_path(mut self, tracker_path: impl Into<PathBuf>) -> Self {
        self.tracker_path = Some(tracker_path.into());
        self
    }

    #[must_use]
    pub fn with_project_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.project_files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn registry_dir(&self) -> PathBuf {
        self.registry_dir.clone().unwrap_or_else(|| {
            self.registry_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
        })
    }

    pub fn tracker_path(&self) -> PathBuf {
        self.tracker_path
            .clone()
            .unwrap_or_else(|| self.output_dir.join(DEFAULT_TRACKER_FILE))
    }
}
