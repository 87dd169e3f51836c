//! Fixture directory resolution.

use std::path::PathBuf;

/// Environment variable for overriding the fixtures directory.
pub const FIXTURES_ENV_VAR: &str = "UFSA_FIXTURES_DIR";

/// Directory `fixtures://` locators resolve against, relative to the
/// working directory unless overridden.
pub const DEFAULT_FIXTURES_DIR: &str = "data/fixtures";

/// Get the fixtures root directory.
///
/// Resolution order:
/// 1. `UFSA_FIXTURES_DIR` environment variable
/// 2. `data/fixtures` relative to the working directory
pub fn default_fixtures_dir() -> PathBuf {
    if let Ok(root) = std::env::var(FIXTURES_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(DEFAULT_FIXTURES_DIR)
}
