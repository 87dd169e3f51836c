//! Fixture locator resolution.
//!
//! Parsers never touch the network. A specification URL of the form
//! `fixtures://<relative-path>` resolves to `<fixtures_dir>/<relative-path>`;
//! any other scheme is rejected.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

pub const FIXTURE_SCHEME: &str = "fixtures://";

pub fn is_fixture_locator(url: &str) -> bool {
    url.starts_with(FIXTURE_SCHEME)
}

/// Resolve a `fixtures://` locator against `fixtures_dir`.
pub fn resolve_fixture(url: &str, fixtures_dir: &Path) -> Result<PathBuf> {
    let relative = url
        .strip_prefix(FIXTURE_SCHEME)
        .ok_or_else(|| IngestError::FixtureLocatorRequired {
            url: url.to_string(),
        })?;
    Ok(fixtures_dir.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_to_fixtures_dir() {
        let path = resolve_fixture("fixtures://iso/codes.csv", Path::new("data/fixtures")).unwrap();
        assert_eq!(path, Path::new("data/fixtures").join("iso/codes.csv"));
    }

    #[test]
    fn rejects_other_schemes() {
        for url in ["https://example.org/codes.csv", "file:///tmp/codes.csv", "codes.csv"] {
            let err = resolve_fixture(url, Path::new("fixtures")).unwrap_err();
            assert!(matches!(err, IngestError::FixtureLocatorRequired { .. }), "{url}");
        }
    }
}
