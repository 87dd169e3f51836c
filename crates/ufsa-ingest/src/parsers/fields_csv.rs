//! Generic field lists with `Name` and `Description` columns.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use ufsa_model::ConceptScheme;
use ufsa_model::notes::DESCRIPTION;
use ufsa_standards::FileTracker;

use crate::csv_rows::read_csv_rows;
use crate::error::Result;
use crate::request::ParseRequest;

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("valid slug regex"));

/// Fallback local id for names that contain no usable characters.
pub const FALLBACK_SLUG: &str = "field";

/// Standard whose composite and share-class identifiers are linked.
const OPENFIGI_STANDARD: &str = "openfigi_v3";

/// Stable local id derived from a field name.
///
/// Runs of characters outside `[A-Za-z0-9_]` collapse to `_`, leading and
/// trailing underscores are trimmed and the result is lowercased.
pub fn slugify(name: &str) -> String {
    let replaced = NON_ALNUM.replace_all(name.trim(), "_");
    let slug = replaced.trim_matches('_').to_lowercase();
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

pub fn parse(request: &ParseRequest<'_>, tracker: &mut dyn FileTracker) -> Result<ConceptScheme> {
    let path = request.track_fixture(tracker)?;
    let mut scheme = request.new_scheme();

    for (index, row) in read_csv_rows(&path)?.iter().enumerate() {
        let Some(name) = row.first_of(&["Name", "name"]) else {
            debug!(standard_id = request.standard_id, row = index + 1, "skipping row without name");
            continue;
        };
        let mut concept = request.concept(&slugify(name), name);
        if let Some(description) = row.first_of(&["Description", "description"]) {
            concept = concept.with_note(DESCRIPTION, description);
        }
        scheme.insert(concept);
    }

    if request.standard_id == OPENFIGI_STANDARD {
        link_composite_share_class(request, &mut scheme);
    }
    Ok(scheme)
}

/// A composite FIGI groups share-class FIGIs.
fn link_composite_share_class(request: &ParseRequest<'_>, scheme: &mut ConceptScheme) {
    let composite = request.concept_id(&slugify("compositeFIGI"));
    let share_class = request.concept_id(&slugify("shareClassFIGI"));
    if !(scheme.contains(&composite) && scheme.contains(&share_class)) {
        return;
    }
    if let Some(concept) = scheme.get_mut(&composite) {
        concept.narrower.push(share_class.clone());
    }
    if let Some(concept) = scheme.get_mut(&share_class) {
        concept.broader.push(composite);
    }
}
