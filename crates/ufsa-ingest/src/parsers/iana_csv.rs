//! IANA-style media type registries (`Name`, `Template` columns).

use tracing::debug;
use ufsa_model::ConceptScheme;
use ufsa_model::notes::NOTATION;
use ufsa_standards::FileTracker;

use crate::csv_rows::read_csv_rows;
use crate::error::Result;
use crate::request::ParseRequest;

const LABEL_COLUMNS: &[&str] = &["name", "label", "type"];
const NOTATION_COLUMNS: &[&str] = &["template", "mime", "value"];

/// Local id for a media type: `application/ld+json` becomes `application_ld_json`.
pub fn notation_slug(notation: &str) -> String {
    notation.replace(['/', '+'], "_")
}

pub fn parse(request: &ParseRequest<'_>, tracker: &mut dyn FileTracker) -> Result<ConceptScheme> {
    let path = request.track_fixture(tracker)?;
    let mut scheme = request.new_scheme();

    for (index, row) in read_csv_rows(&path)?.iter().enumerate() {
        let (Some(label), Some(notation)) = (
            row.first_of_ignore_case(LABEL_COLUMNS),
            row.first_of_ignore_case(NOTATION_COLUMNS),
        ) else {
            debug!(standard_id = request.standard_id, row = index + 1, "skipping incomplete row");
            continue;
        };
        scheme.insert(
            request
                .concept(&notation_slug(notation), label)
                .with_note(NOTATION, notation),
        );
    }
    Ok(scheme)
}
