//! Code/name pair vocabularies (country codes, currency codes, ...).

use tracing::debug;
use ufsa_model::ConceptScheme;
use ufsa_model::notes::CODE;
use ufsa_standards::FileTracker;

use crate::csv_rows::read_csv_rows;
use crate::error::Result;
use crate::request::ParseRequest;

const CODE_COLUMNS: &[&str] = &["code", "alpha2", "country", "type"];
const NAME_COLUMNS: &[&str] = &["name", "country_name", "subtype"];

pub fn parse(request: &ParseRequest<'_>, tracker: &mut dyn FileTracker) -> Result<ConceptScheme> {
    let path = request.track_fixture(tracker)?;
    let mut scheme = request.new_scheme();

    for (index, row) in read_csv_rows(&path)?.iter().enumerate() {
        let Some(code) = row.first_of_ignore_case(CODE_COLUMNS) else {
            debug!(standard_id = request.standard_id, row = index + 1, "skipping row without code");
            continue;
        };
        let label = row.first_of_ignore_case(NAME_COLUMNS).unwrap_or(code);
        scheme.insert(request.concept(code, label).with_note(CODE, code));
    }
    Ok(scheme)
}
