mod common;

use proptest::prelude::*;
use tempfile::TempDir;
use ufsa_ingest::{IngestError, parse_standard, slugify};
use ufsa_standards::Tracker;

use common::{standard, write_fixture};

#[test]
fn csv_codes_use_tolerant_columns_and_skip_missing_codes() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        dir.path(),
        "iso/countries.csv",
        "\u{feff}Alpha2,Country_Name\nUS,United States\n,Nowhere\nFR,\n",
    );
    let std = standard("iso_3166_1_a2", "iso/countries.csv", "ufsa_v2.parsers.csv_parser", "csv");
    let mut tracker = Tracker::in_memory();

    let scheme = parse_standard(&std, dir.path(), &mut tracker).expect("parse csv");

    assert_eq!(scheme.id, "iso_3166_1_a2");
    assert_eq!(scheme.len(), 2);
    let us = scheme.get("iso_3166_1_a2:US").expect("US concept");
    assert_eq!(us.label, "United States");
    assert_eq!(us.note("code"), Some("US"));
    assert_eq!(us.in_scheme.as_deref(), Some("http://ufsa.org/v2/standards/iso_3166_1_a2"));
    assert_eq!(scheme.get("iso_3166_1_a2:FR").map(|c| c.label.as_str()), Some("FR"));
    assert!(tracker.is_tracked(&dir.path().join("iso/countries.csv")));
}

#[test]
fn csv_codes_survive_a_row_with_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("codes.csv"),
        b"code,name\nUS,United States\nZZ,Bro\xffken\nFR,France\n",
    )
    .unwrap();
    let std = standard("codes", "codes.csv", "csv", "csv");

    let scheme = parse_standard(&std, dir.path(), &mut Tracker::in_memory()).expect("parse csv");

    assert_eq!(scheme.len(), 2);
    assert!(scheme.contains("codes:US"));
    assert!(scheme.contains("codes:FR"));
    assert!(!scheme.contains("codes:ZZ"));
}

#[test]
fn fields_csv_slugs_names_and_links_openfigi_identifiers() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        dir.path(),
        "openfigi/fields.csv",
        "Name,Description\ncompositeFIGI,Composite identifier\nshareClassFIGI,Share class identifier\n,orphan description\nComposite FIGI,\n",
    );
    let std = standard("openfigi_v3", "openfigi/fields.csv", "ufsa_v2.parsers.fields_csv_parser", "csv");
    let mut tracker = Tracker::in_memory();

    let scheme = parse_standard(&std, dir.path(), &mut tracker).expect("parse fields");

    assert_eq!(scheme.len(), 3);
    let composite = scheme.get("openfigi_v3:compositefigi").unwrap();
    assert_eq!(composite.narrower, vec!["openfigi_v3:shareclassfigi"]);
    assert_eq!(composite.note("description"), Some("Composite identifier"));
    let share = scheme.get("openfigi_v3:shareclassfigi").unwrap();
    assert_eq!(share.broader, vec!["openfigi_v3:compositefigi"]);
    let spaced = scheme.get("openfigi_v3:composite_figi").unwrap();
    assert!(spaced.notes.is_empty());
}

#[test]
fn fields_csv_enrichment_is_specific_to_openfigi() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "f.csv", "name\ncompositeFIGI\nshareClassFIGI\n");
    let std = standard("other_fields", "f.csv", "fields_csv", "csv");
    let scheme = parse_standard(&std, dir.path(), &mut Tracker::in_memory()).unwrap();
    assert!(scheme.concepts.values().all(|c| c.narrower.is_empty() && c.broader.is_empty()));
}

#[test]
fn iana_rows_need_label_and_notation() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        dir.path(),
        "iana/application.csv",
        "Name,Template,Reference\nld+json,application/ld+json,[W3C]\nbroken,,\n,application/orphan,\n",
    );
    let std = standard("iana_media_types", "iana/application.csv", "ufsa_v2.parsers.iana_csv_parser", "csv");

    let scheme = parse_standard(&std, dir.path(), &mut Tracker::in_memory()).unwrap();

    assert_eq!(scheme.len(), 1);
    let concept = scheme.get("iana_media_types:application_ld_json").unwrap();
    assert_eq!(concept.label, "ld+json");
    assert_eq!(concept.note("notation"), Some("application/ld+json"));
}

#[test]
fn non_fixture_locator_is_rejected_before_tracking() {
    let dir = TempDir::new().unwrap();
    let mut std = standard("iso", "unused.csv", "csv_parser", "csv");
    std.specification_url = "https://www.iso.org/codes.csv".to_string();
    let mut tracker = Tracker::in_memory();

    let err = parse_standard(&std, dir.path(), &mut tracker).unwrap_err();

    assert!(matches!(err, IngestError::FixtureLocatorRequired { ref url } if url.starts_with("https://")));
    assert!(tracker.files.is_empty());
}

#[test]
fn missing_fixture_fails_through_the_tracker() {
    let dir = TempDir::new().unwrap();
    let std = standard("iso", "absent.csv", "csv_parser", "csv");
    let err = parse_standard(&std, dir.path(), &mut Tracker::in_memory()).unwrap_err();
    assert!(matches!(err, IngestError::Track(_)));
}

#[test]
fn unknown_parser_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    let std = standard("odd", "odd.xlsx", "ufsa_v2.parsers.excel_parser", "xlsx");
    let err = parse_standard(&std, dir.path(), &mut Tracker::in_memory()).unwrap_err();
    assert!(matches!(err, IngestError::UnknownParser(_)));
}

proptest! {
    #[test]
    fn slugs_are_lowercase_identifiers(name in "\\PC{0,40}") {
        let slug = slugify(&name);
        prop_assert!(!slug.is_empty());
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        prop_assert!(!slug.starts_with('_') && !slug.ends_with('_'));
    }

    #[test]
    fn slugify_is_idempotent(name in "[A-Za-z0-9 _./-]{1,30}") {
        let once = slugify(&name);
        prop_assert_eq!(slugify(&once), once);
    }
}
