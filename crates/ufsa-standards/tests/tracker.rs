use std::fs;

use tempfile::TempDir;
use ufsa_standards::hash::sha256_hex;
use ufsa_standards::{FileTracker, Tracker, compute_mismatches};

#[test]
fn tracked_files_record_sha256() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("source.csv");
    fs::write(&file, "code,name\nUS,United States\n").unwrap();

    let mut tracker = Tracker::in_memory();
    tracker.track_file(&file).expect("track file");

    let key = file.to_string_lossy().into_owned();
    assert_eq!(
        tracker.files[&key].sha256,
        sha256_hex(b"code,name\nUS,United States\n")
    );
    assert!(tracker.is_tracked(&file));
}

#[test]
fn tracking_a_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let mut tracker = Tracker::in_memory();
    assert!(tracker.track_file(&dir.path().join("absent.csv")).is_err());
}

#[test]
fn ledger_round_trips_and_detects_drift() {
    let dir = TempDir::new().unwrap();
    let changed = dir.path().join("changed.csv");
    let removed = dir.path().join("removed.csv");
    let stable = dir.path().join("stable.csv");
    fs::write(&changed, "a").unwrap();
    fs::write(&removed, "b").unwrap();
    fs::write(&stable, "c").unwrap();

    let ledger_path = dir.path().join("tracker.json");
    let mut tracker = Tracker::open(&ledger_path);
    for path in [&changed, &removed, &stable] {
        tracker.track_file(path).unwrap();
    }
    tracker.set_meta("mappingCandidates", serde_json::json!(3));
    tracker.save().expect("save ledger");

    fs::write(&changed, "a2").unwrap();
    fs::remove_file(&removed).unwrap();

    let reopened = Tracker::open(&ledger_path);
    assert_eq!(reopened.files.len(), 3);
    assert_eq!(reopened.meta["mappingCandidates"], serde_json::json!(3));
    assert!(reopened.meta.contains_key("generatedAt"));

    let mismatches = compute_mismatches(&reopened);
    assert_eq!(mismatches.len(), 2);
    let missing = mismatches
        .iter()
        .find(|m| m.path.ends_with("removed.csv"))
        .expect("removed file reported");
    assert!(!missing.exists);
    assert!(missing.actual_sha256.is_empty());
    let drifted = mismatches
        .iter()
        .find(|m| m.path.ends_with("changed.csv"))
        .expect("changed file reported");
    assert!(drifted.exists);
    assert_eq!(drifted.actual_sha256, sha256_hex(b"a2"));
}

#[test]
fn corrupt_ledger_starts_fresh() {
    let dir = TempDir::new().unwrap();
    let ledger_path = dir.path().join("tracker.json");
    fs::write(&ledger_path, "not json").unwrap();

    let tracker = Tracker::open(&ledger_path);
    assert!(tracker.files.is_empty());
    assert_eq!(tracker.path(), Some(ledger_path.as_path()));
}

#[test]
fn in_memory_tracker_cannot_save() {
    let mut tracker = Tracker::in_memory();
    assert!(tracker.save().is_err());
}
