//! Integration tests for the CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;
use ufsa_cli::cli::{Cli, Command, RunArgs, StandardsArgs, VerifyArgs};
use ufsa_cli::commands::{run_ingest, run_standards, run_verify};
use ufsa_cli::summary::{run_json, verify_json};
use ufsa_model::ParserKind;

const REGISTRY: &str = r#"
standards:
  - standard_id: iana_media_types
    name: IANA Media Types
    governing_body: IANA
    specification_url: fixtures://iana/media-types.csv
    data_format: csv
    parser_module: ufsa_v2.parsers.iana_csv_parser
    concept_scheme_uri: http://ufsa.org/v2/standards/iana_media_types
"#;

fn setup() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_path_buf();
    fs::create_dir_all(root.join("fixtures/iana")).unwrap();
    fs::write(
        root.join("fixtures/iana/media-types.csv"),
        "Name,Template\njson,application/json\nxml,application/xml\n",
    )
    .unwrap();
    fs::write(root.join("registry.yaml"), REGISTRY).unwrap();
    (dir, root)
}

fn run_args(root: &Path) -> RunArgs {
    RunArgs {
        registry: root.join("registry.yaml"),
        fixtures_dir: Some(root.join("fixtures")),
        output_dir: root.join("build"),
        tracker: None,
        json: false,
    }
}

#[test]
fn run_saves_tracker_next_to_outputs() {
    let (_dir, root) = setup();

    let summary = run_ingest(&run_args(&root)).unwrap();

    assert_eq!(summary.tracker_path, root.join("build/tracker.json"));
    assert!(summary.tracker_path.is_file());
    assert_eq!(summary.report.scheme_counts["iana_media_types"], 2);

    let ledger: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary.tracker_path).unwrap()).unwrap();
    assert_eq!(
        ledger["meta"]["schemes"]["iana_media_types"]["conceptCount"],
        2
    );
    assert!(ledger["meta"]["generatedAt"].is_string());
    assert!(ledger["files"].as_object().unwrap().len() > 2);

    let json = run_json(&summary);
    assert_eq!(json["status"], "ok");
    assert_eq!(
        json["outputs"].as_array().unwrap().len(),
        summary.report.result.outputs.len()
    );
}

#[test]
fn verify_detects_drift_after_run() {
    let (_dir, root) = setup();
    let summary = run_ingest(&run_args(&root)).unwrap();
    let args = VerifyArgs {
        tracker: summary.tracker_path.clone(),
        json: true,
    };

    let clean = run_verify(&args).unwrap();
    assert!(clean.is_clean());
    assert_eq!(verify_json(&clean)["status"], "ok");

    fs::write(root.join("build/concepts.csv"), "tampered\n").unwrap();
    fs::remove_file(root.join("build/iana_media_types.concepts.json")).unwrap();

    let drifted = run_verify(&args).unwrap();
    assert_eq!(drifted.mismatches.len(), 2);
    let missing = drifted
        .mismatches
        .iter()
        .find(|m| m.path.ends_with("iana_media_types.concepts.json"))
        .unwrap();
    assert!(!missing.exists);
    assert!(missing.actual_sha256.is_empty());
    assert_eq!(verify_json(&drifted)["status"], "drift");
}

#[test]
fn verify_without_ledger_is_an_error() {
    let dir = TempDir::new().unwrap();
    let args = VerifyArgs {
        tracker: dir.path().join("missing.json"),
        json: false,
    };
    let error = run_verify(&args).unwrap_err();
    assert!(error.to_string().contains("tracker not found"));
}

#[test]
fn run_failure_names_the_registry() {
    let dir = TempDir::new().unwrap();
    let mut args = run_args(dir.path());
    args.registry = dir.path().join("absent.yaml");

    let error = run_ingest(&args).unwrap_err();

    assert!(format!("{error:#}").contains("absent.yaml"));
}

#[test]
fn standards_lists_resolved_parsers() {
    let (_dir, root) = setup();
    let registry = run_standards(&StandardsArgs {
        registry: root.join("registry.yaml"),
    })
    .unwrap();

    assert_eq!(registry.len(), 1);
    assert_eq!(
        registry.standards[0].parser_kind().unwrap(),
        ParserKind::IanaCsv
    );
}

#[test]
fn cli_parses_run_with_defaults() {
    let cli = Cli::try_parse_from(["ufsa", "-v", "run", "--registry", "reg.yaml"]).unwrap();
    let Command::Run(args) = cli.command else {
        panic!("expected run");
    };
    assert_eq!(args.registry, PathBuf::from("reg.yaml"));
    assert_eq!(args.output_dir, PathBuf::from("build"));
    assert!(args.tracker.is_none());
    assert!(cli.verbosity.is_present());
}

#[test]
fn cli_accepts_out_alias_and_global_log_flags() {
    let cli = Cli::try_parse_from([
        "ufsa",
        "run",
        "--registry",
        "reg.yaml",
        "--out",
        "dist",
        "--log-format",
        "json",
        "--log-level",
        "debug",
    ])
    .unwrap();
    let Command::Run(args) = cli.command else {
        panic!("expected run");
    };
    assert_eq!(args.output_dir, PathBuf::from("dist"));
    assert!(cli.log_level.is_some());
}

#[test]
fn cli_requires_registry_for_run() {
    assert!(Cli::try_parse_from(["ufsa", "run"]).is_err());
}
