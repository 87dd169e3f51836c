use anyhow::{Context, Result, bail};
use tracing::{info, info_span};
use ufsa_core::{PipelineConfig, run_pipeline};
use ufsa_model::Registry;
use ufsa_standards::{Tracker, compute_mismatches, load_registry};

use crate::cli::{RunArgs, StandardsArgs, VerifyArgs};
use crate::types::{RunSummary, VerifySummary};

pub fn run_ingest(args: &RunArgs) -> Result<RunSummary> {
    let mut config = PipelineConfig::new(args.registry.clone(), args.output_dir.clone());
    if let Some(fixtures_dir) = &args.fixtures_dir {
        config = config.with_fixtures_dir(fixtures_dir.clone());
    }
    if let Some(tracker_path) = &args.tracker {
        config = config.with_tracker_path(tracker_path.clone());
    }
    let tracker_path = config.tracker_path();
    let mut tracker = Tracker::open(&tracker_path);

    let report = run_pipeline(&config, &mut tracker)
        .with_context(|| format!("run pipeline for {}", args.registry.display()))?;
    tracker
        .save()
        .with_context(|| format!("save tracker {}", tracker_path.display()))?;

    Ok(RunSummary {
        registry: config.registry_path,
        output_dir: config.output_dir,
        tracker_path,
        report,
    })
}

pub fn run_verify(args: &VerifyArgs) -> Result<VerifySummary> {
    let span = info_span!("verify", tracker = %args.tracker.display());
    let _guard = span.enter();
    if !args.tracker.is_file() {
        bail!("tracker not found: {}", args.tracker.display());
    }
    let tracker = Tracker::open(&args.tracker);
    let mismatches = compute_mismatches(&tracker);
    info!(
        tracked = tracker.files.len(),
        mismatches = mismatches.len(),
        "verify complete"
    );
    Ok(VerifySummary {
        tracker_path: args.tracker.clone(),
        tracked: tracker.files.len(),
        mismatches,
    })
}

pub fn run_standards(args: &StandardsArgs) -> Result<Registry> {
    let (registry, _) = load_registry(&args.registry)
        .with_context(|| format!("load registry {}", args.registry.display()))?;
    Ok(registry)
}
