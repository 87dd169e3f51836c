//! Standards ingestion pipeline with explicit stages.
//!
//! The pipeline runs these stages in order:
//! 1. **Registry**: Load (and optionally validate) the standards registry
//! 2. **Parse**: Dispatch every entry to its format parser
//! 3. **Unify**: Index the parsed schemes by id
//! 4. **Emit**: Per-scheme artifacts and the scheme index (required), then
//!    global indexes, global tables and identifier registries (optional)
//! 5. **Candidates**: Label-equality mapping candidates (optional)
//!
//! Failures in the first four required steps abort the run. Optional stage
//! failures are recorded in the [`RunReport`] and logged.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde_json::{Map, Value, json};
use tracing::{debug, info, info_span, warn};
use ufsa_ingest::parse_standard;
use ufsa_model::{ConceptScheme, PipelineResult, Registry};
use ufsa_output::{
    path_string, remove_outputs, write_candidate_mappings, write_global_indexes, write_global_tables,
    write_identifier_registries, write_scheme_index, write_scheme_outputs,
};
use ufsa_standards::registry::REGISTRY_SCHEMA_FILE;
use ufsa_standards::{FileTracker, SchemaValidation, load_registry_with_schema};

use crate::candidates::generate_mapping_candidates;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::report::{RunReport, Stage, StageOutcome, StageReport};
use crate::unify::unify;

/// Run the full pipeline.
///
/// Every source file, produced artifact and existing project file is
/// registered with `tracker`. Scheme statistics and the candidate count are
/// attached as tracker metadata.
pub fn run_pipeline(config: &PipelineConfig, tracker: &mut dyn FileTracker) -> Result<RunReport> {
    let span = info_span!("pipeline", registry = %config.registry_path.display());
    let _guard = span.enter();
    let run_start = Instant::now();

    let registry = load(config, tracker)?;
    let schemes = parse_all(&registry, &config.fixtures_dir, tracker)?;
    let unified = info_span!("unify").in_scope(|| unify(schemes));

    let scheme_counts: BTreeMap<String, usize> = unified
        .iter()
        .map(|(id, scheme)| (id.clone(), scheme.len()))
        .collect();
    tracker.record_meta("schemes", schemes_meta(&unified));

    for project_file in &config.project_files {
        if project_file.is_file() {
            track(tracker, project_file)?;
        }
    }

    let mut emitter = Emitter::new(&config.output_dir, tracker)?;
    info_span!("emit").in_scope(|| -> Result<()> {
        emitter.required(Stage::SchemeArtifacts, |out_dir| {
            let mut outputs = Vec::new();
            for scheme in unified.values() {
                outputs.extend(write_scheme_outputs(scheme, out_dir)?);
            }
            Ok(outputs)
        })?;
        emitter.required(Stage::SchemeIndex, |out_dir| {
            Ok(vec![write_scheme_index(&unified, out_dir)?])
        })?;
        emitter.optional(Stage::GlobalIndexes, |out_dir| {
            write_global_indexes(&unified, out_dir)
        });
        emitter.optional(Stage::GlobalTables, |out_dir| {
            write_global_tables(&unified, out_dir)
        });
        let registry_dir = config.registry_dir();
        emitter.optional(Stage::IdentifierRegistries, |out_dir| {
            write_identifier_registries(&registry_dir, out_dir)
        });
        Ok(())
    })?;

    let candidate_count = info_span!("candidates").in_scope(|| {
        let candidates = generate_mapping_candidates(&unified);
        let emitted = emitter.optional(Stage::MappingCandidates, |out_dir| {
            write_candidate_mappings(&candidates, out_dir)
        });
        emitted.then_some(candidates.len())
    });

    let Emitter {
        result,
        stages,
        tracker,
        ..
    } = emitter;
    if let Some(count) = candidate_count {
        tracker.record_meta("mappingCandidates", json!(count));
    }

    info!(
        schemes = scheme_counts.len(),
        concepts = scheme_counts.values().sum::<usize>(),
        outputs = result.outputs.len(),
        duration_ms = run_start.elapsed().as_millis(),
        "pipeline complete"
    );
    Ok(RunReport {
        result,
        stages,
        scheme_counts,
        candidate_count,
    })
}

// ============================================================================
// Stage 1: Registry
// ============================================================================

fn load(config: &PipelineConfig, tracker: &mut dyn FileTracker) -> Result<Registry> {
    let schema_path = config.registry_dir().join(REGISTRY_SCHEMA_FILE);
    let (registry, validation) = load_registry_with_schema(&config.registry_path, Some(&schema_path))
        .map_err(|source| PipelineError::Registry {
            path: config.registry_path.clone(),
            source,
        })?;
    if let SchemaValidation::Skipped(reason) = &validation {
        debug!(reason = %reason, "registry schema validation skipped");
    }
    track(tracker, &config.registry_path)?;
    info!(standards = registry.len(), "registry loaded");
    Ok(registry)
}

// ============================================================================
// Stage 2: Parse
// ============================================================================

/// Parse every registry entry in order. The first failure aborts.
fn parse_all(
    registry: &Registry,
    fixtures_dir: &Path,
    tracker: &mut dyn FileTracker,
) -> Result<Vec<ConceptScheme>> {
    let mut schemes = Vec::with_capacity(registry.len());
    for standard in &registry.standards {
        let span = info_span!("parse", standard_id = %standard.standard_id);
        let _guard = span.enter();
        let start = Instant::now();
        let scheme = parse_standard(standard, fixtures_dir, tracker).map_err(|source| {
            PipelineError::Parse {
                standard_id: standard.standard_id.clone(),
                source,
            }
        })?;
        debug!(
            standard_id = %standard.standard_id,
            concept_count = scheme.len(),
            duration_ms = start.elapsed().as_millis(),
            "standard parsed"
        );
        schemes.push(scheme);
    }
    Ok(schemes)
}

fn schemes_meta(unified: &BTreeMap<String, ConceptScheme>) -> Value {
    let mut meta = Map::new();
    for (id, scheme) in unified {
        meta.insert(
            id.clone(),
            json!({ "label": scheme.label, "conceptCount": scheme.len() }),
        );
    }
    Value::Object(meta)
}

fn track(tracker: &mut dyn FileTracker, path: &Path) -> Result<()> {
    tracker
        .track_file(path)
        .map_err(|source| PipelineError::Track {
            path: path.to_path_buf(),
            source,
        })
}

// ============================================================================
// Stages 4-5: Emit
// ============================================================================

/// Runs emission stages, tracks their artifacts and records outcomes.
struct Emitter<'a> {
    out_dir: &'a Path,
    tracker: &'a mut dyn FileTracker,
    result: PipelineResult,
    stages: Vec<StageReport>,
}

impl<'a> Emitter<'a> {
    fn new(out_dir: &'a Path, tracker: &'a mut dyn FileTracker) -> Result<Self> {
        std::fs::create_dir_all(out_dir).map_err(|source| PipelineError::OutputDir {
            path: out_dir.to_path_buf(),
            source,
        })?;
        Ok(Self {
            out_dir,
            tracker,
            result: PipelineResult::default(),
            stages: Vec::new(),
        })
    }

    /// Run a stage whose failure aborts the run.
    fn required<F>(&mut self, stage: Stage, write: F) -> Result<()>
    where
        F: FnOnce(&Path) -> anyhow::Result<Vec<PathBuf>>,
    {
        let start = Instant::now();
        let outputs = write(self.out_dir).map_err(|error| PipelineError::Emit {
            stage,
            message: format!("{error:#}"),
        })?;
        for path in &outputs {
            track(self.tracker, path)?;
        }
        self.complete(stage, outputs, start);
        Ok(())
    }

    /// Run a stage whose failure is recorded and logged. Returns whether the
    /// stage completed. A skipped stage leaves no artifacts on disk or in the
    /// tracker.
    fn optional<F>(&mut self, stage: Stage, write: F) -> bool
    where
        F: FnOnce(&Path) -> anyhow::Result<Vec<PathBuf>>,
    {
        let start = Instant::now();
        let tracked = write(self.out_dir)
            .and_then(|outputs| self.track_or_discard(&outputs).map(|()| outputs));
        match tracked {
            Ok(outputs) => {
                self.complete(stage, outputs, start);
                true
            }
            Err(error) => {
                let reason = format!("{error:#}");
                warn!(stage = %stage, reason = %reason, "optional stage skipped");
                self.stages.push(StageReport {
                    stage,
                    outcome: StageOutcome::Skipped { reason },
                });
                false
            }
        }
    }

    /// Track every output. On the first failure, forget the ones already
    /// tracked and delete all of them.
    fn track_or_discard(&mut self, outputs: &[PathBuf]) -> anyhow::Result<()> {
        for (index, path) in outputs.iter().enumerate() {
            if let Err(error) = self.tracker.track_file(path) {
                for tracked in &outputs[..index] {
                    self.tracker.untrack(tracked);
                }
                remove_outputs(outputs);
                return Err(error.into());
            }
        }
        Ok(())
    }

    fn complete(&mut self, stage: Stage, outputs: Vec<PathBuf>, start: Instant) {
        debug!(
            stage = %stage,
            outputs = outputs.len(),
            duration_ms = start.elapsed().as_millis(),
            "stage complete"
        );
        self.stages.push(StageReport {
            stage,
            outcome: StageOutcome::Completed {
                outputs: outputs.len(),
            },
        });
        self.result.extend(outputs.iter().map(|path| path_string(path)));
    }
}
