//! Per-stage outcome of a pipeline run.

use std::collections::BTreeMap;

use serde::Serialize;
use ufsa_model::PipelineResult;

/// Emission stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    SchemeArtifacts,
    SchemeIndex,
    GlobalIndexes,
    GlobalTables,
    IdentifierRegistries,
    MappingCandidates,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::SchemeArtifacts,
        Stage::SchemeIndex,
        Stage::GlobalIndexes,
        Stage::GlobalTables,
        Stage::IdentifierRegistries,
        Stage::MappingCandidates,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::SchemeArtifacts => "scheme_artifacts",
            Stage::SchemeIndex => "scheme_index",
            Stage::GlobalIndexes => "global_indexes",
            Stage::GlobalTables => "global_tables",
            Stage::IdentifierRegistries => "identifier_registries",
            Stage::MappingCandidates => "mapping_candidates",
        }
    }

    /// Optional stages never abort the run.
    pub fn is_optional(self) -> bool {
        !matches!(self, Stage::SchemeArtifacts | Stage::SchemeIndex)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageOutcome {
    /// The stage ran; `outputs` artifacts were written.
    Completed { outputs: usize },
    /// The stage failed and its outputs were omitted.
    Skipped { reason: String },
}

impl StageOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, StageOutcome::Skipped { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub outcome: StageOutcome,
}

/// Everything a caller needs to know about a finished run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Artifacts actually written, in emission order.
    pub result: PipelineResult,
    pub stages: Vec<StageReport>,
    /// Concept count per scheme id.
    pub scheme_counts: BTreeMap<String, usize>,
    /// `None` when candidate generation was skipped.
    pub candidate_count: Option<usize>,
}

impl RunReport {
    pub fn stage(&self, stage: Stage) -> Option<&StageOutcome> {
        self.stages
            .iter()
            .find(|report| report.stage == stage)
            .map(|report| &report.outcome)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &StageReport> {
        self.stages.iter().filter(|report| report.outcome.is_skipped())
    }

    pub fn total_concepts(&self) -> usize {
        self.scheme_counts.values().sum()
    }
}
