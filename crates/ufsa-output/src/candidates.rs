use std::path::{Path, PathBuf};

use anyhow::Result;
use ufsa_model::MappingCandidate;

use crate::common::{format_score, write_all_or_nothing, write_csv, write_json};

pub const CANDIDATES_JSON_FILE: &str = "mappings.candidates.json";
pub const CANDIDATES_CSV_FILE: &str = "mappings.candidates.csv";

pub const CANDIDATES_HEADER: [&str; 3] = ["source", "target", "score"];

/// Write candidate mappings as JSON and CSV, in the order given.
pub fn write_candidate_mappings(
    candidates: &[MappingCandidate],
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    write_all_or_nothing(|outputs| {
        let json_path = out_dir.join(CANDIDATES_JSON_FILE);
        write_json(&json_path, candidates)?;
        outputs.push(json_path);

        let csv_path = out_dir.join(CANDIDATES_CSV_FILE);
        let rows = candidates.iter().map(|candidate| {
            [
                candidate.source.clone(),
                candidate.target.clone(),
                format_score(candidate.score),
            ]
        });
        write_csv(&csv_path, &CANDIDATES_HEADER, rows)?;
        outputs.push(csv_path);
        Ok(())
    })
}
