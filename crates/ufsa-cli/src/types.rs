use std::path::PathBuf;

use ufsa_core::RunReport;
use ufsa_standards::Mismatch;

#[derive(Debug)]
pub struct RunSummary {
    pub registry: PathBuf,
    pub output_dir: PathBuf,
    pub tracker_path: PathBuf,
    pub report: RunReport,
}

#[derive(Debug)]
pub struct VerifySummary {
    pub tracker_path: PathBuf,
    pub tracked: usize,
    pub mismatches: Vec<Mismatch>,
}

impl VerifySummary {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}
