use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::{Value, json};
use ufsa_core::{StageOutcome, StageReport};
use ufsa_model::Registry;

use crate::types::{RunSummary, VerifySummary};

pub fn print_run_summary(summary: &RunSummary) {
    println!("Registry: {}", summary.registry.display());
    println!("Output: {}", summary.output_dir.display());
    println!("Tracker: {}", summary.tracker_path.display());

    let mut table = Table::new();
    table.set_header(vec![header_cell("Scheme"), header_cell("Concepts")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (scheme_id, count) in &summary.report.scheme_counts {
        table.add_row(vec![
            Cell::new(scheme_id).fg(Color::Blue),
            count_cell(*count),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.report.total_concepts()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    let mut stages = Table::new();
    stages.set_header(vec![
        header_cell("Stage"),
        header_cell("Status"),
        header_cell("Detail"),
    ]);
    apply_stage_table_style(&mut stages);
    for report in &summary.report.stages {
        stages.add_row(stage_row(report));
    }
    println!("{stages}");

    match summary.report.candidate_count {
        Some(count) => println!("Mapping candidates: {count}"),
        None => println!("Mapping candidates: skipped"),
    }
}

/// Machine-readable run summary.
pub fn run_json(summary: &RunSummary) -> Value {
    json!({
        "status": "ok",
        "outputs": summary.report.result.outputs,
        "tracker": summary.tracker_path.display().to_string(),
        "report": summary.report,
    })
}

pub fn print_verify_summary(summary: &VerifySummary) {
    println!("Tracker: {}", summary.tracker_path.display());
    println!("Tracked files: {}", summary.tracked);
    if summary.is_clean() {
        println!("No drift detected.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Path"),
        header_cell("Expected"),
        header_cell("Actual"),
    ]);
    apply_stage_table_style(&mut table);
    for mismatch in &summary.mismatches {
        let actual = if mismatch.exists {
            Cell::new(short_hash(&mismatch.actual_sha256)).fg(Color::Yellow)
        } else {
            Cell::new("missing").fg(Color::Red).add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            Cell::new(&mismatch.path),
            dim_cell(short_hash(&mismatch.expected_sha256)),
            actual,
        ]);
    }
    println!("{table}");
    eprintln!("{} tracked file(s) drifted", summary.mismatches.len());
}

pub fn verify_json(summary: &VerifySummary) -> Value {
    json!({
        "status": if summary.is_clean() { "ok" } else { "drift" },
        "tracked": summary.tracked,
        "mismatches": summary.mismatches,
    })
}

pub fn print_standards(registry: &Registry) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Standard"),
        header_cell("Name"),
        header_cell("Format"),
        header_cell("Parser"),
    ]);
    apply_table_style(&mut table);
    for standard in &registry.standards {
        let parser = match standard.parser_kind() {
            Ok(kind) => Cell::new(kind.as_str()),
            Err(_) => Cell::new("unresolved").fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(&standard.standard_id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&standard.name),
            Cell::new(&standard.data_format),
            parser,
        ]);
    }
    println!("{table}");
}

fn stage_row(report: &StageReport) -> Vec<Cell> {
    let stage = Cell::new(report.stage.as_str());
    match &report.outcome {
        StageOutcome::Completed { outputs } => vec![
            stage,
            Cell::new("ok").fg(Color::Green),
            Cell::new(format!("{outputs} file(s)")),
        ],
        StageOutcome::Skipped { reason } => vec![
            stage,
            Cell::new("skipped")
                .fg(Color::Yellow)
                .add_attribute(Attribute::Bold),
            dim_cell(reason),
        ],
    }
}

fn short_hash(sha256: &str) -> &str {
    sha256.get(..12).unwrap_or(sha256)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_stage_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
