//! Turns analyses into printable table rows.

use crate::data::Cell;
use crate::inspect::ColumnKind;
use crate::parse::FileStats;
use crate::project::DatasetSummary;

pub fn kind_label(kind: ColumnKind) -> &'static str {
    match kind {
        ColumnKind::Numeric => "numeric",
        ColumnKind::Date => "date",
        ColumnKind::Categorical => "categorical",
        ColumnKind::Unknown => "unknown",
    }
}

pub fn analysis_headers() -> Vec<String> {
    ["column", "type", "unique", "missing", "min", "max", "mean", "sample"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn analysis_rows(stats: &FileStats) -> Vec<Vec<String>> {
    stats
        .columns
        .iter()
        .map(|column| {
            vec![
                column.name.clone(),
                kind_label(column.kind).to_string(),
                column.unique_values.to_string(),
                column.missing_values.to_string(),
                format_metric(column.min),
                format_metric(column.max),
                format_metric(column.mean),
                format_sample(&column.sample),
            ]
        })
        .collect()
}

pub fn comparison_headers() -> Vec<String> {
    ["column", "type", "unique", "missing", "min", "max", "mean"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// One row per column, with cells reading `original -> projected` wherever
/// the projection changed the value.
pub fn comparison_rows(original: &FileStats, projected: &FileStats) -> Vec<Vec<String>> {
    original
        .columns
        .iter()
        .zip(projected.columns.iter())
        .map(|(before, after)| {
            vec![
                before.name.clone(),
                kind_label(before.kind).to_string(),
                transition(
                    before.unique_values.to_string(),
                    after.unique_values.to_string(),
                ),
                transition(
                    before.missing_values.to_string(),
                    after.missing_values.to_string(),
                ),
                transition(format_metric(before.min), format_metric(after.min)),
                transition(format_metric(before.max), format_metric(after.max)),
                transition(format_metric(before.mean), format_metric(after.mean)),
            ]
        })
        .collect()
}

pub fn summary_headers() -> Vec<String> {
    ["metric", "original", "projected", "change"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn summary_rows(
    original: &DatasetSummary,
    expected_rows: usize,
    projected: &DatasetSummary,
) -> Vec<Vec<String>> {
    let counter = |label: &str, before: usize, after: usize| {
        vec![
            label.to_string(),
            before.to_string(),
            after.to_string(),
            (before as i64 - after as i64).to_string(),
        ]
    };
    vec![
        counter("rows", original.rows, expected_rows),
        counter("columns", original.columns, projected.columns),
        counter(
            "missing values",
            original.missing_values,
            projected.missing_values,
        ),
    ]
}

fn transition(before: String, after: String) -> String {
    if before == after {
        before
    } else {
        format!("{before} -> {after}")
    }
}

fn format_metric(metric: Option<f64>) -> String {
    match metric {
        Some(value) if value.fract() == 0.0 => format!("{value:.0}"),
        Some(value) => format!("{value:.4}"),
        None => String::new(),
    }
}

fn format_sample(sample: &[Cell]) -> String {
    sample
        .iter()
        .map(Cell::as_display)
        .collect::<Vec<_>>()
        .join(", ")
}
