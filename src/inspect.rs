//! Column-level analysis: type inference and summary statistics.
//!
//! Both entry points are pure and total: any finite sequence of cells maps to
//! exactly one [`ColumnKind`] and one [`Column`], with no panics and no
//! hidden state. Columns with nothing to summarize degrade to absent
//! statistics rather than erroring.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::data::{Cell, coerce_number, looks_like_date};

/// Number of leading cells kept as a display sample.
pub const SAMPLE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Date,
    Categorical,
    Unknown,
}

/// Schema and statistics record for one column across all rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ColumnKind,
    pub unique_values: usize,
    pub missing_values: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    pub sample: Vec<Cell>,
}

/// Classifies a column from its observed cells.
///
/// Missing cells are ignored for classification. The checks run in a fixed
/// priority order: an empty column is `Unknown`, a column where every value
/// passes strict numeric coercion is `Numeric`, a column where every value is
/// date-like is `Date`, anything else is `Categorical`. The numeric check
/// runs before the date check, so a column of values that satisfy both is
/// `Numeric`.
pub fn infer_kind(cells: &[Cell]) -> ColumnKind {
    let observed: Vec<&Cell> = cells.iter().filter(|cell| !cell.is_missing()).collect();
    if observed.is_empty() {
        return ColumnKind::Unknown;
    }

    let all_numeric = observed.iter().all(|cell| match cell {
        Cell::Number(_) => true,
        Cell::Text(s) => coerce_number(s).is_some(),
        Cell::Missing => false,
    });
    if all_numeric {
        return ColumnKind::Numeric;
    }

    let all_dates = observed
        .iter()
        .all(|cell| looks_like_date(&cell.as_display()));
    if all_dates {
        return ColumnKind::Date;
    }

    ColumnKind::Categorical
}

/// Builds the full statistics record for one named column.
///
/// Distinctness is counted over the unfiltered input, with every missing
/// entry collapsing to a single shared value. The numeric summary covers
/// non-missing values only and is absent (`None`, never zero or NaN) when a
/// numeric column has no observations.
pub fn analyze_column(name: &str, cells: &[Cell]) -> Column {
    let kind = infer_kind(cells);
    let missing_values = cells.iter().filter(|cell| cell.is_missing()).count();
    let unique_values = cells
        .iter()
        .map(|cell| cell.distinct_key())
        .unique()
        .count();
    let sample = cells.iter().take(SAMPLE_SIZE).cloned().collect();

    let (min, max, mean) = if kind == ColumnKind::Numeric {
        numeric_summary(cells)
    } else {
        (None, None, None)
    };

    Column {
        name: name.to_string(),
        kind,
        unique_values,
        missing_values,
        min,
        max,
        mean,
        sample,
    }
}

fn numeric_summary(cells: &[Cell]) -> (Option<f64>, Option<f64>, Option<f64>) {
    let numbers: Vec<f64> = cells
        .iter()
        .filter_map(|cell| match cell {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => coerce_number(s),
            Cell::Missing => None,
        })
        .collect();
    if numbers.is_empty() {
        return (None, None, None);
    }
    let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
    let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = numbers.iter().sum::<f64>() / numbers.len() as f64;
    (Some(min), Some(max), Some(mean))
}
