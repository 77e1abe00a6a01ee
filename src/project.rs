//! Preprocessing options and the preview projector.
//!
//! The projector estimates how a set of preprocessing options would change a
//! dataset's statistics without transforming any data. The estimate is
//! deliberately approximate: any selected missing-value strategy is assumed
//! to eliminate all missingness, and the returned rows are a prefix slice of
//! the original data, never an actual deduplicated or resampled subset. That
//! is the product behavior callers rely on, not a shortcut to fix.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::data::Cell;
use crate::parse::FileStats;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum MissingValuesHandling {
    #[default]
    #[serde(rename = "")]
    #[value(skip)]
    Unset,
    Remove,
    Mean,
    Median,
    Mode,
    Constant,
    Interpolate,
    Knn,
}

impl MissingValuesHandling {
    pub fn is_set(&self) -> bool {
        !matches!(self, MissingValuesHandling::Unset)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum SamplingMethod {
    #[default]
    #[serde(rename = "")]
    #[value(skip)]
    Unset,
    None,
    Random,
    Systematic,
    Stratified,
    Cluster,
}

impl SamplingMethod {
    pub fn is_set(&self) -> bool {
        !matches!(self, SamplingMethod::Unset)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScalingMethod {
    #[default]
    #[serde(rename = "")]
    Unset,
    None,
    Minmax,
    Standard,
    Robust,
    Normalizer,
    Quantile,
    Power,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DimensionalityReduction {
    #[default]
    #[serde(rename = "")]
    Unset,
    None,
    Pca,
    Tsne,
    Umap,
    Lda,
    Truncatedsvd,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutlierDetection {
    #[default]
    #[serde(rename = "")]
    Unset,
    None,
    Zscore,
    Iqr,
    Isolation,
    Lof,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMethod {
    #[default]
    #[serde(rename = "")]
    Unset,
    None,
    Kfold,
    Stratified,
    Timeseries,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DataSplitRatio {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "70-30")]
    SeventyThirty,
    #[serde(rename = "80-20")]
    EightyTwenty,
    #[serde(rename = "90-10")]
    NinetyTen,
    #[serde(rename = "custom")]
    Custom,
}

/// Full preprocessing request as assembled by callers. The projector reads
/// only `missing_values_handling`, `handling_duplicates`, `sampling_method`,
/// and `sampling_ratio`; the remaining fields are carried opaquely for the
/// training backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreprocessingOptions {
    pub missing_values_handling: MissingValuesHandling,
    pub constant_value: String,
    pub handling_duplicates: bool,
    pub scaling_method: ScalingMethod,
    pub dimensionality_reduction: DimensionalityReduction,
    pub n_components: u32,
    pub outlier_detection: OutlierDetection,
    pub outlier_threshold: f64,
    pub sampling_method: SamplingMethod,
    pub sampling_ratio: f64,
    pub data_split: DataSplitRatio,
    pub custom_split_ratio: f64,
    pub validation_method: ValidationMethod,
    pub feature_engineering: Vec<String>,
    pub time_series_handling: String,
    pub text_preprocessing: Vec<String>,
}

impl Default for PreprocessingOptions {
    fn default() -> Self {
        Self {
            missing_values_handling: MissingValuesHandling::default(),
            constant_value: String::new(),
            handling_duplicates: false,
            scaling_method: ScalingMethod::default(),
            dimensionality_reduction: DimensionalityReduction::default(),
            n_components: 2,
            outlier_detection: OutlierDetection::default(),
            outlier_threshold: 3.0,
            sampling_method: SamplingMethod::default(),
            sampling_ratio: 1.0,
            data_split: DataSplitRatio::default(),
            custom_split_ratio: 80.0,
            validation_method: ValidationMethod::default(),
            feature_engineering: Vec::new(),
            time_series_handling: String::new(),
            text_preprocessing: Vec::new(),
        }
    }
}

impl PreprocessingOptions {
    /// Loads options from a YAML or JSON file, decided by extension. Missing
    /// fields fall back to their defaults so partial files are accepted.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening options file {path:?}"))?;
        let reader = BufReader::new(file);
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => {
                serde_json::from_reader(reader).context("Parsing options JSON")
            }
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                serde_yaml::from_reader(reader).context("Parsing options YAML")
            }
            other => bail!(
                "Unsupported options file extension {:?} (expected .yml, .yaml, or .json)",
                other.unwrap_or("")
            ),
        }
    }
}

/// Summary counters over a parsed dataset, as shown on the original/projected
/// comparison panes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: usize,
    pub missing_values: usize,
    pub duplicates: usize,
}

pub fn dataset_summary(stats: &FileStats) -> DatasetSummary {
    let rows = stats.data.len();
    DatasetSummary {
        rows,
        columns: stats.columns.len(),
        missing_values: stats.columns.iter().map(|c| c.missing_values).sum(),
        duplicates: rows - distinct_row_count(&stats.data),
    }
}

/// Derives the expected post-preprocessing statistics from `current` without
/// mutating it. Pure and deterministic; returns a fresh value each call.
///
/// Row-count projection: deduplication replaces the starting length with the
/// count of structurally distinct rows, then sampling multiplies and floors.
/// The returned `data` is the first `min(preview_limit, expected_len)` rows
/// of the original data.
pub fn project_stats(
    current: &FileStats,
    options: &PreprocessingOptions,
    preview_limit: usize,
) -> FileStats {
    let columns = current
        .columns
        .iter()
        .map(|column| {
            let mut projected = column.clone();
            if options.missing_values_handling.is_set() {
                projected.missing_values = 0;
            }
            projected
        })
        .collect();

    let expected_len = expected_row_count(current, options);
    let data = current
        .data
        .iter()
        .take(preview_limit.min(expected_len))
        .cloned()
        .collect();

    FileStats { columns, data }
}

/// Row-count projection on its own: the deduplicated count replaces the
/// starting length outright, then sampling scales it down.
pub fn expected_row_count(current: &FileStats, options: &PreprocessingOptions) -> usize {
    let mut expected = current.data.len();
    if options.handling_duplicates {
        expected = distinct_row_count(&current.data);
    }
    if options.sampling_method.is_set() && options.sampling_ratio < 1.0 {
        expected = (expected as f64 * options.sampling_ratio).floor() as usize;
    }
    expected
}

/// Two rows are duplicates when their full cell sequences serialize
/// identically.
fn distinct_row_count(rows: &[Vec<Cell>]) -> usize {
    rows.iter()
        .map(|row| row.iter().map(Cell::distinct_key).join("\u{1f}"))
        .unique()
        .count()
}
