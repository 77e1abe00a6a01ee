pub mod cli;
pub mod data;
pub mod inspect;
pub mod io_utils;
pub mod parse;
pub mod project;
pub mod report;
pub mod table;

use std::{
    env,
    fs::File,
    io::BufWriter,
    path::Path,
    sync::OnceLock,
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::cli::{Cli, Commands, HeadArgs, InspectArgs, PreviewArgs};
use crate::parse::FileStats;
use crate::project::PreprocessingOptions;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("dataset_inspect", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Inspect(args) => handle_inspect(&args),
        Commands::Preview(args) => handle_preview(&args),
        Commands::Head(args) => handle_head(&args),
    }
}

fn handle_inspect(args: &InspectArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    log_input_size(&args.input);
    let stats = parse::parse_path(&args.input, args.delimiter, encoding)?;

    if let Some(path) = &args.output {
        write_analysis_json(&stats, path)?;
        info!(
            "Analysis for {} column(s) written to {:?}",
            stats.columns.len(),
            path
        );
    }
    if args.json {
        let rendered = serde_json::to_string_pretty(&stats).context("Serializing analysis")?;
        println!("{rendered}");
    } else {
        table::print_table(&report::analysis_headers(), &report::analysis_rows(&stats));
    }

    let summary = project::dataset_summary(&stats);
    info!(
        "Inspected {} row(s) across {} column(s); {} missing value(s), {} duplicate row(s)",
        summary.rows, summary.columns, summary.missing_values, summary.duplicates
    );
    Ok(())
}

fn handle_preview(args: &PreviewArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let mut options = match &args.options {
        Some(path) => PreprocessingOptions::load(path)
            .with_context(|| format!("Loading preprocessing options from {path:?}"))?,
        None => PreprocessingOptions::default(),
    };
    if let Some(strategy) = args.missing_values {
        options.missing_values_handling = strategy;
    }
    if args.drop_duplicates {
        options.handling_duplicates = true;
    }
    if let Some(method) = args.sampling_method {
        options.sampling_method = method;
    }
    if let Some(ratio) = args.sampling_ratio {
        if !(ratio > 0.0 && ratio <= 1.0) {
            bail!("Sampling ratio must be in (0, 1], got {ratio}");
        }
        options.sampling_ratio = ratio;
    }
    debug!("Effective preprocessing options: {options:?}");

    let stats = parse::parse_path(&args.input, args.delimiter, encoding)?;
    let projected = project::project_stats(&stats, &options, args.rows);

    if args.json {
        let rendered = serde_json::to_string_pretty(&projected).context("Serializing projection")?;
        println!("{rendered}");
        return Ok(());
    }

    let expected = project::expected_row_count(&stats, &options);
    let original_summary = project::dataset_summary(&stats);
    let projected_summary = project::dataset_summary(&projected);
    table::print_table(
        &report::summary_headers(),
        &report::summary_rows(&original_summary, expected, &projected_summary),
    );
    println!();
    table::print_table(
        &report::comparison_headers(),
        &report::comparison_rows(&stats, &projected),
    );
    info!(
        "Projected {} -> {} row(s); preview retains {} row(s)",
        stats.row_count(),
        expected,
        projected.row_count()
    );
    Ok(())
}

fn handle_head(args: &HeadArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let mut reader = io_utils::open_csv_reader_from_path(&args.input, delimiter)?;
    let headers = io_utils::reader_headers(&mut reader, encoding)?;
    let mut rows = Vec::new();
    for (idx, record) in reader.byte_records().enumerate() {
        if idx >= args.rows {
            break;
        }
        let record = record.with_context(|| format!("Reading row {}", idx + 2))?;
        rows.push(io_utils::decode_record(&record, encoding)?);
    }
    table::print_table(&headers, &rows);
    info!("Displayed {} row(s) from {:?}", rows.len(), args.input);
    Ok(())
}

fn write_analysis_json(stats: &FileStats, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Creating output file {path:?}"))?;
    serde_json::to_writer_pretty(BufWriter::new(file), stats).context("Writing analysis JSON")
}

fn log_input_size(path: &Path) {
    if io_utils::is_dash(path) {
        return;
    }
    if let Ok(metadata) = std::fs::metadata(path) {
        let megabytes = metadata.len() as f64 / (1024.0 * 1024.0);
        debug!("Input file {path:?} is {megabytes:.2} MB");
    }
}
