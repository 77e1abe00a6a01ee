//! The tabular parse pipeline: raw bytes in, [`FileStats`] out.
//!
//! The first row is the header. Blank rows are skipped, short rows are padded
//! with missing cells, and every field is typed into a [`Cell`] before the
//! inference engine runs its own classification. Each call is independent and
//! touches no shared state, so concurrent parses of different inputs never
//! interfere.

use std::{
    collections::HashSet,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use anyhow::Context;
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::Cell;
use crate::inspect::{self, Column};
use crate::io_utils;

/// Failure classes of the parse pipeline.
///
/// Structural failures carry the first diagnostic reported by the tokenizer
/// or decoder. An empty result is a distinct class so callers can report
/// "file has no data" instead of a generic parse failure.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Error parsing file: {0}")]
    Structural(String),
    #[error("Duplicate column name '{0}' in header row")]
    DuplicateColumn(String),
    #[error("Invalid or empty file: no data rows to analyze")]
    Empty,
}

/// Aggregate result of parsing one file: per-column analyses plus the full
/// row set. Row cells align positionally with `columns`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileStats {
    pub columns: Vec<Column>,
    pub data: Vec<Vec<Cell>>,
}

impl FileStats {
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// Parses a file or stdin (`-`), resolving the delimiter from the extension
/// when not provided.
pub fn parse_path(
    path: &Path,
    delimiter: Option<u8>,
    encoding: &'static Encoding,
) -> anyhow::Result<FileStats> {
    let delimiter = io_utils::resolve_input_delimiter(path, delimiter);
    let stats = if io_utils::is_dash(path) {
        parse_reader(std::io::stdin().lock(), delimiter, encoding)?
    } else {
        let file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
        parse_reader(BufReader::new(file), delimiter, encoding)?
    };
    Ok(stats)
}

/// Core pipeline over any byte source. Single-shot: a fresh call re-reads the
/// input from scratch.
pub fn parse_reader<R>(
    input: R,
    delimiter: u8,
    encoding: &'static Encoding,
) -> Result<FileStats, ParseError>
where
    R: Read,
{
    let mut reader = io_utils::open_csv_reader(input, delimiter);
    let headers = io_utils::reader_headers(&mut reader, encoding)
        .map_err(|err| ParseError::Structural(err.to_string()))?;
    if headers.is_empty() || headers.iter().all(|name| name.is_empty()) {
        return Err(ParseError::Empty);
    }

    let mut seen = HashSet::new();
    for name in &headers {
        if !seen.insert(name.as_str()) {
            return Err(ParseError::DuplicateColumn(name.clone()));
        }
    }

    let mut data: Vec<Vec<Cell>> = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(|err| ParseError::Structural(err.to_string()))?;
        let decoded = io_utils::decode_record(&record, encoding)
            .map_err(|err| ParseError::Structural(err.to_string()))?;
        if decoded.iter().all(|field| field.is_empty()) {
            continue;
        }
        let mut row: Vec<Cell> = decoded
            .iter()
            .take(headers.len())
            .map(|field| Cell::from_raw(field))
            .collect();
        row.resize(headers.len(), Cell::Missing);
        data.push(row);
    }
    if data.is_empty() {
        return Err(ParseError::Empty);
    }

    let columns = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells: Vec<Cell> = data.iter().map(|row| row[idx].clone()).collect();
            inspect::analyze_column(name, &cells)
        })
        .collect();

    Ok(FileStats { columns, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::ColumnKind;
    use encoding_rs::UTF_8;

    fn parse(input: &str) -> Result<FileStats, ParseError> {
        parse_reader(input.as_bytes(), b',', UTF_8)
    }

    #[test]
    fn parses_headers_and_rows_in_order() {
        let stats = parse("name,age,city\nalice,30,berlin\nbob,25,paris\n").unwrap();
        assert_eq!(stats.column_names(), vec!["name", "age", "city"]);
        assert_eq!(stats.row_count(), 2);
        assert_eq!(stats.columns[1].kind, ColumnKind::Numeric);
        assert_eq!(stats.data[0][0], Cell::Text("alice".to_string()));
        assert_eq!(stats.data[1][1], Cell::Number(25.0));
    }

    #[test]
    fn skips_blank_rows() {
        let stats = parse("a,b\n1,2\n\n,\n3,4\n").unwrap();
        assert_eq!(stats.row_count(), 2);
    }

    #[test]
    fn pads_short_rows_with_missing() {
        let stats = parse("a,b,c\n1,2\n").unwrap();
        assert_eq!(stats.data[0].len(), 3);
        assert_eq!(stats.data[0][2], Cell::Missing);
        assert_eq!(stats.columns[2].missing_values, 1);
    }

    #[test]
    fn truncates_overlong_rows() {
        let stats = parse("a,b\n1,2,3,4\n").unwrap();
        assert_eq!(stats.data[0].len(), 2);
    }

    #[test]
    fn rejects_header_only_input_as_empty() {
        let err = parse("a,b,c\n").unwrap_err();
        assert!(matches!(err, ParseError::Empty));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn rejects_fully_empty_input_as_empty() {
        assert!(matches!(parse("").unwrap_err(), ParseError::Empty));
    }

    #[test]
    fn rejects_duplicate_header_names() {
        let err = parse("id,name,id\n1,a,2\n").unwrap_err();
        match err {
            ParseError::DuplicateColumn(name) => assert_eq!(name, "id"),
            other => panic!("expected duplicate-column error, got {other:?}"),
        }
    }

    #[test]
    fn surfaces_decoder_diagnostics_as_structural() {
        let err = parse_reader(&b"a,b\n\xff\xfe,2\n"[..], b',', UTF_8).unwrap_err();
        assert!(matches!(err, ParseError::Structural(_)));
        assert!(err.to_string().starts_with("Error parsing file:"));
    }

    #[test]
    fn hundred_row_round_trip() {
        let mut input = String::from("id,value\n");
        for i in 0..100 {
            input.push_str(&format!("{i},{}\n", i * 2));
        }
        let stats = parse(&input).unwrap();
        assert_eq!(stats.row_count(), 100);
        assert_eq!(stats.columns.len(), 2);
    }

    #[test]
    fn empty_fields_count_as_missing_per_column() {
        let stats = parse("a,b\nx,\n,y\nz,w\n").unwrap();
        assert_eq!(stats.columns[0].missing_values, 1);
        assert_eq!(stats.columns[1].missing_values, 1);
    }
}
