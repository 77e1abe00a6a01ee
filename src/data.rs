use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A single cell of a parsed table. The variant is decided once, at parse
/// time, so downstream code matches exhaustively instead of re-checking raw
/// strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// Dynamically types a raw CSV field: empty fields become `Missing`,
    /// fields that pass strict numeric coercion become `Number`, everything
    /// else stays `Text`.
    pub fn from_raw(field: &str) -> Self {
        if field.is_empty() {
            return Cell::Missing;
        }
        match coerce_number(field) {
            Some(value) => Cell::Number(value),
            None => Cell::Text(field.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_display(&self) -> String {
        match self {
            Cell::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{n:.0}")
                } else {
                    n.to_string()
                }
            }
            Cell::Text(s) => s.clone(),
            Cell::Missing => String::new(),
        }
    }

    /// Canonical key for distinctness counting. Variants are tagged so that
    /// `Number(5.0)` and `Text("5")` stay distinct; every `Missing` collapses
    /// to the same key.
    pub fn distinct_key(&self) -> String {
        match self {
            Cell::Number(n) => format!("n:{n}"),
            Cell::Text(s) => format!("t:{s}"),
            Cell::Missing => String::from("m:"),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

/// Strict numeric coercion: the whole trimmed field must parse as a finite
/// number. `"12abc"` and `"NaN"` are rejected; no leading-substring parse.
pub fn coerce_number(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Date-likeness test: ISO `YYYY-MM-DD` at the start of the field, or a
/// `DD/MM/YYYY` / `MM/DD/YYYY` shape. The day/month ordering of the slashed
/// form is intentionally not disambiguated; `03/04/2024` is accepted as-is.
pub fn looks_like_date(field: &str) -> bool {
    static DATE_PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = DATE_PATTERN
        .get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}|\d{2}/\d{2}/\d{4}").expect("date pattern"));
    pattern.is_match(field)
}
