use thiserror::Error;

use crate::utils::constants::MISSING_VALUE;

/// Why a source line was dropped. None of these stop an ingestion run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineRejection {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("line contains missing value marker -9999")]
    MissingValue,

    #[error("invalid number: '{0}'")]
    InvalidNumber(String),

    #[error("invalid date: '{0}'")]
    InvalidDate(String),

    #[error("invalid year: '{0}'")]
    InvalidYear(String),
}

impl LineRejection {
    /// Short stable name, used as a counter key in ingestion reports
    pub fn label(&self) -> &'static str {
        match self {
            LineRejection::FieldCount { .. } => "field_count",
            LineRejection::MissingValue => "missing_value",
            LineRejection::InvalidNumber(_) => "invalid_number",
            LineRejection::InvalidDate(_) => "invalid_date",
            LineRejection::InvalidYear(_) => "invalid_year",
        }
    }
}

/// Outcome of parsing one non-blank line of a source file
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine<T> {
    pub line_number: usize,
    pub outcome: Result<T, LineRejection>,
}

/// Split a line on runs of whitespace and apply the shape rules shared by
/// both input formats: exact field count first, then the missing-value marker.
pub(crate) fn split_fields(line: &str, expected: usize) -> Result<Vec<&str>, LineRejection> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    if fields.len() != expected {
        return Err(LineRejection::FieldCount {
            expected,
            found: fields.len(),
        });
    }

    if fields.iter().any(|field| *field == MISSING_VALUE) {
        return Err(LineRejection::MissingValue);
    }

    Ok(fields)
}

pub(crate) fn parse_integer(field: &str) -> Result<i64, LineRejection> {
    field
        .parse::<i64>()
        .map_err(|_| LineRejection::InvalidNumber(field.to_string()))
}
