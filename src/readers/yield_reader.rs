use crate::error::{ProcessingError, Result};
use crate::models::CornYieldRecord;
use crate::readers::line::{parse_integer, split_fields, LineRejection, ParsedLine};
use crate::utils::constants::{YEAR_KEY_LEN, YIELD_FIELD_COUNT};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse one yield line: `year yield`. The yield is kept as an integer.
pub fn parse_yield_line(line: &str) -> std::result::Result<CornYieldRecord, LineRejection> {
    let fields = split_fields(line, YIELD_FIELD_COUNT)?;

    let year = fields[0];
    if year.len() != YEAR_KEY_LEN || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LineRejection::InvalidYear(year.to_string()));
    }

    let corn_yield = parse_integer(fields[1])?;

    Ok(CornYieldRecord::new(year.to_string(), corn_yield))
}

pub struct YieldReader;

impl YieldReader {
    pub fn new() -> Self {
        Self
    }

    /// Read every non-blank line of a yield file
    pub fn read_yields(&self, path: &Path) -> Result<Vec<ParsedLine<CornYieldRecord>>> {
        if !path.is_file() {
            return Err(ProcessingError::MissingData(format!(
                "Yield data file not found: {}",
                path.display()
            )));
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut lines = Vec::new();

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }

            lines.push(ParsedLine {
                line_number: index + 1,
                outcome: parse_yield_line(&line),
            });
        }

        Ok(lines)
    }
}

impl Default for YieldReader {
    fn default() -> Self {
        Self::new()
    }
}
