use crate::error::{ProcessingError, Result};
use crate::models::WeatherReading;
use crate::readers::line::{parse_integer, split_fields, LineRejection, ParsedLine};
use crate::utils::constants::{DATE_FORMAT, DATE_KEY_LEN, DEFAULT_BUFFER_SIZE, TENTHS_DIVISOR, WEATHER_FIELD_COUNT};
use crate::utils::filename::station_id_from_path;
use chrono::NaiveDate;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse one weather line: `date max_temp min_temp precipitation`.
///
/// The three measurements are recorded in tenths of °C and tenths of mm and
/// come back divided by ten.
pub fn parse_weather_line(line: &str) -> std::result::Result<WeatherReading, LineRejection> {
    let fields = split_fields(line, WEATHER_FIELD_COUNT)?;

    let date = fields[0];
    if date.len() != DATE_KEY_LEN
        || !date.bytes().all(|b| b.is_ascii_digit())
        || NaiveDate::parse_from_str(date, DATE_FORMAT).is_err()
    {
        return Err(LineRejection::InvalidDate(date.to_string()));
    }

    let max_temp = parse_integer(fields[1])? as f64 / TENTHS_DIVISOR;
    let min_temp = parse_integer(fields[2])? as f64 / TENTHS_DIVISOR;
    let precipitation = parse_integer(fields[3])? as f64 / TENTHS_DIVISOR;

    Ok(WeatherReading {
        date: date.to_string(),
        max_temp,
        min_temp,
        precipitation,
    })
}

/// All parsed lines of one station file
#[derive(Debug, Clone)]
pub struct StationFile {
    pub station_id: String,
    pub lines: Vec<ParsedLine<WeatherReading>>,
}

impl StationFile {
    pub fn valid_readings(&self) -> impl Iterator<Item = &WeatherReading> {
        self.lines.iter().filter_map(|line| line.outcome.as_ref().ok())
    }
}

pub struct WeatherReader {
    use_mmap: bool,
}

impl WeatherReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Read a station file; the station id is the file name without extension
    pub fn read_station_file(&self, path: &Path) -> Result<StationFile> {
        let station_id = station_id_from_path(path)?;
        let lines = if self.use_mmap {
            self.read_lines_mmap(path)?
        } else {
            self.read_lines_buffered(path)?
        };

        Ok(StationFile { station_id, lines })
    }

    /// List the regular files of a weather directory in file-name order
    pub fn list_station_files(&self, dir: &Path) -> Result<Vec<std::path::PathBuf>> {
        if !dir.is_dir() {
            return Err(ProcessingError::MissingData(format!(
                "Weather data directory not found: {}",
                dir.display()
            )));
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();

        Ok(files)
    }

    fn read_lines_buffered(&self, path: &Path) -> Result<Vec<ParsedLine<WeatherReading>>> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut lines = Vec::new();

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }

            lines.push(ParsedLine {
                line_number: index + 1,
                outcome: parse_weather_line(&line),
            });
        }

        Ok(lines)
    }

    fn read_lines_mmap(&self, path: &Path) -> Result<Vec<ParsedLine<WeatherReading>>> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Ok(Vec::new());
        }

        // SAFETY: the file is opened read-only and not modified while ingesting
        let mmap = unsafe { Mmap::map(&file)? };
        let content = std::str::from_utf8(&mmap)
            .map_err(|e| ProcessingError::InvalidFormat(format!("Invalid UTF-8 in {}: {}", path.display(), e)))?;

        Ok(content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| ParsedLine {
                line_number: index + 1,
                outcome: parse_weather_line(line),
            })
            .collect())
    }
}

impl Default for WeatherReader {
    fn default() -> Self {
        Self::new()
    }
}
