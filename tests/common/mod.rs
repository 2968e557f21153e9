//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use weather_yield_api::processors::IngestionPipeline;
use weather_yield_api::storage::Database;

pub fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

/// `test1` (10 lines, one with a missing value, all 1915) and
/// `test2` (20 lines across 1915 and 1916)
pub fn weather_dir() -> PathBuf {
    data_dir().join("wx_data")
}

pub fn yield_file() -> PathBuf {
    data_dir().join("yld_data").join("US_corn_grain_yield.txt")
}

pub fn write_lines(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).expect("create fixture file");
    for line in lines {
        writeln!(file, "{}", line).expect("write fixture line");
    }
    path
}

/// Fresh in-memory database with the fixture weather and yield data ingested
pub async fn seeded_database() -> Database {
    let db = Database::open_memory().await.expect("open in-memory database");
    let pipeline = IngestionPipeline::new(db.clone());
    pipeline
        .ingest_weather_dir(&weather_dir(), None)
        .await
        .expect("ingest fixture weather data");
    pipeline
        .ingest_yield_file(&yield_file(), None)
        .await
        .expect("ingest fixture yield data");
    db
}
