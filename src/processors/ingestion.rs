use crate::error::{ProcessingError, Result};
use crate::models::{WeatherObservation, WeatherYearStats};
use crate::processors::report::{IngestKind, IngestReport};
use crate::readers::{WeatherReader, YieldReader};
use crate::storage::{Database, InsertOutcome};
use crate::utils::progress::ProgressReporter;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Sequential file ingestion into the store.
///
/// Each line runs `parse -> insert-if-absent -> fold stats`. Bad lines,
/// duplicate keys and per-row store failures are counted and skipped; only
/// a missing or unreadable source aborts a run.
pub struct IngestionPipeline {
    db: Database,
    use_mmap: bool,
}

impl IngestionPipeline {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            use_mmap: false,
        }
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Confirm the sources of a run exist before anything is written.
    /// `None` means that kind is skipped.
    pub fn check_sources(weather_dir: Option<&Path>, yield_file: Option<&Path>) -> Result<()> {
        if let Some(dir) = weather_dir {
            if !dir.is_dir() {
                return Err(ProcessingError::MissingData(format!(
                    "Weather data directory not found: {}",
                    dir.display()
                )));
            }
        }

        if let Some(path) = yield_file {
            if !path.is_file() {
                return Err(ProcessingError::MissingData(format!(
                    "Yield data file not found: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// Ingest every station file in a directory
    pub async fn ingest_weather_dir(
        &self,
        dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<IngestReport> {
        let started = Instant::now();
        let reader = WeatherReader::with_mmap(self.use_mmap);
        let files = reader.list_station_files(dir)?;

        info!(dir = %dir.display(), files = files.len(), "Ingesting weather data");

        let mut report = IngestReport::new(IngestKind::Weather);
        for path in &files {
            if let Some(p) = progress {
                p.set_message(&format!("Ingesting {}", path.display()));
            }
            self.ingest_weather_file(&reader, path, &mut report, progress).await?;
        }

        report.elapsed = started.elapsed();
        info!(
            files = report.files_processed,
            inserted = report.inserted,
            duplicates = report.duplicates,
            rejected = report.rejected,
            store_errors = report.store_errors,
            elapsed_secs = report.elapsed.as_secs_f64(),
            "Weather ingestion complete"
        );

        Ok(report)
    }

    async fn ingest_weather_file(
        &self,
        reader: &WeatherReader,
        path: &Path,
        report: &mut IngestReport,
        progress: Option<&ProgressReporter>,
    ) -> Result<()> {
        let station = reader.read_station_file(path)?;
        let station_id = station.station_id.as_str();
        let inserted_before = report.inserted;

        for line in station.lines {
            let reading = match line.outcome {
                Ok(reading) => reading,
                Err(rejection) => {
                    debug!(
                        station_id,
                        line = line.line_number,
                        reason = %rejection,
                        "Skipping weather line"
                    );
                    report.record_rejection(Some(station_id), &rejection);
                    continue;
                }
            };

            let observation = WeatherObservation::from_reading(station_id, reading);
            match self.record_observation(&observation).await {
                Ok(outcome) => {
                    if outcome == InsertOutcome::AlreadyExists {
                        debug!(
                            station_id,
                            date = %observation.date,
                            "Observation already stored, skipping"
                        );
                    }
                    report.record_outcome(Some(station_id), outcome);
                }
                Err(e) => {
                    warn!(station_id, date = %observation.date, error = %e, "Failed to store observation");
                    report.record_store_error(Some(station_id));
                }
            }
        }

        if let Some(p) = progress {
            if let Some(stats) = report.station_statistics.get(station_id) {
                p.increment(stats.total_lines as u64);
            }
        }

        report.files_processed += 1;
        let inserted = report.inserted - inserted_before;
        if inserted == 0 {
            info!(station_id, path = %path.display(), "No new observations in file");
        } else {
            debug!(station_id, inserted, "Ingested station file");
        }

        Ok(())
    }

    /// Store one observation and, only when it was newly inserted, fold it
    /// into its (year, station_id) aggregate.
    pub async fn record_observation(&self, observation: &WeatherObservation) -> Result<InsertOutcome> {
        let outcome = self.db.insert_weather(observation).await?;

        if outcome == InsertOutcome::Inserted {
            let existing = self.db.get_stats(observation.year(), &observation.station_id).await?;
            let stats = WeatherYearStats::accumulate(existing, observation);
            self.db.upsert_stats(&stats).await?;
        }

        Ok(outcome)
    }

    /// Ingest a single yield file
    pub async fn ingest_yield_file(
        &self,
        path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<IngestReport> {
        let started = Instant::now();
        let lines = YieldReader::new().read_yields(path)?;

        info!(path = %path.display(), lines = lines.len(), "Ingesting yield data");
        if let Some(p) = progress {
            p.set_message(&format!("Ingesting {}", path.display()));
        }

        let mut report = IngestReport::new(IngestKind::Yield);
        for line in lines {
            let record = match line.outcome {
                Ok(record) => record,
                Err(rejection) => {
                    debug!(line = line.line_number, reason = %rejection, "Skipping yield line");
                    report.record_rejection(None, &rejection);
                    continue;
                }
            };

            match self.db.insert_yield(&record).await {
                Ok(outcome) => {
                    if outcome == InsertOutcome::AlreadyExists {
                        debug!(year = %record.year, "Yield already stored, skipping");
                    }
                    report.record_outcome(None, outcome);
                }
                Err(e) => {
                    warn!(year = %record.year, error = %e, "Failed to store yield");
                    report.record_store_error(None);
                }
            }

            if let Some(p) = progress {
                p.increment(1);
            }
        }

        report.files_processed = 1;
        report.elapsed = started.elapsed();
        info!(
            inserted = report.inserted,
            duplicates = report.duplicates,
            rejected = report.rejected,
            elapsed_secs = report.elapsed.as_secs_f64(),
            "Yield ingestion complete"
        );

        Ok(report)
    }
}
