use crate::readers::LineRejection;
use crate::storage::InsertOutcome;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngestKind {
    #[default]
    Weather,
    Yield,
}

impl fmt::Display for IngestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestKind::Weather => write!(f, "weather"),
            IngestKind::Yield => write!(f, "yield"),
        }
    }
}

/// Outcome counters of one ingestion run
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub kind: IngestKind,
    pub files_processed: usize,
    pub total_lines: usize,
    pub inserted: usize,
    pub duplicates: usize,
    pub rejected: usize,
    pub store_errors: usize,
    pub rejections: BTreeMap<&'static str, usize>,
    pub station_statistics: BTreeMap<String, StationStatistics>,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationStatistics {
    pub total_lines: usize,
    pub inserted: usize,
    pub duplicates: usize,
    pub rejected: usize,
    pub store_errors: usize,
}

impl IngestReport {
    pub fn new(kind: IngestKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn record_rejection(&mut self, station_id: Option<&str>, rejection: &LineRejection) {
        self.total_lines += 1;
        self.rejected += 1;
        *self.rejections.entry(rejection.label()).or_default() += 1;

        if let Some(stats) = self.station_mut(station_id) {
            stats.total_lines += 1;
            stats.rejected += 1;
        }
    }

    pub fn record_outcome(&mut self, station_id: Option<&str>, outcome: InsertOutcome) {
        self.total_lines += 1;
        match outcome {
            InsertOutcome::Inserted => self.inserted += 1,
            InsertOutcome::AlreadyExists => self.duplicates += 1,
        }

        if let Some(stats) = self.station_mut(station_id) {
            stats.total_lines += 1;
            match outcome {
                InsertOutcome::Inserted => stats.inserted += 1,
                InsertOutcome::AlreadyExists => stats.duplicates += 1,
            }
        }
    }

    pub fn record_store_error(&mut self, station_id: Option<&str>) {
        self.total_lines += 1;
        self.store_errors += 1;

        if let Some(stats) = self.station_mut(station_id) {
            stats.total_lines += 1;
            stats.store_errors += 1;
        }
    }

    fn station_mut(&mut self, station_id: Option<&str>) -> Option<&mut StationStatistics> {
        station_id.map(|id| self.station_statistics.entry(id.to_string()).or_default())
    }

    /// Generate a human readable summary
    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str(&format!("=== {} ingestion report ===\n", self.kind));
        summary.push_str(&format!("Files processed: {}\n", self.files_processed));
        summary.push_str(&format!("Lines read: {}\n", self.total_lines));
        summary.push_str(&format!(
            "Inserted: {} ({:.1}%)\n",
            self.inserted,
            self.percentage(self.inserted)
        ));
        summary.push_str(&format!("Duplicates skipped: {}\n", self.duplicates));
        summary.push_str(&format!("Lines rejected: {}\n", self.rejected));
        for (reason, count) in &self.rejections {
            summary.push_str(&format!("  {}: {}\n", reason, count));
        }
        if self.store_errors > 0 {
            summary.push_str(&format!("Store errors: {}\n", self.store_errors));
        }
        if !self.station_statistics.is_empty() {
            summary.push_str(&format!("Stations: {}\n", self.station_statistics.len()));
        }
        summary.push_str(&format!("Elapsed: {:.2}s\n", self.elapsed.as_secs_f64()));

        summary
    }

    fn percentage(&self, count: usize) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            100.0 * count as f64 / self.total_lines as f64
        }
    }
}
