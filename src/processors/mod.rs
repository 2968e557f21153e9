pub mod ingestion;
pub mod report;

pub use ingestion::IngestionPipeline;
pub use report::{IngestKind, IngestReport, StationStatistics};
