pub mod database;

pub use database::{Database, InsertOutcome, TableCounts};
