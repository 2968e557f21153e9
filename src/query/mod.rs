pub mod filters;
pub mod pagination;
pub mod service;

pub use filters::{StatsFilter, WeatherFilter, YieldFilter};
pub use pagination::PageRequest;
pub use service::QueryService;

use crate::error::ProcessingError;
use thiserror::Error;

/// Why a read could not produce a page. The HTTP layer logs these and
/// answers with an empty page instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid page: '{0}'")]
    InvalidPage(String),

    #[error("invalid per_page: '{0}'")]
    InvalidPerPage(String),

    #[error("page {page} with per_page {per_page} is out of range")]
    PageOutOfRange { page: u32, per_page: u32 },

    #[error("store error: {0}")]
    Store(String),
}

impl From<ProcessingError> for QueryError {
    fn from(err: ProcessingError) -> Self {
        QueryError::Store(err.to_string())
    }
}
