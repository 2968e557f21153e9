use serde::{Deserialize, Serialize};
use validator::Validate;

/// Harvested corn grain yield for one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, sqlx::FromRow)]
pub struct CornYieldRecord {
    #[validate(length(equal = 4))]
    pub year: String,

    pub corn_yield: i64,
}

impl CornYieldRecord {
    pub fn new(year: String, corn_yield: i64) -> Self {
        Self { year, corn_yield }
    }
}
