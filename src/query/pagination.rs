use crate::query::QueryError;
use crate::settings::PaginationSettings;
use std::collections::HashMap;

/// A validated page window: 1-based page number and a capped page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    /// Build from raw `page` / `per_page` strings. Missing or empty values
    /// fall back to the configured defaults and `per_page` is capped.
    pub fn parse(
        page: Option<&str>,
        per_page: Option<&str>,
        settings: &PaginationSettings,
    ) -> Result<Self, QueryError> {
        let page = match non_empty(page) {
            Some(raw) => parse_positive(raw).ok_or_else(|| QueryError::InvalidPage(raw.to_string()))?,
            None => settings.default_page,
        };

        let per_page = match non_empty(per_page) {
            Some(raw) => parse_positive(raw).ok_or_else(|| QueryError::InvalidPerPage(raw.to_string()))?,
            None => settings.default_per_page,
        };

        Ok(Self {
            page,
            per_page: per_page.min(settings.max_per_page),
        })
    }

    pub fn from_params(params: &HashMap<String, String>, settings: &PaginationSettings) -> Result<Self, QueryError> {
        Self::parse(
            params.get("page").map(String::as_str),
            params.get("per_page").map(String::as_str),
            settings,
        )
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    /// Row offset of the first record on this page. Page 0 has none.
    pub fn offset(&self) -> Result<i64, QueryError> {
        self.page
            .checked_sub(1)
            .and_then(|skipped| i64::from(skipped).checked_mul(self.limit()))
            .ok_or(QueryError::PageOutOfRange {
                page: self.page,
                per_page: self.per_page,
            })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a strictly positive integer; zero, negatives and non-numbers yield None
fn parse_positive(raw: &str) -> Option<u32> {
    raw.parse::<i64>()
        .ok()
        .filter(|v| *v >= 1)
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
}
