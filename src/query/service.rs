use crate::models::{CornYieldRecord, WeatherObservation, WeatherYearStats};
use crate::query::{PageRequest, QueryError, StatsFilter, WeatherFilter, YieldFilter};
use crate::settings::PaginationSettings;
use crate::storage::Database;
use std::collections::HashMap;

/// Filtered, paginated reads over the stored collections
#[derive(Debug, Clone)]
pub struct QueryService {
    db: Database,
    pagination: PaginationSettings,
}

impl QueryService {
    pub fn new(db: Database, pagination: PaginationSettings) -> Self {
        Self { db, pagination }
    }

    pub async fn weather(
        &self,
        filter: &WeatherFilter,
        page: PageRequest,
    ) -> Result<Vec<WeatherObservation>, QueryError> {
        let rows = self
            .db
            .select_weather(
                filter.date.as_deref(),
                filter.station_id.as_deref(),
                page.limit(),
                page.offset()?,
            )
            .await?;
        Ok(rows)
    }

    pub async fn weather_stats(
        &self,
        filter: &StatsFilter,
        page: PageRequest,
    ) -> Result<Vec<WeatherYearStats>, QueryError> {
        let rows = self
            .db
            .select_stats(
                filter.year.as_deref(),
                filter.station_id.as_deref(),
                page.limit(),
                page.offset()?,
            )
            .await?;
        Ok(rows)
    }

    pub async fn yields(&self, filter: &YieldFilter, page: PageRequest) -> Result<Vec<CornYieldRecord>, QueryError> {
        let rows = self
            .db
            .select_yields(filter.year.as_deref(), page.limit(), page.offset()?)
            .await?;
        Ok(rows)
    }

    // Raw query-string entry points used by the HTTP handlers

    pub async fn weather_from_params(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<Vec<WeatherObservation>, QueryError> {
        let page = PageRequest::from_params(params, &self.pagination)?;
        self.weather(&WeatherFilter::from_params(params), page).await
    }

    pub async fn weather_stats_from_params(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<Vec<WeatherYearStats>, QueryError> {
        let page = PageRequest::from_params(params, &self.pagination)?;
        self.weather_stats(&StatsFilter::from_params(params), page).await
    }

    pub async fn yields_from_params(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<Vec<CornYieldRecord>, QueryError> {
        let page = PageRequest::from_params(params, &self.pagination)?;
        self.yields(&YieldFilter::from_params(params), page).await
    }
}
