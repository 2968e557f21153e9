use std::collections::HashMap;

/// Blank values mean no filter; anything else is matched exactly as sent
fn param(params: &HashMap<String, String>, name: &str) -> Option<String> {
    params
        .get(name)
        .filter(|value| !value.trim().is_empty())
        .cloned()
}

/// Equality filters for `/api/weather`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherFilter {
    pub date: Option<String>,
    pub station_id: Option<String>,
}

impl WeatherFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            date: param(params, "date"),
            station_id: param(params, "station_id"),
        }
    }
}

/// Equality filters for `/api/weather/stats`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsFilter {
    pub year: Option<String>,
    pub station_id: Option<String>,
}

impl StatsFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            year: param(params, "year"),
            station_id: param(params, "station_id"),
        }
    }
}

/// Equality filter for `/api/yield`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YieldFilter {
    pub year: Option<String>,
}

impl YieldFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            year: param(params, "year"),
        }
    }
}
