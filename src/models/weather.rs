use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::constants::{MM_PER_CM, YEAR_KEY_LEN};

/// One parsed weather line, already converted from tenths to °C and mm.
/// Carries no station id; that comes from the file it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub date: String,
    pub max_temp: f64,
    pub min_temp: f64,
    pub precipitation: f64,
}

/// A stored daily observation, keyed by (date, station_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, sqlx::FromRow)]
pub struct WeatherObservation {
    #[validate(length(equal = 8))]
    pub date: String,

    #[validate(length(min = 1))]
    pub station_id: String,

    // Degrees Celsius
    pub max_temp: f64,
    pub min_temp: f64,

    // Millimetres
    pub precipitation: f64,
}

impl WeatherObservation {
    pub fn new(
        date: String,
        station_id: String,
        max_temp: f64,
        min_temp: f64,
        precipitation: f64,
    ) -> Self {
        Self {
            date,
            station_id,
            max_temp,
            min_temp,
            precipitation,
        }
    }

    pub fn from_reading(station_id: &str, reading: WeatherReading) -> Self {
        Self::new(
            reading.date,
            station_id.to_string(),
            reading.max_temp,
            reading.min_temp,
            reading.precipitation,
        )
    }

    /// Year portion of the date key (`19850101` -> `1985`)
    pub fn year(&self) -> &str {
        let end = YEAR_KEY_LEN.min(self.date.len());
        &self.date[..end]
    }

    /// Precipitation as folded into the yearly totals, in centimetres
    pub fn precipitation_cm(&self) -> f64 {
        self.precipitation / MM_PER_CM
    }
}
