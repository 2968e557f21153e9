use serde::{Deserialize, Serialize};

use crate::models::WeatherObservation;

/// Running per-(year, station_id) aggregate over ingested observations.
///
/// Averages are maintained incrementally so no per-day history is kept:
///
/// ```text
/// new_avg = old_avg + (value - old_avg) / (old_count + 1)
/// ```
///
/// `count` is the number of observations folded in and is never exposed
/// through the read API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WeatherYearStats {
    pub year: String,
    pub station_id: String,
    pub avg_max_temp: f64,
    pub avg_min_temp: f64,

    // Centimetres
    pub total_precipitation: f64,

    #[serde(skip_serializing, default)]
    pub count: i64,
}

impl WeatherYearStats {
    /// Aggregate seeded from a single observation
    pub fn first(
        year: String,
        station_id: String,
        max_temp: f64,
        min_temp: f64,
        precipitation: f64,
    ) -> Self {
        Self {
            year,
            station_id,
            avg_max_temp: max_temp,
            avg_min_temp: min_temp,
            total_precipitation: precipitation,
            count: 1,
        }
    }

    /// Fold one more observation into the running values
    pub fn fold(&mut self, max_temp: f64, min_temp: f64, precipitation: f64) {
        let next = (self.count + 1) as f64;
        self.avg_max_temp += (max_temp - self.avg_max_temp) / next;
        self.avg_min_temp += (min_temp - self.avg_min_temp) / next;
        self.total_precipitation += precipitation;
        self.count += 1;
    }

    /// Seed or extend the aggregate for the observation's (year, station_id).
    /// Precipitation enters the total in centimetres.
    pub fn accumulate(existing: Option<Self>, observation: &WeatherObservation) -> Self {
        let precipitation = observation.precipitation_cm();

        match existing {
            Some(mut stats) => {
                stats.fold(observation.max_temp, observation.min_temp, precipitation);
                stats
            }
            None => Self::first(
                observation.year().to_string(),
                observation.station_id.clone(),
                observation.max_temp,
                observation.min_temp,
                precipitation,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn fold_all(values: &[(f64, f64, f64)]) -> WeatherYearStats {
        let (max, min, precip) = values[0];
        let mut stats = WeatherYearStats::first("1915".to_string(), "test1".to_string(), max, min, precip);
        for &(max, min, precip) in &values[1..] {
            stats.fold(max, min, precip);
        }
        stats
    }

    fn mean(values: impl Iterator<Item = f64>) -> f64 {
        let collected: Vec<f64> = values.collect();
        collected.iter().sum::<f64>() / collected.len() as f64
    }

    #[test]
    fn test_first_observation_seeds_aggregate() {
        let stats = WeatherYearStats::first("1915".to_string(), "test1".to_string(), 2.5, -1.0, 0.3);

        assert_eq!(stats.count, 1);
        assert_eq!(stats.avg_max_temp, 2.5);
        assert_eq!(stats.avg_min_temp, -1.0);
        assert_eq!(stats.total_precipitation, 0.3);
    }

    #[test]
    fn test_running_mean_matches_arithmetic_mean() {
        let values: Vec<(f64, f64, f64)> = (0..365)
            .map(|day| {
                let d = day as f64;
                (10.0 + (d * 0.37).sin() * 15.0, -5.0 + (d * 0.11).cos() * 9.0, (day % 7) as f64 * 0.12)
            })
            .collect();

        let stats = fold_all(&values);

        assert_eq!(stats.count, 365);
        assert!((stats.avg_max_temp - mean(values.iter().map(|v| v.0))).abs() < TOLERANCE);
        assert!((stats.avg_min_temp - mean(values.iter().map(|v| v.1))).abs() < TOLERANCE);
        let total: f64 = values.iter().map(|v| v.2).sum();
        assert!((stats.total_precipitation - total).abs() < TOLERANCE);
    }

    #[test]
    fn test_fold_order_does_not_change_mean() {
        let forward = vec![(3.3, -1.1, 0.0), (-7.8, -15.6, 1.2), (12.2, 4.4, 0.05), (0.0, -2.2, 0.4)];
        let mut reversed = forward.clone();
        reversed.reverse();
        let mut interleaved = forward.clone();
        interleaved.swap(0, 2);

        let a = fold_all(&forward);
        let b = fold_all(&reversed);
        let c = fold_all(&interleaved);

        for other in [&b, &c] {
            assert!((a.avg_max_temp - other.avg_max_temp).abs() < TOLERANCE);
            assert!((a.avg_min_temp - other.avg_min_temp).abs() < TOLERANCE);
            assert!((a.total_precipitation - other.total_precipitation).abs() < TOLERANCE);
            assert_eq!(a.count, other.count);
        }
        assert!((a.avg_max_temp - 1.925).abs() < TOLERANCE);
    }

    #[test]
    fn test_accumulate_converts_precipitation_to_cm() {
        let day1 = WeatherObservation::new("19150101".to_string(), "test2".to_string(), 1.0, -1.0, 2.5);
        let day2 = WeatherObservation::new("19150102".to_string(), "test2".to_string(), 3.0, 1.0, 1.0);

        let stats = WeatherYearStats::accumulate(None, &day1);
        assert_eq!(stats.year, "1915");
        assert_eq!(stats.station_id, "test2");
        assert!((stats.total_precipitation - 0.25).abs() < TOLERANCE);

        let stats = WeatherYearStats::accumulate(Some(stats), &day2);
        assert_eq!(stats.count, 2);
        assert!((stats.avg_max_temp - 2.0).abs() < TOLERANCE);
        assert!((stats.avg_min_temp - 0.0).abs() < TOLERANCE);
        assert!((stats.total_precipitation - 0.35).abs() < TOLERANCE);
    }

    #[test]
    fn test_count_is_not_serialized() {
        let stats = WeatherYearStats::first("1915".to_string(), "test1".to_string(), 1.0, 0.0, 0.0);
        let json = serde_json::to_value(&stats).unwrap();

        assert!(json.get("count").is_none());
        assert_eq!(json["year"], "1915");
        assert_eq!(json["avg_max_temp"], 1.0);
    }
}
