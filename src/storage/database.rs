//! SQLite persistence for observations, yearly stats and yields.
//!
//! Every statement is its own unit of work; there are no transactions
//! spanning several records.

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};
use validator::Validate;

use crate::error::Result;
use crate::models::{CornYieldRecord, WeatherObservation, WeatherYearStats};

const CREATE_WEATHER: &str = r#"
    CREATE TABLE IF NOT EXISTS weather (
        date TEXT NOT NULL,
        station_id TEXT NOT NULL,
        max_temp REAL NOT NULL,
        min_temp REAL NOT NULL,
        precipitation REAL NOT NULL,
        PRIMARY KEY (date, station_id)
    )
"#;

const CREATE_WEATHER_STATS: &str = r#"
    CREATE TABLE IF NOT EXISTS weather_stats (
        year TEXT NOT NULL,
        station_id TEXT NOT NULL,
        avg_max_temp REAL NOT NULL,
        avg_min_temp REAL NOT NULL,
        total_precipitation REAL NOT NULL,
        count INTEGER NOT NULL,
        PRIMARY KEY (year, station_id)
    )
"#;

const CREATE_CORN_YIELD: &str = r#"
    CREATE TABLE IF NOT EXISTS corn_yield (
        year TEXT PRIMARY KEY,
        corn_yield INTEGER NOT NULL
    )
"#;

/// Result of an insert against a uniquely keyed table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyExists,
}

impl InsertOutcome {
    fn from_rows_affected(rows: u64) -> Self {
        if rows == 0 {
            Self::AlreadyExists
        } else {
            Self::Inserted
        }
    }
}

/// Row counts of the three tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub weather: i64,
    pub weather_stats: i64,
    pub corn_yield: i64,
}

/// Handle to the relational store. Cloning is cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open or create the database file at the given path.
    pub async fn open(path: &Path, max_connections: u32) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.create_tables().await?;

        info!(path = %path.display(), "Opened weather database");
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub async fn open_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(":memory:")
            .create_if_missing(true);

        // A single long-lived connection, since each :memory: connection is its own database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.create_tables().await?;
        Ok(db)
    }

    pub async fn create_tables(&self) -> Result<()> {
        for statement in [CREATE_WEATHER, CREATE_WEATHER_STATS, CREATE_CORN_YIELD] {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Drop and recreate all tables
    pub async fn reset(&self) -> Result<()> {
        for table in ["weather", "weather_stats", "corn_yield"] {
            sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
                .execute(&self.pool)
                .await?;
        }
        self.create_tables().await?;

        info!("Reset weather database tables");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ------------------------------------------------------------------
    // weather
    // ------------------------------------------------------------------

    /// Insert an observation unless its (date, station_id) is already stored
    pub async fn insert_weather(&self, observation: &WeatherObservation) -> Result<InsertOutcome> {
        observation.validate()?;

        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO weather (date, station_id, max_temp, min_temp, precipitation)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&observation.date)
        .bind(&observation.station_id)
        .bind(observation.max_temp)
        .bind(observation.min_temp)
        .bind(observation.precipitation)
        .execute(&self.pool)
        .await?;

        Ok(InsertOutcome::from_rows_affected(result.rows_affected()))
    }

    /// Observations matching the optional filters, in (date, station_id) order
    pub async fn select_weather(
        &self,
        date: Option<&str>,
        station_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WeatherObservation>> {
        let rows = sqlx::query_as::<_, WeatherObservation>(
            r#"
            SELECT date, station_id, max_temp, min_temp, precipitation
            FROM weather
            WHERE (?1 IS NULL OR date = ?1)
              AND (?2 IS NULL OR station_id = ?2)
            ORDER BY date ASC, station_id ASC
            LIMIT ?3 OFFSET ?4
            "#,
        )
        .bind(date)
        .bind(station_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // ------------------------------------------------------------------
    // weather_stats
    // ------------------------------------------------------------------

    pub async fn get_stats(&self, year: &str, station_id: &str) -> Result<Option<WeatherYearStats>> {
        let stats = sqlx::query_as::<_, WeatherYearStats>(
            r#"
            SELECT year, station_id, avg_max_temp, avg_min_temp, total_precipitation, count
            FROM weather_stats
            WHERE year = ? AND station_id = ?
            "#,
        )
        .bind(year)
        .bind(station_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stats)
    }

    /// Insert the aggregate or overwrite the stored one with the same key
    pub async fn upsert_stats(&self, stats: &WeatherYearStats) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO weather_stats
                (year, station_id, avg_max_temp, avg_min_temp, total_precipitation, count)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (year, station_id) DO UPDATE SET
                avg_max_temp = excluded.avg_max_temp,
                avg_min_temp = excluded.avg_min_temp,
                total_precipitation = excluded.total_precipitation,
                count = excluded.count
            "#,
        )
        .bind(&stats.year)
        .bind(&stats.station_id)
        .bind(stats.avg_max_temp)
        .bind(stats.avg_min_temp)
        .bind(stats.total_precipitation)
        .bind(stats.count)
        .execute(&self.pool)
        .await?;

        debug!(year = %stats.year, station_id = %stats.station_id, count = stats.count, "Upserted weather stats");
        Ok(())
    }

    /// Yearly aggregates matching the optional filters, in (year, station_id) order
    pub async fn select_stats(
        &self,
        year: Option<&str>,
        station_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WeatherYearStats>> {
        let rows = sqlx::query_as::<_, WeatherYearStats>(
            r#"
            SELECT year, station_id, avg_max_temp, avg_min_temp, total_precipitation, count
            FROM weather_stats
            WHERE (?1 IS NULL OR year = ?1)
              AND (?2 IS NULL OR station_id = ?2)
            ORDER BY year ASC, station_id ASC
            LIMIT ?3 OFFSET ?4
            "#,
        )
        .bind(year)
        .bind(station_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // ------------------------------------------------------------------
    // corn_yield
    // ------------------------------------------------------------------

    /// Insert a yield unless its year is already stored
    pub async fn insert_yield(&self, record: &CornYieldRecord) -> Result<InsertOutcome> {
        record.validate()?;

        let result = sqlx::query("INSERT OR IGNORE INTO corn_yield (year, corn_yield) VALUES (?, ?)")
            .bind(&record.year)
            .bind(record.corn_yield)
            .execute(&self.pool)
            .await?;

        Ok(InsertOutcome::from_rows_affected(result.rows_affected()))
    }

    pub async fn select_yields(&self, year: Option<&str>, limit: i64, offset: i64) -> Result<Vec<CornYieldRecord>> {
        let rows = sqlx::query_as::<_, CornYieldRecord>(
            r#"
            SELECT year, corn_yield
            FROM corn_yield
            WHERE (?1 IS NULL OR year = ?1)
            ORDER BY year ASC
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(year)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // ------------------------------------------------------------------
    // housekeeping
    // ------------------------------------------------------------------

    pub async fn table_counts(&self) -> Result<TableCounts> {
        let (weather, weather_stats, corn_yield): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM weather),
                (SELECT COUNT(*) FROM weather_stats),
                (SELECT COUNT(*) FROM corn_yield)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(TableCounts {
            weather,
            weather_stats,
            corn_yield,
        })
    }
}
