//! Read-only aggregates over the finished star schema.
//!
//! Both queries only read committed rows; run them after a pipeline run reaches
//! [`crate::pipeline::RunState::Done`].

use chrono::{DateTime, Duration, Utc};
use diesel::sql_types::{Double, Nullable, Text};
use diesel::{QueryableByName, RunQueryDsl, SqliteConnection, sql_query};

use crate::error::PersistenceError;
use crate::tz;

#[derive(QueryableByName)]
struct Scalar {
    #[diesel(sql_type = Nullable<Double>)]
    value: Option<f64>,
}

const AVG_TEMPERATURE_SQL: &str = "\
    SELECT ROUND(AVG(f.temperature), 2) AS value
    FROM fact_observation AS f
    JOIN dim_station AS s ON s.station_sk = f.station_sk
    WHERE s.station_id = ?
      AND f.observation_timestamp >= ?
      AND f.observation_timestamp < ?";

const MAX_WIND_CHANGE_SQL: &str = "\
    WITH readings AS (
        SELECT f.wind_speed,
               LAG(f.wind_speed) OVER (ORDER BY f.observation_timestamp) AS previous
        FROM fact_observation AS f
        JOIN dim_station AS s ON s.station_sk = f.station_sk
        WHERE s.station_id = ?
          AND f.wind_speed IS NOT NULL
          AND f.observation_timestamp >= ?
          AND f.observation_timestamp <= ?
    )
    SELECT MAX(wind_speed - previous) AS value
    FROM readings
    WHERE previous IS NOT NULL";

/// Average temperature for `station_id` over the previous calendar week (UTC).
///
/// The week runs from last Monday 00:00 up to, but excluding, this Monday 00:00.
/// NULL temperatures are ignored. `None` when there is nothing to average.
pub fn avg_temperature_last_week(
    conn: &mut SqliteConnection,
    station_id: &str,
    now: DateTime<Utc>,
) -> Result<Option<f64>, PersistenceError> {
    let (start, end) = tz::previous_week(now);
    let row: Scalar = sql_query(AVG_TEMPERATURE_SQL)
        .bind::<Text, _>(station_id)
        .bind::<Text, _>(tz::to_rfc3339_millis(start))
        .bind::<Text, _>(tz::to_rfc3339_millis(end))
        .get_result(conn)?;
    Ok(row.value)
}

/// Largest increase between consecutive wind-speed readings in the 7 days up to `now`.
///
/// Readings without a wind speed are skipped, not treated as zero. The result is
/// signed: a window that only ever calms down yields a negative value. `None` with
/// fewer than two readings.
pub fn max_wind_speed_change(
    conn: &mut SqliteConnection,
    station_id: &str,
    now: DateTime<Utc>,
) -> Result<Option<f64>, PersistenceError> {
    let row: Scalar = sql_query(MAX_WIND_CHANGE_SQL)
        .bind::<Text, _>(station_id)
        .bind::<Text, _>(tz::to_rfc3339_millis(now - Duration::days(7)))
        .bind::<Text, _>(tz::to_rfc3339_millis(now))
        .get_result(conn)?;
    Ok(row.value.map(|v| (v * 100.0).round() / 100.0))
}
