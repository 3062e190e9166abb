//! upsert statements for `fact_observation` and the station cursor

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::{SqliteConnection, insert_into, update};
use weather_ingestor::models::observation::ObservationRecord;
use weather_ingestor::providers::ProviderError;

use crate::error::SyncError;
use crate::observation::MergeOutcome;
use crate::schema::{dim_station, fact_observation as fo};
use crate::tz;

#[derive(Insertable, Debug)]
#[diesel(table_name = fo)]
struct FactRow<'a> {
    station_sk: i32,
    observation_timestamp: &'a str,
    temperature: Option<f64>,
    wind_speed: Option<f64>,
    humidity: Option<f64>,
}

// NULL overwrites: a re-fetched reading that disappeared upstream is cleared here too.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = fo)]
#[diesel(treat_none_as_null = true)]
struct Measures {
    temperature: Option<f64>,
    wind_speed: Option<f64>,
    humidity: Option<f64>,
}

impl From<&ObservationRecord> for Measures {
    fn from(r: &ObservationRecord) -> Self {
        Measures {
            temperature: r.temperature_c,
            wind_speed: r.wind_speed_kmh,
            humidity: r.humidity_pct,
        }
    }
}

fn upsert_fact(
    conn: &mut SqliteConnection,
    station_sk: i32,
    record: &ObservationRecord,
) -> QueryResult<usize> {
    let ts = tz::to_rfc3339_millis(record.timestamp);
    let measures = Measures::from(record);
    let row = FactRow {
        station_sk,
        observation_timestamp: &ts,
        temperature: measures.temperature,
        wind_speed: measures.wind_speed,
        humidity: measures.humidity,
    };

    insert_into(fo::table)
        .values(&row)
        .on_conflict((fo::station_sk, fo::observation_timestamp))
        .do_update()
        .set(&measures)
        .execute(conn)
}

// Monotonic: the cursor only moves forward, so replaying an old window keeps it.
fn advance_cursor(
    conn: &mut SqliteConnection,
    station_sk: i32,
    latest: DateTime<Utc>,
) -> QueryResult<usize> {
    let latest = tz::to_rfc3339_millis(latest);
    update(
        dim_station::table.filter(
            dim_station::station_sk.eq(station_sk).and(
                dim_station::last_observation_at
                    .is_null()
                    .or(dim_station::last_observation_at.lt(latest.as_str())),
            ),
        ),
    )
    .set(dim_station::last_observation_at.eq(latest.as_str()))
    .execute(conn)
}

/// Merge a batch of observations for one station, atomically.
///
/// Records are validated lazily as they are consumed; the first error (an
/// unsupported unit, a malformed timestamp, a constraint violation) rolls back
/// every row already written in this call and is returned unchanged. Observations
/// sharing a normalized timestamp (UTC, millisecond precision, see [`crate::tz`])
/// collapse onto one row, the later one winning.
///
/// Holds the SQLite write lock from the first statement (`BEGIN IMMEDIATE`), so a
/// concurrent merge waits on `busy_timeout` instead of failing halfway.
pub fn merge_observations<I>(
    conn: &mut SqliteConnection,
    station_sk: i32,
    records: I,
) -> Result<MergeOutcome, SyncError>
where
    I: IntoIterator<Item = Result<ObservationRecord, ProviderError>>,
{
    conn.immediate_transaction::<_, SyncError, _>(|conn| {
        let mut outcome = MergeOutcome::default();

        for record in records {
            let record = record?;
            outcome.rows_written += upsert_fact(conn, station_sk, &record)?;
            outcome.latest_timestamp = outcome.latest_timestamp.max(Some(record.timestamp));
        }

        if let Some(latest) = outcome.latest_timestamp {
            let moved = advance_cursor(conn, station_sk, latest)?;
            tracing::debug!(station_sk, cursor_moved = moved > 0, %latest, "cursor checked");
        }

        Ok(outcome)
    })
}
