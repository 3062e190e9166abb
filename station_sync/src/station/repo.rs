//! upsert statements for `dim_station`
use diesel::prelude::*;
use diesel::{RunQueryDsl, SqliteConnection, insert_into};
use weather_ingestor::models::station::StationMetadata;

use crate::error::PersistenceError;
use crate::schema::dim_station;
use crate::station::ResolvedStation;
use crate::tz;

// No `last_observation_at`: the cursor is written only by the fact merge.
#[derive(Insertable, AsChangeset, Debug)]
#[diesel(table_name = dim_station)]
#[diesel(treat_none_as_null = true)]
struct StationRow<'a> {
    station_id: &'a str,
    station_name: Option<&'a str>,
    station_timezone: Option<&'a str>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl<'a> From<&'a StationMetadata> for StationRow<'a> {
    fn from(meta: &'a StationMetadata) -> Self {
        StationRow {
            station_id: &meta.station_id,
            station_name: meta.name.as_deref(),
            station_timezone: meta.timezone.as_deref(),
            latitude: meta.latitude,
            longitude: meta.longitude,
        }
    }
}

fn resolve(
    (station_sk, cursor): (i32, Option<String>),
) -> Result<ResolvedStation, PersistenceError> {
    let last_observation_at = cursor.as_deref().map(tz::parse_ts_to_utc).transpose()?;
    Ok(ResolvedStation {
        station_sk,
        last_observation_at,
    })
}

/// Insert the station or overwrite its descriptive attributes, returning its surrogate key.
///
/// A single `INSERT .. ON CONFLICT (station_id) DO UPDATE .. RETURNING` statement, so two
/// runs racing on the same new station both resolve to the one row SQLite keeps.
/// Absent attributes are written as NULL (last write wins, including absence).
pub fn upsert_station(
    conn: &mut SqliteConnection,
    meta: &StationMetadata,
) -> Result<ResolvedStation, PersistenceError> {
    use crate::schema::dim_station::dsl::*;

    let row = StationRow::from(meta);

    // Insert .. ON CONFLICT (station_id) DO UPDATE .. RETURNING (Sqlite 3.35+)
    let got: (i32, Option<String>) = insert_into(dim_station)
        .values(&row)
        .on_conflict(station_id)
        .do_update()
        .set(&row)
        .returning((station_sk, last_observation_at))
        .get_result(conn)?;

    let resolved = resolve(got)?;
    tracing::debug!(
        station_id = %meta.station_id,
        station_sk = resolved.station_sk,
        "station reconciled"
    );
    Ok(resolved)
}
