//! Read models for the star schema.
//!
//! These mirror the two tables created by the embedded migrations:
//! - [`crate::schema::dim_station`]: one row per station, keyed by the surrogate `station_sk`
//! - [`crate::schema::fact_observation`]: one row per `(station_sk, observation_timestamp)`
//!
//! Write paths use private row structs next to their upserts
//! (see [`crate::station`] and [`crate::observation`]); the types here are what
//! callers and tests read back.
//!
//! Example (no_run)
//! ```no_run
//! use diesel::prelude::*;
//! use station_sync::models::Station;
//! use station_sync::schema::dim_station;
//!
//! fn all_stations(conn: &mut SqliteConnection) -> QueryResult<Vec<Station>> {
//!     dim_station::table
//!         .select(Station::as_select())
//!         .order(dim_station::station_id)
//!         .load(conn)
//! }
//! ```

use diesel::prelude::*;

// ----------------------- dim_station --------------------

/// A row of [`crate::schema::dim_station`].
#[derive(Debug, Clone, PartialEq, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::dim_station)]
#[diesel(primary_key(station_sk))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Station {
    /// Surrogate key, assigned on first insert and never changed.
    pub station_sk: i32,
    /// Natural key from the provider, e.g. "0007W".
    pub station_id: String,
    /// Display name.
    pub station_name: Option<String>,
    /// IANA timezone name, e.g. "America/New_York".
    pub station_timezone: Option<String>,
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
    /// Latest merged observation timestamp (RFC3339 UTC millis).
    pub last_observation_at: Option<String>,
}

// -------------------- fact_observation ------------------

/// A row of [`crate::schema::fact_observation`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = crate::schema::fact_observation)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Observation {
    /// FK to [`Station::station_sk`].
    pub station_sk: i32,
    /// RFC3339 UTC millis.
    pub observation_timestamp: String,
    /// Degrees Celsius.
    pub temperature: Option<f64>,
    /// km/h.
    pub wind_speed: Option<f64>,
    /// Percent.
    pub humidity: Option<f64>,
}
