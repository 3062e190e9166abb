//! Station dimension reconciliation.
//!
//! `dim_station` is a type-1 slowly changing dimension: one row per natural key,
//! attributes overwritten in place, no history. The reconciler never touches
//! `station_sk` once assigned and never touches the observation cursor.

pub mod repo;

use chrono::{DateTime, Utc};

pub use repo::upsert_station;

/// The dimension row as seen by the rest of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedStation {
    /// Surrogate key of the station.
    pub station_sk: i32,
    /// Latest observation already merged for this station, if any.
    pub last_observation_at: Option<DateTime<Utc>>,
}
