//! Fact merging for `fact_observation`.
//!
//! A batch is merged in one immediate transaction: either every observation in it
//! lands (inserted or overwritten on its `(station_sk, observation_timestamp)` key)
//! and the station cursor moves forward, or nothing changes at all.

pub mod merge;

use chrono::{DateTime, Utc};

pub use merge::merge_observations;

/// What a merge did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Upserts executed; a key written twice in one batch counts twice.
    pub rows_written: usize,
    /// Newest timestamp in the batch, if the batch was non-empty.
    pub latest_timestamp: Option<DateTime<Utc>>,
}
