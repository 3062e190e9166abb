//! Error types for the sync core.
//!
//! Provider failures pass through unchanged inside [`SyncError::Provider`];
//! everything raised by the storage layer is a [`PersistenceError`].

use thiserror::Error;
use weather_ingestor::providers::ProviderError;

use crate::pipeline::RunState;

/// Storage-layer failures: constraint violations, connectivity, bad stored data.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// A query failed (including constraint violations).
    #[error("database query failed: {0}")]
    Query(#[from] diesel::result::Error),

    /// The database could not be opened.
    #[error("database connection failed: {0}")]
    Connection(#[from] diesel::ConnectionError),

    /// A stored timestamp is not RFC 3339.
    #[error("stored timestamp is not RFC 3339: {0:?}")]
    Timestamp(String),
}

/// Any failure that aborts a station run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Raised by the weather provider; surfaced as-is.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Raised by the storage layer.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// A run context was driven a second time.
    #[error("run context for {station_id} is already {state:?}; start a new run")]
    ContextReused {
        /// Station the context was created for.
        station_id: String,
        /// State the context was found in.
        state: RunState,
    },
}

impl From<diesel::result::Error> for SyncError {
    fn from(e: diesel::result::Error) -> Self {
        SyncError::Persistence(PersistenceError::Query(e))
    }
}
