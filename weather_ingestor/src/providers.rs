//! Provider abstraction for weather data sources.
//!
//! This module defines the [`WeatherProvider`] trait, the unified interface the
//! sync pipeline uses to fetch station metadata and recent observations.
//! Concrete providers (currently [`nws_rest::NwsProvider`]) handle the
//! vendor-specific HTTP and payload details.
//!
//! Providers perform no retries: a failed call returns immediately with a
//! [`ProviderError`] and retry policy is left to whoever runs the pipeline.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use weather_ingestor::models::{
//!     observation::{ObservationBatch, ObservationWindow},
//!     station::StationMetadata,
//! };
//! use weather_ingestor::providers::{ProviderError, WeatherProvider};
//!
//! struct Offline;
//!
//! #[async_trait]
//! impl WeatherProvider for Offline {
//!     async fn fetch_station_metadata(
//!         &self,
//!         station_id: &str,
//!     ) -> Result<StationMetadata, ProviderError> {
//!         Err(ProviderError::NotFound { station_id: station_id.to_string() })
//!     }
//!
//!     async fn fetch_latest_observations(
//!         &self,
//!         station_id: &str,
//!         _window: ObservationWindow,
//!     ) -> Result<ObservationBatch, ProviderError> {
//!         Ok(ObservationBatch::new(station_id, vec![]))
//!     }
//! }
//! ```

pub mod errors;
pub mod nws_rest;

use async_trait::async_trait;

pub use errors::{ProviderError, ProviderInitError};

use crate::models::{
    observation::{ObservationBatch, ObservationWindow},
    station::StationMetadata,
};

/// Trait for fetching station data from a weather provider.
#[async_trait]
pub trait WeatherProvider {
    /// Fetch descriptive attributes for one station.
    ///
    /// Fails with [`ProviderError::NotFound`] when the provider does not know
    /// the station, and [`ProviderError::Transient`] on network or 5xx failures.
    async fn fetch_station_metadata(&self, station_id: &str)
    -> Result<StationMetadata, ProviderError>;

    /// Fetch the recent observations for one station within `window`.
    ///
    /// The returned batch validates units lazily as it is iterated.
    async fn fetch_latest_observations(
        &self,
        station_id: &str,
        window: ObservationWindow,
    ) -> Result<ObservationBatch, ProviderError>;
}
