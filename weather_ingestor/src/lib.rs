//! Client side of the weather sync: fetches station metadata and recent
//! observations from a weather provider and hands back typed, unit-checked
//! records.
//!
//! - [`providers::WeatherProvider`] is the seam the sync pipeline depends on.
//! - [`providers::nws_rest::NwsProvider`] talks to the api.weather.gov REST API.
//! - [`models`] holds the provider-agnostic record types.

pub mod models;
pub mod providers;
