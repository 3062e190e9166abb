//! Observation records and the lazy batch the provider hands back.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::models::units::{Quantity, Unit, reading};
use crate::providers::ProviderError;

/// One observation as it appears in the payload, before validation.
///
/// All fields are optional here; [`ObservationBatch::iter`] decides which
/// absences are fatal (the timestamp) and which are "no reading".
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawObservation {
    /// RFC 3339 timestamp of the observation.
    pub timestamp: Option<String>,
    /// Air temperature.
    pub temperature: Option<Quantity>,
    /// Sustained wind speed.
    pub wind_speed: Option<Quantity>,
    /// Relative humidity.
    pub relative_humidity: Option<Quantity>,
}

/// A validated observation in canonical units.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRecord {
    /// Observation instant (UTC).
    pub timestamp: DateTime<Utc>,
    /// Temperature in degrees Celsius.
    pub temperature_c: Option<f64>,
    /// Wind speed in km/h.
    pub wind_speed_kmh: Option<f64>,
    /// Relative humidity in percent.
    pub humidity_pct: Option<f64>,
}

impl TryFrom<&RawObservation> for ObservationRecord {
    type Error = ProviderError;

    fn try_from(raw: &RawObservation) -> Result<Self, Self::Error> {
        let ts = raw
            .timestamp
            .as_deref()
            .ok_or_else(|| ProviderError::InvalidPayload("observation is missing 'timestamp'".into()))?;
        let timestamp = DateTime::parse_from_rfc3339(ts)
            .map_err(|e| ProviderError::InvalidPayload(format!("bad observation timestamp {ts:?}: {e}")))?
            .with_timezone(&Utc);

        Ok(ObservationRecord {
            timestamp,
            temperature_c: reading(raw.temperature.as_ref(), Unit::Celsius, "temperature")?,
            wind_speed_kmh: reading(raw.wind_speed.as_ref(), Unit::KilometresPerHour, "wind_speed")?,
            humidity_pct: reading(raw.relative_humidity.as_ref(), Unit::Percent, "humidity")?,
        })
    }
}

/// Time window requested from the observations endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationWindow {
    /// Inclusive start (UTC).
    pub start: DateTime<Utc>,
    /// Inclusive end (UTC).
    pub end: DateTime<Utc>,
}

impl ObservationWindow {
    /// The `lookback` period ending at `now`.
    pub fn lookback(now: DateTime<Utc>, lookback: Duration) -> Self {
        Self {
            start: now - lookback,
            end: now,
        }
    }

    /// Everything strictly after `cursor`, up to `now`.
    pub fn after(cursor: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            start: cursor + Duration::seconds(1),
            end: now,
        }
    }
}

/// One page of observations for a station.
///
/// The batch keeps the raw payload and validates lazily: [`iter`](Self::iter)
/// yields one `Result` per observation, in payload order, and can be called
/// any number of times.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObservationBatch {
    station_id: String,
    raw: Vec<RawObservation>,
}

impl ObservationBatch {
    /// Wrap an already-fetched page.
    pub fn new(station_id: impl Into<String>, raw: Vec<RawObservation>) -> Self {
        Self {
            station_id: station_id.into(),
            raw,
        }
    }

    /// Station the page belongs to.
    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    /// Number of observations in the page.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// True when the provider returned no observations.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Validate and normalize observations one at a time.
    pub fn iter(&self) -> impl Iterator<Item = Result<ObservationRecord, ProviderError>> + '_ {
        self.raw.iter().map(ObservationRecord::try_from)
    }
}
