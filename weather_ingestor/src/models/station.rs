//! Descriptive station attributes as reported by a provider.

/// Station metadata returned by [`WeatherProvider::fetch_station_metadata`](crate::providers::WeatherProvider::fetch_station_metadata).
///
/// Every descriptive attribute is optional: providers omit them for some
/// stations and the dimension row simply stores `NULL`.
#[derive(Debug, Clone, PartialEq)]
pub struct StationMetadata {
    /// Provider station code (natural identifier), e.g. "KBOS" or "0007W".
    pub station_id: String,
    /// Display name.
    pub name: Option<String>,
    /// IANA time zone name, e.g. "America/Denver".
    pub timezone: Option<String>,
    /// WGS84 latitude.
    pub latitude: Option<f64>,
    /// WGS84 longitude.
    pub longitude: Option<f64>,
}
