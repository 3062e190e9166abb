use serde::Deserialize;
use tracing::warn;

use crate::models::{observation::RawObservation, station::StationMetadata};
use crate::providers::ProviderError;

/// `GET /stations/{id}` (GeoJSON Feature).
#[derive(Deserialize, Debug)]
pub struct NwsStationResponse {
    #[serde(default)]
    pub geometry: Option<NwsGeometry>,
    #[serde(default)]
    pub properties: Option<NwsStationProperties>,
}

#[derive(Deserialize, Debug, Default)]
pub struct NwsGeometry {
    /// GeoJSON order: `[longitude, latitude]`.
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NwsStationProperties {
    pub station_identifier: Option<String>,
    pub name: Option<String>,
    pub time_zone: Option<String>,
}

/// `GET /stations/{id}/observations` (GeoJSON FeatureCollection).
#[derive(Deserialize, Debug)]
pub struct NwsObservationsResponse {
    #[serde(default)]
    pub features: Vec<NwsObservationFeature>,
}

#[derive(Deserialize, Debug)]
pub struct NwsObservationFeature {
    pub properties: Option<RawObservation>,
}

impl TryFrom<NwsStationResponse> for StationMetadata {
    type Error = ProviderError;

    fn try_from(resp: NwsStationResponse) -> Result<Self, Self::Error> {
        let props = resp
            .properties
            .ok_or_else(|| ProviderError::InvalidPayload("station is missing 'properties'".into()))?;
        let station_id = props
            .station_identifier
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                ProviderError::InvalidPayload("station is missing 'stationIdentifier'".into())
            })?;

        if props.name.is_none() || props.time_zone.is_none() {
            warn!(station_id = %station_id, "optional field 'name' or 'timeZone' is missing");
        }

        let coords = resp.geometry.unwrap_or_default().coordinates;
        let (longitude, latitude) = match coords.as_slice() {
            [lon, lat, ..] => (Some(*lon), Some(*lat)),
            _ => {
                warn!(station_id = %station_id, "coordinates are missing or incomplete");
                (None, None)
            }
        };

        Ok(StationMetadata {
            station_id,
            name: props.name,
            timezone: props.time_zone,
            latitude,
            longitude,
        })
    }
}

impl NwsObservationsResponse {
    /// Unwrap the per-feature `properties`, failing on features without them.
    pub fn into_raw(self) -> Result<Vec<RawObservation>, ProviderError> {
        self.features
            .into_iter()
            .map(|f| {
                f.properties.ok_or_else(|| {
                    ProviderError::InvalidPayload("observation is missing 'properties'".into())
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::observation::ObservationBatch;

    const STATION: &str = r#"{
        "id": "https://api.weather.gov/stations/0007W",
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [-105.0, 40.0] },
        "properties": {
            "stationIdentifier": "0007W",
            "name": "Test Point",
            "timeZone": "America/Denver",
            "elevation": { "unitCode": "wmoUnit:m", "value": 1600.0 }
        }
    }"#;

    const OBSERVATIONS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "properties": {
                "timestamp": "2024-05-01T12:00:00+00:00",
                "temperature": { "unitCode": "wmoUnit:degC", "value": 12.2, "qualityControl": "V" },
                "windSpeed": { "unitCode": "wmoUnit:km_h-1", "value": null, "qualityControl": "Z" },
                "relativeHumidity": { "unitCode": "wmoUnit:percent", "value": 41.123 }
            } }
        ]
    }"#;

    #[test]
    fn station_payload_maps_lon_lat_order() {
        let resp: NwsStationResponse = serde_json::from_str(STATION).unwrap();
        let meta = StationMetadata::try_from(resp).unwrap();
        assert_eq!(meta.station_id, "0007W");
        assert_eq!(meta.name.as_deref(), Some("Test Point"));
        assert_eq!(meta.timezone.as_deref(), Some("America/Denver"));
        assert_eq!(meta.latitude, Some(40.0));
        assert_eq!(meta.longitude, Some(-105.0));
    }

    #[test]
    fn station_without_geometry_has_null_coordinates() {
        let resp: NwsStationResponse = serde_json::from_str(
            r#"{ "properties": { "stationIdentifier": "0007W" } }"#,
        )
        .unwrap();
        let meta = StationMetadata::try_from(resp).unwrap();
        assert_eq!(meta.latitude, None);
        assert_eq!(meta.longitude, None);
        assert_eq!(meta.name, None);
    }

    #[test]
    fn station_without_identifier_is_invalid() {
        let resp: NwsStationResponse =
            serde_json::from_str(r#"{ "properties": { "name": "Nameless" } }"#).unwrap();
        assert!(matches!(
            StationMetadata::try_from(resp),
            Err(ProviderError::InvalidPayload(_))
        ));
    }

    #[test]
    fn observation_payload_keeps_null_wind_speed() {
        let resp: NwsObservationsResponse = serde_json::from_str(OBSERVATIONS).unwrap();
        let batch = ObservationBatch::new("0007W", resp.into_raw().unwrap());
        let recs: Vec<_> = batch.iter().collect::<Result<_, _>>().unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].temperature_c, Some(12.2));
        assert_eq!(recs[0].wind_speed_kmh, None);
        assert_eq!(recs[0].humidity_pct, Some(41.12));
    }

    #[test]
    fn missing_features_is_an_empty_page() {
        let resp: NwsObservationsResponse = serde_json::from_str(r#"{ "type": "FeatureCollection" }"#).unwrap();
        assert!(resp.into_raw().unwrap().is_empty());
    }
}
