use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, header};
use tracing::debug;

use crate::{
    models::{
        observation::{ObservationBatch, ObservationWindow},
        station::StationMetadata,
    },
    providers::{
        ProviderError, ProviderInitError, WeatherProvider,
        nws_rest::{
            params::construct_params,
            response::{NwsObservationsResponse, NwsStationResponse},
        },
    },
};

/// Public api.weather.gov endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.weather.gov";

/// Transport settings for [`NwsProvider`].
#[derive(Debug, Clone)]
pub struct NwsSettings {
    /// API root, without a trailing slash.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// api.weather.gov rejects requests without a User-Agent.
    pub user_agent: String,
}

impl Default for NwsSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("weather-sync/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

pub struct NwsProvider {
    client: Client,
    base_url: String,
}

impl NwsProvider {
    /// Creates a new api.weather.gov provider.
    pub fn new(settings: NwsSettings) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&settings.user_agent)?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/geo+json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn station_url(&self, station_id: &str) -> String {
        format!("{}/stations/{}", self.base_url, station_id)
    }
}

/// Map a transport-level reqwest failure onto the provider taxonomy.
fn request_error(err: reqwest::Error) -> ProviderError {
    if err.is_decode() {
        ProviderError::InvalidPayload(err.to_string())
    } else {
        ProviderError::Transient {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Classify a non-success status. Returns `None` for 2xx.
pub(crate) fn status_error(status: StatusCode, station_id: &str, body: String) -> Option<ProviderError> {
    if status.is_success() {
        None
    } else if status == StatusCode::NOT_FOUND {
        Some(ProviderError::NotFound {
            station_id: station_id.to_string(),
        })
    } else if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        Some(ProviderError::Transient {
            status: Some(status.as_u16()),
            message: body,
        })
    } else {
        Some(ProviderError::Api {
            status: status.as_u16(),
            message: body,
        })
    }
}

async fn check_status(response: Response, station_id: &str) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown API error".to_string());
    Err(status_error(status, station_id, body).unwrap_or(ProviderError::Api {
        status: status.as_u16(),
        message: "unexpected status".to_string(),
    }))
}

#[async_trait]
impl WeatherProvider for NwsProvider {
    async fn fetch_station_metadata(
        &self,
        station_id: &str,
    ) -> Result<StationMetadata, ProviderError> {
        let url = self.station_url(station_id);
        debug!(%url, "fetching station metadata");

        let response = self.client.get(&url).send().await.map_err(request_error)?;
        let response = check_status(response, station_id).await?;
        let payload = response
            .json::<NwsStationResponse>()
            .await
            .map_err(request_error)?;

        StationMetadata::try_from(payload)
    }

    async fn fetch_latest_observations(
        &self,
        station_id: &str,
        window: ObservationWindow,
    ) -> Result<ObservationBatch, ProviderError> {
        let url = format!("{}/observations", self.station_url(station_id));
        debug!(%url, start = %window.start, end = %window.end, "fetching observations");

        let response = self
            .client
            .get(&url)
            .query(&construct_params(&window))
            .send()
            .await
            .map_err(request_error)?;
        let response = check_status(response, station_id).await?;
        let payload = response
            .json::<NwsObservationsResponse>()
            .await
            .map_err(request_error)?;

        Ok(ObservationBatch::new(station_id, payload.into_raw()?))
    }
}
