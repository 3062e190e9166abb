use thiserror::Error;

/// Errors that can occur within a [`WeatherProvider`](super::WeatherProvider) implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider has no station with this identifier (HTTP 404).
    #[error("station not found: {station_id}")]
    NotFound {
        /// The identifier that was requested.
        station_id: String,
    },

    /// Network failure, timeout or 5xx response. Fatal to the current run.
    #[error("transient provider failure: {message}")]
    Transient {
        /// HTTP status, when the server answered at all.
        status: Option<u16>,
        /// Error detail.
        message: String,
    },

    /// A measurement carried a unit outside the recognized set.
    #[error("unsupported unit {unit:?} for {field}")]
    UnsupportedUnit {
        /// Field the unit was attached to.
        field: &'static str,
        /// The unit token as received.
        unit: String,
    },

    /// The provider rejected the request (non-404 4xx).
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status.
        status: u16,
        /// Response body, or a placeholder when it could not be read.
        message: String,
    },

    /// The response could not be decoded or lacked a mandatory field.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Error)]
pub enum ProviderInitError {
    /// Failed to build the reqwest client.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    /// The configured User-Agent is not a valid header value.
    #[error("Invalid User-Agent header: {0}")]
    InvalidUserAgent(#[from] reqwest::header::InvalidHeaderValue),
}
