use thiserror::Error;

/// Errors related to application configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// An environment variable required by the application is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable is set but its value could not be parsed.
    #[error("Invalid value for environment variable {name}: {value:?}")]
    InvalidEnvVar {
        /// Name of the offending variable.
        name: String,
        /// The raw value that failed to parse.
        value: String,
    },
}
