//! Runtime configuration for the sync binary.
//!
//! Two sources, same shape: a TOML file (`--config FILE`) or the process
//! environment (after `.env` is loaded). Everything except the database URL has a
//! default.
//!
//! ```toml
//! database_url = "sqlite://weather.db"
//! lookback_days = 7
//! resume_from_cursor = true
//!
//! [api]
//! base_url = "https://api.weather.gov"
//! timeout_secs = 30
//! user_agent = "weather-sync/0.1 (ops@example.com)"
//! ```

use std::path::Path;
use std::time::Duration as StdDuration;

use anyhow::Context;
use serde::Deserialize;
use shared_utils::env::{get_env_var, get_env_var_opt, parse_env_var};
use weather_ingestor::providers::nws_rest::NwsSettings;

use crate::pipeline::RunOptions;

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// User-Agent sent with every request.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let nws = NwsSettings::default();
        Self {
            base_url: nws.base_url,
            timeout_secs: nws.timeout.as_secs(),
            user_agent: nws.user_agent,
        }
    }
}

/// Everything a sync run needs besides the station identifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SyncConfig {
    /// SQLite location: `sqlite://path`, `sqlite:path` or a bare path.
    pub database_url: String,
    /// Provider transport settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Observation look-back when the station has no cursor.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    /// Resume from the station cursor when present.
    #[serde(default = "default_resume")]
    pub resume_from_cursor: bool,
}

fn default_lookback_days() -> u32 {
    7
}

fn default_resume() -> bool {
    true
}

impl SyncConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let cfg: SyncConfig = toml::from_str(s).context("invalid sync config")?;
        cfg.validate()
    }

    /// Read and parse a TOML file.
    pub fn load_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&raw)
    }

    /// Build from `DATABASE_URL` and the optional `WEATHER_*` variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut api = ApiConfig::default();
        if let Some(url) = get_env_var_opt("WEATHER_API_BASE_URL") {
            api.base_url = url;
        }
        if let Some(secs) = parse_env_var::<u64>("WEATHER_API_TIMEOUT_SECS")? {
            api.timeout_secs = secs;
        }
        if let Some(ua) = get_env_var_opt("WEATHER_API_USER_AGENT") {
            api.user_agent = ua;
        }

        SyncConfig {
            database_url: get_env_var("DATABASE_URL")?,
            api,
            lookback_days: parse_env_var("WEATHER_LOOKBACK_DAYS")?.unwrap_or_else(default_lookback_days),
            resume_from_cursor: default_resume(),
        }
        .validate()
    }

    fn validate(self) -> anyhow::Result<Self> {
        anyhow::ensure!(!self.database_url.trim().is_empty(), "database_url is empty");
        anyhow::ensure!(self.lookback_days > 0, "lookback_days must be at least 1");
        anyhow::ensure!(self.api.timeout_secs > 0, "api.timeout_secs must be at least 1");
        Ok(self)
    }

    /// Pipeline options derived from this config.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            lookback: chrono::Duration::days(i64::from(self.lookback_days)),
            resume_from_cursor: self.resume_from_cursor,
        }
    }

    /// Provider transport settings derived from this config.
    pub fn nws_settings(&self) -> NwsSettings {
        NwsSettings {
            base_url: self.api.base_url.trim_end_matches('/').to_string(),
            timeout: StdDuration::from_secs(self.api.timeout_secs),
            user_agent: self.api.user_agent.clone(),
        }
    }
}
