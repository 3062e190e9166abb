use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use station_sync::config::SyncConfig;
use station_sync::db::{connection, migrate};
use station_sync::insights;
use station_sync::pipeline::{RunContext, run_station};
use tracing_subscriber::EnvFilter;
use weather_ingestor::providers::nws_rest::NwsProvider;

const DEFAULT_LOG_FILTER: &str = "weather_sync=info,station_sync=info,weather_ingestor=info";

#[derive(Parser)]
#[command(version, about = "Sync one weather station into the local star schema")]
struct Cli {
    /// Station natural identifier, e.g. 0007W or KBOS.
    #[arg(long, value_name = "ID")]
    station_id: String,

    /// TOML config; when absent, configuration comes from the environment.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "weather sync failed");
        return Err(e);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    // 1) Config
    let cfg = match &cli.config {
        Some(path) => SyncConfig::load_path(path)?,
        None => SyncConfig::from_env()?,
    };

    // 2) Schema + connection
    migrate::run_all(&cfg.database_url)?;
    let mut conn = connection::connect_sqlite(&cfg.database_url)?;

    // 3) One station run
    let provider = NwsProvider::new(cfg.nws_settings()).context("building weather API client")?;
    let now = Utc::now();
    let mut ctx = RunContext::new(cli.station_id.as_str(), &mut conn, now);
    let report = run_station(&provider, &mut ctx, &cfg.run_options()).await?;
    drop(ctx);

    // 4) Insights over the committed data
    let avg = insights::avg_temperature_last_week(&mut conn, &cli.station_id, now)?;
    let wind = insights::max_wind_speed_change(&mut conn, &cli.station_id, now)?;
    tracing::info!(
        station_id = %cli.station_id,
        rows = report.rows_written,
        avg_temperature_last_week = ?avg,
        max_wind_speed_change = ?wind,
        "insights"
    );

    Ok(())
}
