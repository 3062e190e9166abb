#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Text};
use station_sync::db::{connection, migrate};
use tempfile::TempDir;
use weather_ingestor::models::observation::{ObservationBatch, ObservationWindow, RawObservation};
use weather_ingestor::models::station::StationMetadata;
use weather_ingestor::models::units::Quantity;
use weather_ingestor::providers::{ProviderError, WeatherProvider};

#[derive(QueryableByName)]
struct JournalMode {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}
#[derive(QueryableByName)]
struct ForeignKeys {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}
#[derive(QueryableByName)]
struct BusyTimeout {
    #[diesel(sql_type = Integer, column_name = "timeout")]
    busy_timeout: i32,
}
#[derive(QueryableByName)]
struct Count {
    #[diesel(sql_type = BigInt)]
    n: i64,
}
#[derive(QueryableByName)]
struct FkViolation {
    #[diesel(sql_type = Text)]
    table: String,
}

pub struct TestDb {
    _dir: TempDir,    // keep alive for the life of the test
    pub path: String, // <tmpdir>/test.db
}

pub fn setup_db() -> (TestDb, SqliteConnection) {
    let dir = TempDir::new().expect("tempdir");
    let mut p = PathBuf::from(dir.path());
    p.push("test.db");
    let path = p.to_string_lossy().to_string();

    migrate::run_all(&path).expect("migrations");

    let conn = connection::connect_sqlite(&path).expect("connect");
    (TestDb { _dir: dir, path }, conn)
}

pub fn assert_sqlite_pragmas(conn: &mut SqliteConnection) {
    use diesel::sql_query;

    let jm: JournalMode = sql_query("PRAGMA journal_mode;").get_result(conn).unwrap();
    assert_eq!(jm.journal_mode.to_lowercase(), "wal");

    let fk: ForeignKeys = sql_query("PRAGMA foreign_keys;").get_result(conn).unwrap();
    assert_eq!(fk.foreign_keys, 1);

    let bt: BusyTimeout = sql_query("PRAGMA busy_timeout;").get_result(conn).unwrap();
    assert_eq!(bt.busy_timeout, 5000);
}

pub fn count(conn: &mut SqliteConnection, table: &str) -> i64 {
    let c: Count = diesel::sql_query(format!("SELECT COUNT(*) AS n FROM {table}"))
        .get_result(conn)
        .unwrap();
    c.n
}

pub fn fk_check_empty(conn: &mut SqliteConnection) {
    let bad: Vec<FkViolation> = diesel::sql_query("PRAGMA foreign_key_check;")
        .load(conn)
        .unwrap();
    assert!(
        bad.is_empty(),
        "FK violations in: {:?}",
        bad.iter().map(|v| v.table.as_str()).collect::<Vec<_>>()
    );
}

// ---------------------------- fixtures ----------------------------

/// Thursday 2024-05-09 12:00 UTC.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 9, 12, 0, 0).unwrap()
}

pub fn meta(id: &str, name: Option<&str>, lat: Option<f64>, lon: Option<f64>) -> StationMetadata {
    StationMetadata {
        station_id: id.to_string(),
        name: name.map(str::to_string),
        timezone: None,
        latitude: lat,
        longitude: lon,
    }
}

pub fn obs(ts: &str, temp: Option<f64>, wind: Option<f64>, humidity: Option<f64>) -> RawObservation {
    RawObservation {
        timestamp: Some(ts.to_string()),
        temperature: Some(Quantity::new("wmoUnit:degC", temp)),
        wind_speed: Some(Quantity::new("wmoUnit:km_h-1", wind)),
        relative_humidity: Some(Quantity::new("wmoUnit:percent", humidity)),
    }
}

pub fn scenario_0007w_station() -> StationMetadata {
    meta("0007W", Some("Test Point"), Some(40.0), Some(-105.0))
}

/// T0, T1 (no wind reading), T2.
pub fn scenario_0007w_observations() -> Vec<RawObservation> {
    vec![
        obs("2024-05-09T09:00:00+00:00", Some(12.5), Some(8.0), Some(61.0)),
        obs("2024-05-09T10:00:00+00:00", Some(13.1), None, Some(58.0)),
        obs("2024-05-09T11:00:00+00:00", Some(14.0), Some(11.2), Some(55.5)),
    ]
}

// ---------------------------- fake provider ----------------------------

/// In-memory provider; `station: None` means the provider does not know the station.
pub struct FakeProvider {
    pub station: Option<StationMetadata>,
    pub observations: Mutex<Vec<RawObservation>>,
    /// When set, the observations call fails with a 5xx of this status.
    pub observations_status: Option<u16>,
    pub windows: Mutex<Vec<ObservationWindow>>,
}

impl FakeProvider {
    pub fn new(station: Option<StationMetadata>, observations: Vec<RawObservation>) -> Self {
        Self {
            station,
            observations: Mutex::new(observations),
            observations_status: None,
            windows: Mutex::new(Vec::new()),
        }
    }

    pub fn set_observations(&self, observations: Vec<RawObservation>) {
        *self.observations.lock().unwrap() = observations;
    }

    pub fn windows(&self) -> Vec<ObservationWindow> {
        self.windows.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn fetch_station_metadata(&self, station_id: &str) -> Result<StationMetadata, ProviderError> {
        self.station.clone().ok_or_else(|| ProviderError::NotFound {
            station_id: station_id.to_string(),
        })
    }

    async fn fetch_latest_observations(
        &self,
        station_id: &str,
        window: ObservationWindow,
    ) -> Result<ObservationBatch, ProviderError> {
        self.windows.lock().unwrap().push(window);
        if let Some(status) = self.observations_status {
            return Err(ProviderError::Transient {
                status: Some(status),
                message: "upstream unavailable".into(),
            });
        }
        let raw = self.observations.lock().unwrap().clone();
        Ok(ObservationBatch::new(station_id, raw))
    }
}
