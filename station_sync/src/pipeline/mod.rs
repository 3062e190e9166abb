//! One station run, as an explicit state machine.
//!
//! ```text
//! Init -> FetchStation -> ReconcileStation -> FetchObservations -> MergeFacts -> Done
//!            \________________\____________________\__________________\-> Failed
//! ```
//!
//! Steps run strictly in order. The first error moves the run to
//! [`RunState::Failed`] and is returned unchanged; nothing is retried and nothing
//! committed by an earlier step is undone. A failure while fetching the station
//! therefore leaves both tables untouched, and a failure during the merge leaves
//! the reconciled station row but no facts from the batch.
//!
//! All run state lives in [`RunContext`]; there is no process-wide state, so
//! separate runs (one connection each) may proceed concurrently.

mod window;

use chrono::{DateTime, Utc};
use diesel::SqliteConnection;
use tracing::{debug, info, warn};
use weather_ingestor::models::observation::ObservationWindow;
use weather_ingestor::providers::WeatherProvider;

use crate::error::SyncError;
use crate::observation::merge_observations;
use crate::station::upsert_station;

pub use window::RunOptions;

/// Where a run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Created, nothing done yet.
    Init,
    /// Fetching station metadata.
    FetchStation,
    /// Upserting the station dimension row.
    ReconcileStation,
    /// Fetching the observation page.
    FetchObservations,
    /// Merging facts and advancing the cursor.
    MergeFacts,
    /// Finished successfully.
    Done,
    /// Aborted; see [`RunContext::failed_at`].
    Failed,
}

impl RunState {
    /// The successor on the happy path; `None` for terminal states.
    pub fn next(self) -> Option<RunState> {
        use RunState::*;
        match self {
            Init => Some(FetchStation),
            FetchStation => Some(ReconcileStation),
            ReconcileStation => Some(FetchObservations),
            FetchObservations => Some(MergeFacts),
            MergeFacts => Some(Done),
            Done | Failed => None,
        }
    }
}

/// What a run accomplished so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Surrogate key, once the station is reconciled.
    pub station_sk: Option<i32>,
    /// Window that was requested from the provider.
    pub window: Option<ObservationWindow>,
    /// Observations in the fetched page.
    pub observations_fetched: usize,
    /// Fact rows inserted or overwritten.
    pub rows_written: usize,
    /// Newest observation timestamp merged in this run.
    pub latest_timestamp: Option<DateTime<Utc>>,
}

/// Everything a single run carries between steps.
pub struct RunContext<'c> {
    station_id: String,
    conn: &'c mut SqliteConnection,
    now: DateTime<Utc>,
    state: RunState,
    failed_at: Option<RunState>,
    report: RunReport,
}

impl<'c> RunContext<'c> {
    /// A fresh run for `station_id`, evaluated as of `now`.
    pub fn new(station_id: impl Into<String>, conn: &'c mut SqliteConnection, now: DateTime<Utc>) -> Self {
        Self {
            station_id: station_id.into(),
            conn,
            now,
            state: RunState::Init,
            failed_at: None,
            report: RunReport::default(),
        }
    }

    /// Station natural identifier this run is for.
    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    /// Current state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The step that failed, once the run is [`RunState::Failed`].
    pub fn failed_at(&self) -> Option<RunState> {
        self.failed_at
    }

    /// Progress accumulated so far.
    pub fn report(&self) -> &RunReport {
        &self.report
    }

    fn advance(&mut self) {
        if let Some(next) = self.state.next() {
            debug!(station_id = %self.station_id, from = ?self.state, to = ?next, "state");
            self.state = next;
        }
    }

    fn fail(&mut self) {
        self.failed_at = Some(self.state);
        self.state = RunState::Failed;
    }
}

/// Run the full pipeline for the station in `ctx`.
///
/// A context is single use. Calling this on one that is not in [`RunState::Init`]
/// returns [`SyncError::ContextReused`] and leaves the context as it was. Otherwise
/// returns the final report on success; on error, `ctx` is left in
/// [`RunState::Failed`] with [`RunContext::failed_at`] naming the step.
pub async fn run_station<P>(
    provider: &P,
    ctx: &mut RunContext<'_>,
    opts: &RunOptions,
) -> Result<RunReport, SyncError>
where
    P: WeatherProvider + ?Sized + Sync,
{
    // single use: a finished or interrupted context is never re-driven
    if ctx.state != RunState::Init {
        return Err(SyncError::ContextReused {
            station_id: ctx.station_id.clone(),
            state: ctx.state,
        });
    }

    match drive(provider, ctx, opts).await {
        Ok(()) => {
            info!(
                station_id = %ctx.station_id,
                station_sk = ?ctx.report.station_sk,
                fetched = ctx.report.observations_fetched,
                rows = ctx.report.rows_written,
                "station run complete"
            );
            Ok(ctx.report.clone())
        }
        Err(e) => {
            ctx.fail();
            warn!(station_id = %ctx.station_id, failed_at = ?ctx.failed_at, error = %e, "station run failed");
            Err(e)
        }
    }
}

async fn drive<P>(provider: &P, ctx: &mut RunContext<'_>, opts: &RunOptions) -> Result<(), SyncError>
where
    P: WeatherProvider + ?Sized + Sync,
{
    ctx.advance(); // FetchStation
    let meta = provider.fetch_station_metadata(&ctx.station_id).await?;

    ctx.advance(); // ReconcileStation
    let station = upsert_station(ctx.conn, &meta)?;
    ctx.report.station_sk = Some(station.station_sk);

    ctx.advance(); // FetchObservations
    let window = opts.window_for(station.last_observation_at, ctx.now);
    ctx.report.window = Some(window);
    let batch = provider
        .fetch_latest_observations(&ctx.station_id, window)
        .await?;
    ctx.report.observations_fetched = batch.len();
    debug!(station_id = batch.station_id(), observations = batch.len(), %window.start, "observations fetched");

    ctx.advance(); // MergeFacts
    let outcome = merge_observations(ctx.conn, station.station_sk, batch.iter())?;
    ctx.report.rows_written = outcome.rows_written;
    ctx.report.latest_timestamp = outcome.latest_timestamp;

    ctx.advance(); // Done
    Ok(())
}
