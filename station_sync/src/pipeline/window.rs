//! Run options and the observation-window policy.

use chrono::{DateTime, Duration, Utc};
use weather_ingestor::models::observation::ObservationWindow;

/// Tunables for a station run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Window requested when there is no usable cursor.
    pub lookback: Duration,
    /// Start from just after the station's cursor when it has one.
    pub resume_from_cursor: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            lookback: Duration::days(7),
            resume_from_cursor: true,
        }
    }
}

impl RunOptions {
    /// Window for a station whose cursor is `cursor`, evaluated at `now`.
    ///
    /// A cursor at or ahead of `now` (clock skew, replayed data) is ignored.
    pub fn window_for(&self, cursor: Option<DateTime<Utc>>, now: DateTime<Utc>) -> ObservationWindow {
        match cursor {
            Some(c) if self.resume_from_cursor && c + Duration::seconds(1) <= now => {
                ObservationWindow::after(c, now)
            }
            _ => ObservationWindow::lookback(now, self.lookback),
        }
    }
}
