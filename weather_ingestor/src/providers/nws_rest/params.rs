use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::observation::ObservationWindow;

fn fmt_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Query parameters for the observations endpoint.
pub fn construct_params(window: &ObservationWindow) -> Vec<(String, String)> {
    vec![
        ("start".to_string(), fmt_ts(window.start)),
        ("end".to_string(), fmt_ts(window.end)),
    ]
}
