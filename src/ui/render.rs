//! Readout rendering

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    state::{CountdownState, DurationSelection},
    utils::format_remaining,
};

/// How state changes are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Text,
    /// One JSON snapshot per line
    Json,
}

/// A single state change, as written in JSON output mode
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub remaining_seconds: u64,
    pub is_running: bool,
    pub readout: String,
    pub selection: DurationSelection,
    pub timestamp: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(state: CountdownState, selection: DurationSelection) -> Self {
        Self {
            remaining_seconds: state.remaining_seconds,
            is_running: state.is_running,
            readout: format_remaining(state.remaining_seconds).to_string(),
            selection,
            timestamp: Utc::now(),
        }
    }
}

/// The readout while running, the dial selection while idle
pub fn render_state(state: &CountdownState, selection: &DurationSelection) -> String {
    if state.is_running {
        format!("  {}", format_remaining(state.remaining_seconds))
    } else {
        format!("Set: {}   (Enter to start)", selection)
    }
}

pub fn render_json(state: &CountdownState, selection: &DurationSelection) -> serde_json::Result<String> {
    serde_json::to_string(&Snapshot::new(*state, *selection))
}
