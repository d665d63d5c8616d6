//! Countdown state structure

use serde::Serialize;

/// Remaining seconds shown while idle, and restored by every stop.
pub const DEFAULT_REMAINING_SECONDS: u64 = 5;

/// Countdown state published to observers on every change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountdownState {
    pub remaining_seconds: u64,
    pub is_running: bool,
}

impl CountdownState {
    /// Create the idle state with the default remaining seconds
    pub fn new() -> Self {
        Self {
            remaining_seconds: DEFAULT_REMAINING_SECONDS,
            is_running: false,
        }
    }

    /// Create a running state seeded with remaining seconds
    pub fn running(remaining_seconds: u64) -> Self {
        Self {
            remaining_seconds,
            is_running: true,
        }
    }

    /// Check if the countdown is running
    pub fn is_running(&self) -> bool {
        self.is_running
    }
}

impl Default for CountdownState {
    fn default() -> Self {
        Self::new()
    }
}
