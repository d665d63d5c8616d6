//! Countdown engine module
//! 
//! This module contains the countdown state machine and the notifier it
//! triggers on every stop.

pub mod countdown;
pub mod notifier;

// Re-export main types
pub use countdown::{CountdownEngine, WeakCountdownEngine, TICK_PERIOD};
pub use notifier::{CompletionNotifier, ALERT_SOUND};
