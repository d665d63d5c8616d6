//! Countdown Timer - a single-screen countdown with vibration, sound and alert
//! 
//! This library provides the countdown state machine, the completion
//! notifier, the platform services they drive and a console front end.

pub mod config;
pub mod engine;
pub mod services;
pub mod state;
pub mod tasks;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{CompletionNotifier, CountdownEngine};
pub use state::{CountdownState, DurationSelection};
pub use utils::{format_remaining, shutdown_signal};
