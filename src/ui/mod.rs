//! Console presentation module
//! 
//! This module contains command parsing, the modal alert presenter and the
//! readout rendering used by the terminal front end.

pub mod alert;
pub mod commands;
pub mod controller;
pub mod render;

// Re-export main types
pub use alert::{ConsoleAlertPresenter, PendingAlert};
pub use commands::{Command, CommandError, HELP};
pub use controller::{handle_command, Outcome};
pub use render::{render_json, render_state, OutputMode, Snapshot};
