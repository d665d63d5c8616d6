//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::{
    state::{DurationSelection, SelectionError},
    ui::OutputMode,
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-timer")]
#[command(about = "A countdown timer that vibrates, rings and alerts when time is up")]
#[command(version)]
pub struct Config {
    /// Initial hours on the dial (0-23)
    #[arg(short = 'H', long, default_value = "0")]
    pub hours: u32,

    /// Initial minutes on the dial (0-59)
    #[arg(short, long, default_value = "0")]
    pub minutes: u32,

    /// Initial seconds on the dial (0-59)
    #[arg(short, long, default_value = "10")]
    pub seconds: u32,

    /// Directory holding the alert sound
    #[arg(long, default_value = "assets")]
    pub assets_dir: PathBuf,

    /// Print one JSON snapshot per state change instead of the readout
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Dial selection to start with
    pub fn initial_selection(&self) -> Result<DurationSelection, SelectionError> {
        DurationSelection::new(self.hours, self.minutes, self.seconds)
    }

    pub fn output_mode(&self) -> OutputMode {
        if self.json { OutputMode::Json } else { OutputMode::Text }
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
