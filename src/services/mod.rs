//! Platform service module
//! 
//! This module contains the tick scheduler, vibration, audio and alert
//! services the countdown depends on, with terminal implementations.

pub mod alert;
pub mod audio;
pub mod scheduler;
pub mod vibration;

// Re-export main types
pub use alert::{Acknowledgement, AlertButton, AlertPresenter, CompletionAlert};
pub use audio::{AssetAudioPlayer, AudioError, AudioPlayer, PlaybackCallback, Sound};
pub use scheduler::{ManualScheduler, TickCallback, TickHandle, TickScheduler, TokioScheduler};
pub use vibration::{TerminalVibrator, VibrationPattern, Vibrator};
