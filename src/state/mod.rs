//! State management module
//! 
//! This module contains the countdown state published to observers and the
//! pending duration selection.

pub mod countdown_state;
pub mod selection;

// Re-export main types
pub use countdown_state::{CountdownState, DEFAULT_REMAINING_SECONDS};
pub use selection::{DurationSelection, SelectionError, SelectionField};
