//! Background tasks module
//! 
//! This module contains the console loops that run alongside the countdown.

pub mod input;
pub mod render;

// Re-export main functions
pub use input::{input_task, spawn_stdin_reader};
pub use render::render_task;
