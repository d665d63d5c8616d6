//! Render task: redraws the console on every countdown state change

use std::io::Write;
use tracing::{error, info};

use crate::{
    engine::CountdownEngine,
    ui::{render_json, render_state, OutputMode},
};

/// Print the current state, then every change published by the engine.
///
/// Only a weak handle is kept, so the task ends once the engine is dropped.
pub async fn render_task(engine: CountdownEngine, mode: OutputMode) {
    info!("Starting render task ({:?} output)", mode);

    let mut state_rx = engine.subscribe();
    let engine = engine.downgrade();

    loop {
        let state = *state_rx.borrow_and_update();
        let Some(selection) = engine.upgrade().map(|engine| engine.selection()) else {
            break;
        };

        let line = match mode {
            OutputMode::Text => Some(render_state(&state, &selection)),
            OutputMode::Json => render_json(&state, &selection)
                .map_err(|e| error!("Failed to serialize snapshot: {}", e))
                .ok(),
        };

        if let Some(line) = line {
            let mut out = std::io::stdout();
            if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
                error!("Failed to write to stdout: {}", e);
                break;
            }
        }

        if state_rx.changed().await.is_err() {
            break;
        }
    }

    info!("Countdown engine closed, stopping render task");
}
