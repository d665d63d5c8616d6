//! Countdown Timer - a single-screen countdown with vibration, sound and alert
//! 
//! This is the main entry point for the countdown-timer application.

use std::sync::Arc;
use tracing::{error, info};

use countdown_timer::{
    config::Config,
    engine::{CompletionNotifier, CountdownEngine},
    services::{AssetAudioPlayer, TerminalVibrator, TokioScheduler},
    tasks::{input_task, render_task, spawn_stdin_reader},
    ui::{ConsoleAlertPresenter, PendingAlert, HELP},
    utils::shutdown_signal,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so the readout owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting countdown-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: selection={}:{}:{}, assets={}, json={}",
          config.hours, config.minutes, config.seconds,
          config.assets_dir.display(), config.json);

    let selection = config.initial_selection()?;
    let pending = PendingAlert::new();

    let notifier = CompletionNotifier::new(
        Arc::new(TerminalVibrator::new()?),
        Arc::new(AssetAudioPlayer::new(&config.assets_dir)),
        Arc::new(ConsoleAlertPresenter::new(pending.clone())),
    );
    let engine = CountdownEngine::new(selection, Arc::new(TokioScheduler::new()?), notifier);

    println!("{}", HELP);
    let lines = spawn_stdin_reader()?;
    let render = tokio::spawn(render_task(engine.clone(), config.output_mode()));

    tokio::select! {
        result = input_task(engine.clone(), pending, lines) => {
            if let Err(e) = result {
                error!("Input error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => error!("Failed to listen for signals: {}", e),
            }
        }
    }

    render.abort();
    if engine.is_running() {
        info!("Discarding running countdown");
    }
    drop(engine);

    info!("Countdown timer shutdown complete");
    Ok(())
}
