//! Input task: applies commands read from stdin until quit or end of input

use std::io::{BufRead, Write};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    engine::CountdownEngine,
    ui::{handle_command, Command, Outcome, PendingAlert},
};

const LINE_BUFFER: usize = 16;

/// Read stdin lines on a dedicated thread and forward them over a channel.
///
/// The thread is detached: a blocking read never holds up shutdown. The
/// channel closes at end of input.
pub fn spawn_stdin_reader() -> anyhow::Result<mpsc::Receiver<String>> {
    let (line_tx, line_rx) = mpsc::channel(LINE_BUFFER);

    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if line_tx.blocking_send(line).is_err() {
                            debug!("Input task gone, stopping stdin reader");
                            return;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read stdin: {}", e);
                        return;
                    }
                }
            }
        })?;

    Ok(line_rx)
}

pub async fn input_task(
    engine: CountdownEngine,
    pending: PendingAlert,
    mut lines: mpsc::Receiver<String>,
) -> anyhow::Result<()> {
    info!("Starting input task");

    while let Some(line) = lines.recv().await {
        let message = match line.parse::<Command>() {
            Ok(command) => match handle_command(&engine, &pending, command) {
                Outcome::Continue(message) => message,
                Outcome::Quit => {
                    info!("Quit requested");
                    return Ok(());
                }
            },
            Err(e) => {
                debug!("Rejected input {:?}: {}", line, e);
                Some(e.to_string())
            }
        };

        if let Some(message) = message {
            let mut out = std::io::stdout();
            writeln!(out, "{}", message)?;
            out.flush()?;
        }
    }

    info!("End of input");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::{
        engine::notifier::testing::Doubles,
        services::ManualScheduler,
        state::DurationSelection,
    };

    fn engine() -> (CountdownEngine, Doubles) {
        let doubles = Doubles::new(true);
        let engine = CountdownEngine::new(
            DurationSelection::default(),
            Arc::new(ManualScheduler::new()),
            doubles.notifier(),
        );
        (engine, doubles)
    }

    #[tokio::test]
    async fn applies_lines_and_returns_on_quit() {
        let (engine, _doubles) = engine();
        let (line_tx, line_rx) = mpsc::channel(LINE_BUFFER);

        line_tx.send("m 2".to_string()).await.unwrap();
        line_tx.send("start".to_string()).await.unwrap();
        line_tx.send("quit".to_string()).await.unwrap();

        // The sender stays open: only the quit command ends the task
        tokio::time::timeout(
            Duration::from_secs(1),
            input_task(engine.clone(), PendingAlert::new(), line_rx),
        )
        .await
        .expect("input task should return on quit")
        .unwrap();

        assert_eq!(engine.selection().minutes(), 2);
        assert!(engine.is_running());
        drop(line_tx);
    }

    #[tokio::test]
    async fn returns_at_end_of_input() {
        let (engine, _doubles) = engine();
        let (line_tx, line_rx) = mpsc::channel(LINE_BUFFER);

        line_tx.send("not a command".to_string()).await.unwrap();
        drop(line_tx);

        tokio::time::timeout(
            Duration::from_secs(1),
            input_task(engine.clone(), PendingAlert::new(), line_rx),
        )
        .await
        .expect("input task should return at end of input")
        .unwrap();

        assert!(!engine.is_running());
    }
}
