//! Dispatch of console commands onto the countdown engine

use tracing::debug;

use super::{render_state, Command, PendingAlert, HELP};
use crate::engine::CountdownEngine;

/// What the input loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading, optionally printing a message first
    Continue(Option<String>),
    Quit,
}

impl Outcome {
    fn say(message: impl Into<String>) -> Self {
        Outcome::Continue(Some(message.into()))
    }

    fn quiet() -> Self {
        Outcome::Continue(None)
    }
}

/// Apply `command` to the engine.
///
/// An unanswered alert is modal: only acknowledgement, status, help and quit
/// get through until it is answered.
pub fn handle_command(engine: &CountdownEngine, pending: &PendingAlert, command: Command) -> Outcome {
    debug!("Handling command {:?}", command);

    if pending.is_pending() {
        match command {
            Command::Acknowledge(_) | Command::Status | Command::Help | Command::Quit => {}
            _ => return Outcome::say("Acknowledge the alert first: type 'ok' or 'cancel'"),
        }
    }

    match command {
        Command::Toggle => {
            if engine.is_running() {
                engine.stop();
            } else {
                engine.start();
            }
            Outcome::quiet()
        }
        Command::Start => {
            engine.start();
            Outcome::quiet()
        }
        Command::Stop => {
            engine.stop();
            Outcome::quiet()
        }
        Command::Set(field, value) => {
            if engine.is_running() {
                return Outcome::say("Stop the countdown before changing the duration");
            }
            match engine.set_field(field, value) {
                Ok(()) => Outcome::say(render_state(&engine.state(), &engine.selection())),
                Err(e) => Outcome::say(e.to_string()),
            }
        }
        Command::Acknowledge(button) => {
            if pending.resolve(button) {
                Outcome::say(render_state(&engine.state(), &engine.selection()))
            } else {
                Outcome::say("No alert to acknowledge")
            }
        }
        Command::Status => Outcome::say(render_state(&engine.state(), &engine.selection())),
        Command::Help => Outcome::say(HELP),
        Command::Quit => Outcome::Quit,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;
    use crate::{
        engine::CompletionNotifier,
        services::{
            AlertButton, AlertPresenter, AudioError, AudioPlayer, ManualScheduler,
            Sound, VibrationPattern, Vibrator,
        },
        state::{DurationSelection, SelectionField},
        ui::ConsoleAlertPresenter,
    };

    #[derive(Default)]
    struct CountingVibrator {
        cancelled: AtomicUsize,
    }

    impl Vibrator for CountingVibrator {
        fn vibrate(&self, _pattern: &VibrationPattern, _repeat: bool) {}

        fn cancel(&self) {
            self.cancelled.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct NoAudio;

    impl AudioPlayer for NoAudio {
        fn load(&self, name: &str) -> Result<Arc<dyn Sound>, AudioError> {
            Err(AudioError::NotFound(name.into()))
        }
    }

    struct Fixture {
        engine: CountdownEngine,
        scheduler: ManualScheduler,
        pending: PendingAlert,
        vibrator: Arc<CountingVibrator>,
    }

    fn fixture(selection: DurationSelection) -> Fixture {
        let scheduler = ManualScheduler::new();
        let pending = PendingAlert::new();
        let vibrator = Arc::new(CountingVibrator::default());
        let presenter: Arc<dyn AlertPresenter> = Arc::new(ConsoleAlertPresenter::new(pending.clone()));
        let notifier = CompletionNotifier::new(
            Arc::clone(&vibrator) as Arc<dyn Vibrator>,
            Arc::new(NoAudio),
            presenter,
        );
        let engine = CountdownEngine::new(selection, Arc::new(scheduler.clone()), notifier);
        Fixture {
            engine,
            scheduler,
            pending,
            vibrator,
        }
    }

    #[test]
    fn toggle_starts_then_stops() {
        let f = fixture(DurationSelection::default());

        assert_eq!(handle_command(&f.engine, &f.pending, Command::Toggle), Outcome::quiet());
        assert!(f.engine.is_running());

        handle_command(&f.engine, &f.pending, Command::Toggle);
        assert!(!f.engine.is_running());
        assert!(f.pending.is_pending());
    }

    #[test]
    fn alert_is_modal_until_acknowledged() {
        let f = fixture(DurationSelection::new(0, 0, 1).unwrap());

        handle_command(&f.engine, &f.pending, Command::Start);
        f.scheduler.fire();
        assert!(f.pending.is_pending());

        let blocked = handle_command(&f.engine, &f.pending, Command::Start);
        assert!(matches!(blocked, Outcome::Continue(Some(ref m)) if m.contains("Acknowledge")));
        assert!(!f.engine.is_running());

        handle_command(&f.engine, &f.pending, Command::Acknowledge(AlertButton::Ok));
        assert!(!f.pending.is_pending());
        assert_eq!(f.vibrator.cancelled.load(Ordering::SeqCst), 1);

        handle_command(&f.engine, &f.pending, Command::Acknowledge(AlertButton::Cancel));
        assert_eq!(f.vibrator.cancelled.load(Ordering::SeqCst), 1);

        handle_command(&f.engine, &f.pending, Command::Start);
        assert!(f.engine.is_running());
    }

    #[test]
    fn selection_changes_only_while_idle() {
        let f = fixture(DurationSelection::default());

        let out = handle_command(&f.engine, &f.pending, Command::Set(SelectionField::Minutes, 2));
        assert_eq!(out, Outcome::say("Set: 0 hr 2 min 10 sec   (Enter to start)"));

        let out = handle_command(&f.engine, &f.pending, Command::Set(SelectionField::Hours, 30));
        assert_eq!(out, Outcome::say("hours must be between 0 and 23, got 30"));

        handle_command(&f.engine, &f.pending, Command::Start);
        let out = handle_command(&f.engine, &f.pending, Command::Set(SelectionField::Seconds, 1));
        assert_eq!(out, Outcome::say("Stop the countdown before changing the duration"));
        assert_eq!(f.engine.selection().seconds(), 10);
    }

    #[test]
    fn acknowledge_without_alert_is_reported() {
        let f = fixture(DurationSelection::default());
        let out = handle_command(&f.engine, &f.pending, Command::Acknowledge(AlertButton::Ok));
        assert_eq!(out, Outcome::say("No alert to acknowledge"));
    }

    #[test]
    fn quit_is_allowed_with_pending_alert() {
        let f = fixture(DurationSelection::default());
        f.engine.stop();
        assert!(f.pending.is_pending());
        assert_eq!(handle_command(&f.engine, &f.pending, Command::Quit), Outcome::Quit);
    }
}
