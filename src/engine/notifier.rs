//! Completion notifier: vibration, alert sound and the "time is up" dialog

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tracing::{debug, info, warn};

use crate::services::{
    Acknowledgement, AlertPresenter, AudioError, AudioPlayer, CompletionAlert, Sound,
    VibrationPattern, Vibrator,
};

/// Asset name of the alert sound
pub const ALERT_SOUND: &str = "TimeIsNow.mp3";

/// Produces the end-of-countdown alert
pub struct CompletionNotifier {
    vibrator: Arc<dyn Vibrator>,
    audio: Arc<dyn AudioPlayer>,
    alerts: Arc<dyn AlertPresenter>,
    notifications: AtomicU64,
}

impl CompletionNotifier {
    pub fn new(
        vibrator: Arc<dyn Vibrator>,
        audio: Arc<dyn AudioPlayer>,
        alerts: Arc<dyn AlertPresenter>,
    ) -> Self {
        Self {
            vibrator,
            audio,
            alerts,
            notifications: AtomicU64::new(0),
        }
    }

    /// Vibrate, play the alert sound and present the dialog.
    ///
    /// A sound that fails to load is logged and skipped; the vibration and
    /// the dialog still happen. The vibration starts after the dialog is
    /// presented, since presenting may acknowledge an earlier unanswered
    /// alert and cancel its vibration.
    pub fn notify(&self) {
        let count = self.notifications.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Countdown finished, notifying (#{})", count);

        let sound = match self.audio.load(ALERT_SOUND) {
            Ok(sound) => {
                info!("Loaded sound {}", sound.describe());
                sound.play(Box::new(|result: Result<(), AudioError>| match result {
                    Ok(()) => info!("Successfully finished playing"),
                    Err(e) => warn!("Playback failed: {}", e),
                }));
                Some(sound)
            }
            Err(e) => {
                warn!("Failed to load the sound: {}", e);
                None
            }
        };

        let ack = Self::acknowledgement(Arc::clone(&self.vibrator), sound);
        self.alerts.present(CompletionAlert::time_is_up(), ack.clone());

        if ack.is_acknowledged() {
            debug!("Alert acknowledged while presenting, skipping vibration");
        } else {
            self.vibrator.vibrate(&VibrationPattern::alert(), true);
        }
    }

    /// Number of notifications produced so far
    pub fn notifications(&self) -> u64 {
        self.notifications.load(Ordering::SeqCst)
    }

    fn acknowledgement(vibrator: Arc<dyn Vibrator>, sound: Option<Arc<dyn Sound>>) -> Acknowledgement {
        Acknowledgement::new(move || {
            vibrator.cancel();
            if let Some(sound) = sound {
                sound.stop();
            }
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording service doubles shared by the engine tests

    use std::sync::{atomic::AtomicBool, Mutex};

    use super::*;
    use crate::services::{AlertButton, PlaybackCallback};

    #[derive(Default)]
    pub struct RecordingVibrator {
        pub started: AtomicU64,
        pub cancelled: AtomicU64,
        pub vibrating: AtomicBool,
    }

    impl Vibrator for RecordingVibrator {
        fn vibrate(&self, _pattern: &VibrationPattern, _repeat: bool) {
            self.started.fetch_add(1, Ordering::SeqCst);
            self.vibrating.store(true, Ordering::SeqCst);
        }

        fn cancel(&self) {
            self.cancelled.fetch_add(1, Ordering::SeqCst);
            self.vibrating.store(false, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    pub struct RecordingSound {
        pub played: AtomicU64,
        pub stopped: AtomicU64,
    }

    impl Sound for RecordingSound {
        fn describe(&self) -> String {
            "recording".to_string()
        }

        fn play(&self, on_end: PlaybackCallback) {
            self.played.fetch_add(1, Ordering::SeqCst);
            on_end(Ok(()));
        }

        fn stop(&self) {
            self.stopped.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub struct RecordingAudio {
        pub sound: Arc<RecordingSound>,
        pub available: bool,
        pub loads: AtomicU64,
    }

    impl RecordingAudio {
        pub fn new(available: bool) -> Self {
            Self {
                sound: Arc::new(RecordingSound::default()),
                available,
                loads: AtomicU64::new(0),
            }
        }
    }

    impl AudioPlayer for RecordingAudio {
        fn load(&self, name: &str) -> Result<Arc<dyn Sound>, AudioError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.available {
                Ok(Arc::clone(&self.sound) as Arc<dyn Sound>)
            } else {
                Err(AudioError::NotFound(name.into()))
            }
        }
    }

    #[derive(Default)]
    pub struct RecordingAlerts {
        pub presented: Mutex<Vec<(CompletionAlert, Acknowledgement)>>,
    }

    impl RecordingAlerts {
        pub fn count(&self) -> usize {
            self.presented.lock().unwrap().len()
        }

        pub fn press(&self, index: usize, button: AlertButton) -> bool {
            let ack = self.presented.lock().unwrap()[index].1.clone();
            ack.acknowledge(button)
        }
    }

    impl AlertPresenter for RecordingAlerts {
        fn present(&self, alert: CompletionAlert, ack: Acknowledgement) {
            self.presented.lock().unwrap().push((alert, ack));
        }
    }

    pub struct Doubles {
        pub vibrator: Arc<RecordingVibrator>,
        pub audio: Arc<RecordingAudio>,
        pub alerts: Arc<RecordingAlerts>,
    }

    impl Doubles {
        pub fn new(sound_available: bool) -> Self {
            Self {
                vibrator: Arc::new(RecordingVibrator::default()),
                audio: Arc::new(RecordingAudio::new(sound_available)),
                alerts: Arc::new(RecordingAlerts::default()),
            }
        }

        pub fn notifier(&self) -> CompletionNotifier {
            self.notifier_with(Arc::clone(&self.alerts) as Arc<dyn AlertPresenter>)
        }

        /// Notifier presenting through `alerts` instead of the recorder
        pub fn notifier_with(&self, alerts: Arc<dyn AlertPresenter>) -> CompletionNotifier {
            CompletionNotifier::new(
                Arc::clone(&self.vibrator) as Arc<dyn Vibrator>,
                Arc::clone(&self.audio) as Arc<dyn AudioPlayer>,
                alerts,
            )
        }
    }
}
