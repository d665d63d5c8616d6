//! Vibration service

use std::{
    io::Write,
    sync::Mutex,
    time::Duration,
};
use tokio::{runtime::Handle, task::JoinHandle, time::sleep};
use tracing::{debug, info, warn};

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Alternating off/on segments, starting with an "off" wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VibrationPattern {
    segments: Vec<Duration>,
}

impl VibrationPattern {
    pub fn new(segments: Vec<Duration>) -> Self {
        Self { segments }
    }

    /// Pattern used when the countdown completes
    pub fn alert() -> Self {
        Self::new(vec![ONE_SECOND, ONE_SECOND, ONE_SECOND])
    }

    pub fn segments(&self) -> &[Duration] {
        &self.segments
    }

    /// Iterate over `(duration, vibrating)` pairs
    pub fn steps(&self) -> impl Iterator<Item = (Duration, bool)> + '_ {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, d)| (*d, i % 2 == 1))
    }
}

/// Device vibration
pub trait Vibrator: Send + Sync {
    /// Start vibrating with `pattern`, looping it while `repeat` is set
    fn vibrate(&self, pattern: &VibrationPattern, repeat: bool);

    /// Stop any running pattern. Safe to call when nothing is vibrating.
    fn cancel(&self);
}

/// Vibrator that prints a buzz line for each "on" segment
#[derive(Debug)]
pub struct TerminalVibrator {
    runtime: Handle,
    active: Mutex<Option<JoinHandle<()>>>,
}

impl TerminalVibrator {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            runtime: Handle::try_current()?,
            active: Mutex::new(None),
        })
    }

    fn take_active(&self) -> Option<JoinHandle<()>> {
        match self.active.lock() {
            Ok(mut active) => active.take(),
            Err(poisoned) => {
                warn!("Vibration state lock poisoned, recovering");
                poisoned.into_inner().take()
            }
        }
    }
}

impl Vibrator for TerminalVibrator {
    fn vibrate(&self, pattern: &VibrationPattern, repeat: bool) {
        if let Some(previous) = self.take_active() {
            previous.abort();
        }

        let pattern = pattern.clone();
        let task = self.runtime.spawn(async move {
            loop {
                for (duration, vibrating) in pattern.steps() {
                    if vibrating {
                        let mut out = std::io::stdout();
                        let _ = writeln!(out, "  ~ bzzz ~");
                        let _ = out.flush();
                    }
                    sleep(duration).await;
                }
                if !repeat || pattern.segments().is_empty() {
                    break;
                }
            }
        });

        info!("Vibration started (repeat={})", repeat);
        match self.active.lock() {
            Ok(mut active) => *active = Some(task),
            Err(poisoned) => *poisoned.into_inner() = Some(task),
        }
    }

    fn cancel(&self) {
        match self.take_active() {
            Some(task) => {
                task.abort();
                info!("Vibration cancelled");
            }
            None => debug!("No vibration to cancel"),
        }
    }
}
