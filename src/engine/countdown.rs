//! Countdown engine
//!
//! Two states, idle and running. `start()` seeds the remaining seconds from
//! the selection and schedules a one-second tick; each tick decrements and
//! publishes. When the count reaches zero the tick handler calls `stop()`,
//! which cancels the tick, restores the idle defaults and runs the
//! [`CompletionNotifier`]. A manual stop goes through the same path and
//! notifies as well.

use std::{
    sync::{Arc, Mutex, MutexGuard, Weak},
    time::Duration,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::CompletionNotifier;
use crate::{
    services::{TickHandle, TickScheduler},
    state::{CountdownState, DurationSelection, SelectionError, SelectionField},
};

/// Interval between two ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

struct Inner {
    state: CountdownState,
    selection: DurationSelection,
    /// Present exactly while running
    ticker: Option<TickHandle>,
    /// Bumped whenever a tick source is created or cancelled
    generation: u64,
}

struct Shared {
    inner: Mutex<Inner>,
    scheduler: Arc<dyn TickScheduler>,
    notifier: CompletionNotifier,
    state_tx: watch::Sender<CountdownState>,
    /// Keep the receiver alive to prevent channel closure
    _state_rx: watch::Receiver<CountdownState>,
}

impl Drop for Shared {
    fn drop(&mut self) {
        let inner = match self.inner.get_mut() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(ticker) = inner.ticker.take() {
            debug!("Countdown engine dropped while running, cancelling tick");
            ticker.cancel();
        }
    }
}

/// The countdown state machine.
///
/// Clones share the same countdown. Tick callbacks only hold a weak
/// reference, so dropping the last clone cancels a running tick.
#[derive(Clone)]
pub struct CountdownEngine {
    shared: Arc<Shared>,
}

/// Handle that does not keep the countdown alive
#[derive(Clone)]
pub struct WeakCountdownEngine {
    shared: Weak<Shared>,
}

impl WeakCountdownEngine {
    pub fn upgrade(&self) -> Option<CountdownEngine> {
        self.shared.upgrade().map(|shared| CountdownEngine { shared })
    }
}

impl CountdownEngine {
    pub fn new(
        selection: DurationSelection,
        scheduler: Arc<dyn TickScheduler>,
        notifier: CompletionNotifier,
    ) -> Self {
        let initial = CountdownState::new();
        let (state_tx, state_rx) = watch::channel(initial);

        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    state: initial,
                    selection,
                    ticker: None,
                    generation: 0,
                }),
                scheduler,
                notifier,
                state_tx,
                _state_rx: state_rx,
            }),
        }
    }

    pub fn downgrade(&self) -> WeakCountdownEngine {
        WeakCountdownEngine {
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Subscribe to countdown state changes
    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.shared.state_tx.subscribe()
    }

    /// Current countdown state
    pub fn state(&self) -> CountdownState {
        self.lock_inner().state
    }

    pub fn is_running(&self) -> bool {
        self.lock_inner().state.is_running
    }

    /// Current duration selection
    pub fn selection(&self) -> DurationSelection {
        self.lock_inner().selection
    }

    pub fn set_selection(&self, selection: DurationSelection) {
        debug!("Selection set to {}", selection);
        self.lock_inner().selection = selection;
    }

    pub fn set_field(&self, field: SelectionField, value: u32) -> Result<(), SelectionError> {
        let mut inner = self.lock_inner();
        inner.selection.set(field, value)?;
        debug!("Selection set to {}", inner.selection);
        Ok(())
    }

    pub fn set_hours(&self, hours: u32) -> Result<(), SelectionError> {
        self.set_field(SelectionField::Hours, hours)
    }

    pub fn set_minutes(&self, minutes: u32) -> Result<(), SelectionError> {
        self.set_field(SelectionField::Minutes, minutes)
    }

    pub fn set_seconds(&self, seconds: u32) -> Result<(), SelectionError> {
        self.set_field(SelectionField::Seconds, seconds)
    }

    /// Number of completion notifications produced so far
    pub fn notifications(&self) -> u64 {
        self.shared.notifier.notifications()
    }

    /// Start counting down from the current selection. No-op while running.
    pub fn start(&self) {
        let reached_zero = {
            let mut inner = self.lock_inner();
            if inner.state.is_running {
                debug!("Countdown already running, ignoring start");
                return;
            }

            let previous = inner.state.remaining_seconds;
            let total = inner.selection.total_seconds();

            inner.generation += 1;
            let generation = inner.generation;
            inner.state = CountdownState::running(total);

            let weak = self.downgrade();
            inner.ticker = Some(self.shared.scheduler.schedule(
                TICK_PERIOD,
                Box::new(move || Self::on_tick(&weak, generation)),
            ));

            info!("Countdown started from {} ({}s)", inner.selection, total);
            self.publish(inner.state);
            previous > 0 && total == 0
        };

        if reached_zero {
            info!("Countdown started at zero, stopping immediately");
            self.stop();
        }
    }

    /// Cancel the tick, restore the idle defaults and notify.
    ///
    /// Valid in both states; the notifier runs even when nothing was running.
    pub fn stop(&self) {
        let ticker = {
            let mut inner = self.lock_inner();
            let ticker = inner.ticker.take();
            if ticker.is_some() {
                inner.generation += 1;
            }
            let remaining = inner.state.remaining_seconds;
            inner.state = CountdownState::new();
            self.publish(inner.state);

            info!("Countdown stopped with {}s remaining", remaining);
            ticker
        };

        if let Some(ticker) = ticker {
            ticker.cancel();
        }

        self.shared.notifier.notify();
    }

    fn on_tick(weak: &WeakCountdownEngine, generation: u64) {
        match weak.upgrade() {
            Some(engine) => engine.tick(generation),
            None => debug!("Tick after countdown engine was dropped"),
        }
    }

    /// Decrement once and stop on the transition into zero
    fn tick(&self, generation: u64) {
        let reached_zero = {
            let mut inner = self.lock_inner();
            if !inner.state.is_running || inner.generation != generation {
                debug!("Ignoring stale tick (generation {})", generation);
                return;
            }

            let previous = inner.state.remaining_seconds;
            inner.state.remaining_seconds = previous.saturating_sub(1);
            debug!("Tick: {}s remaining", inner.state.remaining_seconds);
            self.publish(inner.state);

            previous > 0 && inner.state.remaining_seconds == 0
        };

        if reached_zero {
            self.stop();
        }
    }

    fn publish(&self, state: CountdownState) {
        if let Err(e) = self.shared.state_tx.send(state) {
            warn!("Failed to send countdown update: {}", e);
        }
    }

    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        self.shared.inner.lock().unwrap_or_else(|poisoned| {
            warn!("Countdown state lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
