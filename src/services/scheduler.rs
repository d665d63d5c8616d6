//! Periodic tick scheduling

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tokio::{
    runtime::Handle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Callback invoked on every tick
pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

/// Registers repeating tick callbacks
pub trait TickScheduler: Send + Sync {
    /// Start invoking `on_tick` every `period`, first firing one period from now.
    /// The tick stops when the returned handle is dropped.
    fn schedule(&self, period: Duration, on_tick: TickCallback) -> TickHandle;
}

/// Handle to an active periodic tick; dropping it cancels the tick
pub struct TickHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TickHandle {
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancel the tick now
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Scheduler backed by a tokio interval task per tick source
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    /// Create a scheduler on the current tokio runtime
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            runtime: Handle::try_current()?,
        })
    }
}

impl TickScheduler for TokioScheduler {
    fn schedule(&self, period: Duration, mut on_tick: TickCallback) -> TickHandle {
        let task = self.runtime.spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                on_tick();
            }
        });

        debug!("Scheduled tick every {:?}", period);
        TickHandle::new(move || task.abort())
    }
}

struct ManualSlot {
    id: u64,
    cancelled: Arc<AtomicBool>,
    on_tick: Option<TickCallback>,
}

/// Scheduler whose ticks are fired explicitly by the caller
#[derive(Clone, Default)]
pub struct ManualScheduler {
    slots: Arc<Mutex<Vec<ManualSlot>>>,
    next_id: Arc<AtomicU64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every live tick source once, returning how many were fired
    pub fn fire(&self) -> usize {
        // Callbacks run outside the lock: they may cancel their own handle
        let due: Vec<(u64, Arc<AtomicBool>, TickCallback)> = {
            let mut slots = self.lock_slots();
            slots
                .iter_mut()
                .filter(|slot| !slot.cancelled.load(Ordering::SeqCst))
                .filter_map(|slot| {
                    slot.on_tick
                        .take()
                        .map(|cb| (slot.id, Arc::clone(&slot.cancelled), cb))
                })
                .collect()
        };

        let fired = due.len();
        let mut finished = Vec::with_capacity(fired);
        for (id, cancelled, mut on_tick) in due {
            if !cancelled.load(Ordering::SeqCst) {
                on_tick();
            }
            finished.push((id, on_tick));
        }

        let mut slots = self.lock_slots();
        for (id, on_tick) in finished {
            if let Some(slot) = slots.iter_mut().find(|slot| slot.id == id) {
                slot.on_tick = Some(on_tick);
            }
        }
        slots.retain(|slot| !slot.cancelled.load(Ordering::SeqCst));
        fired
    }

    /// Fire `count` ticks in sequence
    pub fn fire_times(&self, count: usize) {
        for _ in 0..count {
            self.fire();
        }
    }

    /// Number of tick sources that have not been cancelled
    pub fn active(&self) -> usize {
        self.lock_slots()
            .iter()
            .filter(|slot| !slot.cancelled.load(Ordering::SeqCst))
            .count()
    }

    fn lock_slots(&self) -> std::sync::MutexGuard<'_, Vec<ManualSlot>> {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&self, _period: Duration, on_tick: TickCallback) -> TickHandle {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let cancelled = Arc::new(AtomicBool::new(false));

        self.lock_slots().push(ManualSlot {
            id,
            cancelled: Arc::clone(&cancelled),
            on_tick: Some(on_tick),
        });

        TickHandle::new(move || cancelled.store(true, Ordering::SeqCst))
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("active", &self.active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, TickCallback) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, Box::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }))
    }

    #[test]
    fn manual_fire_invokes_live_callbacks() {
        let scheduler = ManualScheduler::new();
        let (count, cb) = counter();
        let _handle = scheduler.schedule(Duration::from_secs(1), cb);

        scheduler.fire_times(3);
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(scheduler.active(), 1);
    }

    #[test]
    fn dropping_handle_cancels_manual_tick() {
        let scheduler = ManualScheduler::new();
        let (count, cb) = counter();
        let handle = scheduler.schedule(Duration::from_secs(1), cb);

        scheduler.fire();
        drop(handle);
        assert_eq!(scheduler.active(), 0);
        assert_eq!(scheduler.fire(), 0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_first_tick_after_one_period() {
        let scheduler = TokioScheduler::new().unwrap();
        let (count, cb) = counter();
        let handle = scheduler.schedule(Duration::from_secs(1), cb);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2600)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        handle.cancel();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }
}
