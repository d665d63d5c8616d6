//! Console modal alert

use std::{
    io::Write,
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::{debug, warn};

use crate::services::{Acknowledgement, AlertButton, AlertPresenter, CompletionAlert};

/// Slot holding the acknowledgement of the alert on screen, if any
#[derive(Debug, Clone, Default)]
pub struct PendingAlert {
    slot: Arc<Mutex<Option<Acknowledgement>>>,
}

impl PendingAlert {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.lock_slot().is_some()
    }

    /// Press `button` on the pending alert. Returns false if none is shown.
    pub fn resolve(&self, button: AlertButton) -> bool {
        let ack = self.lock_slot().take();
        match ack {
            Some(ack) => {
                ack.acknowledge(button);
                true
            }
            None => false,
        }
    }

    fn park(&self, ack: Acknowledgement) {
        let previous = self.lock_slot().replace(ack);
        if let Some(previous) = previous {
            // A new alert replaces an unanswered one; silence the old one
            debug!("Replacing unanswered alert");
            previous.acknowledge(AlertButton::Cancel);
        }
    }

    fn lock_slot(&self) -> MutexGuard<'_, Option<Acknowledgement>> {
        self.slot.lock().unwrap_or_else(|poisoned| {
            warn!("Pending alert lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

/// Prints alerts as a boxed dialog and waits for `ok` or `cancel`
#[derive(Debug, Clone)]
pub struct ConsoleAlertPresenter {
    pending: PendingAlert,
}

impl ConsoleAlertPresenter {
    pub fn new(pending: PendingAlert) -> Self {
        Self { pending }
    }
}

impl AlertPresenter for ConsoleAlertPresenter {
    fn present(&self, alert: CompletionAlert, ack: Acknowledgement) {
        self.pending.park(ack);

        let buttons = alert
            .buttons
            .iter()
            .map(|b| format!("[{}]", b.label()))
            .collect::<Vec<_>>()
            .join("  ");
        let width = alert
            .title
            .len()
            .max(alert.message.len())
            .max(buttons.len())
            + 4;

        let mut out = std::io::stdout();
        let _ = writeln!(out, "+{}+", "-".repeat(width));
        for line in [alert.title, "", alert.message, "", buttons.as_str()] {
            let _ = writeln!(out, "|  {:<w$}|", line, w = width - 2);
        }
        let _ = writeln!(out, "+{}+", "-".repeat(width));
        let _ = out.flush();
    }
}
