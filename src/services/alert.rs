//! Modal alert service

use std::{
    fmt,
    sync::{Arc, Mutex},
};
use tracing::{debug, info};

/// A dialog button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertButton {
    Cancel,
    Ok,
}

impl AlertButton {
    pub fn label(self) -> &'static str {
        match self {
            AlertButton::Cancel => "Cancel",
            AlertButton::Ok => "OK",
        }
    }
}

/// Alert shown when the countdown completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionAlert {
    pub title: &'static str,
    pub message: &'static str,
    pub buttons: [AlertButton; 2],
    /// Whether a tap outside the dialog dismisses it
    pub cancelable: bool,
}

impl CompletionAlert {
    pub fn time_is_up() -> Self {
        Self {
            title: "Your time is up!",
            message: "My time is now.",
            buttons: [AlertButton::Cancel, AlertButton::Ok],
            cancelable: false,
        }
    }
}

type AckAction = Box<dyn FnOnce() + Send + 'static>;

/// The single action behind every button of an alert.
///
/// Clones share the action; it runs on the first acknowledgement only.
#[derive(Clone)]
pub struct Acknowledgement {
    action: Arc<Mutex<Option<AckAction>>>,
}

impl Acknowledgement {
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            action: Arc::new(Mutex::new(Some(Box::new(action)))),
        }
    }

    /// Run the action for `button`. Returns false if already acknowledged.
    pub fn acknowledge(&self, button: AlertButton) -> bool {
        let action = self
            .action
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        match action {
            Some(action) => {
                info!("Alert acknowledged with {}", button.label());
                action();
                true
            }
            None => {
                debug!("Alert already acknowledged, ignoring {}", button.label());
                false
            }
        }
    }

    pub fn is_acknowledged(&self) -> bool {
        self.action
            .lock()
            .map(|action| action.is_none())
            .unwrap_or(true)
    }
}

impl fmt::Debug for Acknowledgement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Acknowledgement")
            .field("acknowledged", &self.is_acknowledged())
            .finish()
    }
}

/// Presents modal alerts to the user
pub trait AlertPresenter: Send + Sync {
    /// Show `alert`; every button must end in `ack.acknowledge(button)`
    fn present(&self, alert: CompletionAlert, ack: Acknowledgement);
}
