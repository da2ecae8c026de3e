//! Fire-and-forget user alerts.
//!
//! Components that cannot surface errors to their caller (the audio thread,
//! search workers) raise an [`Alert`]; the UI shows the most recent one.

use std::sync::mpsc::Sender;

use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

pub trait Notifier {
    fn notify(&self, alert: Alert);
}

/// Forwards alerts to the UI thread.
#[derive(Clone)]
pub struct ChannelNotifier {
    tx: Sender<Alert>,
}

impl ChannelNotifier {
    pub fn new(tx: Sender<Alert>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, alert: Alert) {
        if self.tx.send(alert).is_err() {
            debug!("alert dropped, UI is gone");
        }
    }
}
