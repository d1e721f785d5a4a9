//! Recording alert sink for tests.

use std::sync::Mutex;

use super::AlertSink;

/// One alert the store attempted to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAlert {
    pub title: String,
    pub message: String,
}

/// Records every alert instead of presenting it, so tests can assert on the
/// exact dialogs the failure policy produced.
#[derive(Debug, Default)]
pub struct RecordingAlertSink {
    alerts: Mutex<Vec<RecordedAlert>>,
}

impl RecordingAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every alert recorded so far, oldest first.
    pub fn recorded(&self) -> Vec<RecordedAlert> {
        self.alerts.lock().expect("alert lock").clone()
    }

    pub fn count(&self) -> usize {
        self.alerts.lock().expect("alert lock").len()
    }
}

impl AlertSink for RecordingAlertSink {
    fn error_box(&self, title: &str, message: &str) {
        self.alerts.lock().expect("alert lock").push(RecordedAlert {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}
