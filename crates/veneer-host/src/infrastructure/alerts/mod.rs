//! The user-visible failure surface.
//!
//! The shell's UI framework presents blocking error dialogs; this core never
//! talks to it directly.  [`AlertSink`] is the seam: the store reports the
//! title and message, the embedding application decides how the box is
//! drawn.  The host binaries install [`LogAlertSink`]; tests install
//! [`mock::RecordingAlertSink`] and assert on what would have been shown.

pub mod mock;

pub use mock::RecordingAlertSink;

use tracing::error;

/// Presents a blocking error box with a title and message.
///
/// Implementations must be safe to call from any task; the call is expected
/// to be fire-and-forget from the store's point of view (the store never
/// waits for the user to dismiss anything).
pub trait AlertSink: Send + Sync {
    fn error_box(&self, title: &str, message: &str);
}

/// Alert sink for headless operation: the dialog becomes an error log line.
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn error_box(&self, title: &str, message: &str) {
        error!(title, "{message}");
    }
}
