//! Desktop notification banner via notify-rust.

use notify_rust::{Notification, Timeout};
use tracing::{debug, warn};

use crate::alert::AlertStatus;

pub struct Notifier {
    enabled: bool,
}

impl Notifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Post one banner. Failures are logged and otherwise ignored.
    pub fn notify(&self, status: AlertStatus, summary: &str, body: &str, timeout_ms: u32) {
        if !self.enabled {
            return;
        }

        debug!("Notification: {summary}");

        let icon = match status {
            AlertStatus::Success => "dialog-information",
            AlertStatus::Error => "dialog-error",
        };

        if let Err(e) = Notification::new()
            .appname("notebook-alert")
            .summary(summary)
            .body(body)
            .icon(icon)
            .timeout(Timeout::Milliseconds(timeout_ms))
            .show()
        {
            warn!("Failed to show notification: {e}");
        }
    }
}
