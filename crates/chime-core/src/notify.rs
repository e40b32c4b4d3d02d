//! Delivery of due notifications.

use crate::error::{ChimeError, Result};

/// Destination for a due notification.
///
/// The dispatch cycle only needs a delivery attempt per match; implementations
/// decide what delivery means (desktop popup, test recorder, ...).
pub trait NotificationSink {
    fn notify(&self, title: &str, body: &str) -> Result<()>;
}

/// Sink backed by the desktop environment's notification service.
pub struct DesktopSink;

impl NotificationSink for DesktopSink {
    fn notify(&self, title: &str, body: &str) -> Result<()> {
        notify_rust::Notification::new()
            .summary(title)
            .body(body)
            .show()
            .map(|_| ())
            .map_err(|e| ChimeError::Delivery(e.to_string()))
    }
}
