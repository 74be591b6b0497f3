//! Recording notification sink for engine tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use slotwise_core::scheduling::ports::NotificationSink;
use slotwise_domain::{BookingNotification, Result as DomainResult, SlotwiseError};

/// Records every delivery attempt; optionally fails each one to exercise the
/// swallow-and-continue path.
#[derive(Default, Clone)]
pub struct RecordingNotificationSink {
    attempts: Arc<Mutex<Vec<BookingNotification>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingNotificationSink {
    /// Sink that accepts every notification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that fails every delivery attempt.
    pub fn failing() -> Self {
        let sink = Self::default();
        sink.fail.store(true, Ordering::SeqCst);
        sink
    }

    /// All delivery attempts seen so far, failed ones included.
    pub fn attempts(&self) -> Vec<BookingNotification> {
        self.attempts.lock().expect("mock lock").clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn notify_booked(&self, notification: BookingNotification) -> DomainResult<()> {
        self.attempts.lock().expect("mock lock").push(notification);
        if self.fail.load(Ordering::SeqCst) {
            return Err(SlotwiseError::Network("simulated webhook failure".to_string()));
        }
        Ok(())
    }
}
