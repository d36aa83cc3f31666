//! Queue of pending notifications.

use jobdesk_core::notification::Notification;
use std::collections::VecDeque;

/// Notifications raised by view models, drained by the front end.
#[derive(Debug, Default)]
pub struct Notifications {
    queue: VecDeque<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::success(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::error(message));
    }

    pub fn push(&mut self, notification: Notification) {
        self.queue.push_back(notification);
    }

    /// Removes and returns everything queued so far, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
