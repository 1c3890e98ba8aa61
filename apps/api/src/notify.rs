use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// Pending notifications beyond this are dropped oldest-first.
const MAX_PENDING: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A transient, user-facing message (the admin UI shows these as toasts).
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Shared queue of notifications raised by panels and sync adapters.
/// Clients drain it via `GET /api/v1/notifications`.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    inner: Arc<Mutex<VecDeque<Notification>>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Success, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Info, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Error, message.into());
    }

    /// Removes and returns every pending notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        let mut queue = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        queue.drain(..).collect()
    }

    /// Returns pending notifications without consuming them.
    #[cfg(test)]
    pub fn pending(&self) -> Vec<Notification> {
        let queue = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        queue.iter().cloned().collect()
    }

    fn push(&self, level: NotificationLevel, message: String) {
        match level {
            NotificationLevel::Error => warn!("Notification: {message}"),
            _ => info!("Notification: {message}"),
        }

        let mut queue = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if queue.len() == MAX_PENDING {
            queue.pop_front();
        }
        queue.push_back(Notification {
            level,
            message,
            at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_queue_in_order() {
        let log = NotificationLog::new();
        log.success("saved");
        log.error("failed");

        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, NotificationLevel::Success);
        assert_eq!(drained[1].message, "failed");
        assert!(log.pending().is_empty());
    }

    #[test]
    fn test_queue_is_bounded() {
        let log = NotificationLog::new();
        for i in 0..(MAX_PENDING + 5) {
            log.info(format!("n{i}"));
        }
        let pending = log.pending();
        assert_eq!(pending.len(), MAX_PENDING);
        assert_eq!(pending[0].message, "n5");
    }

    #[test]
    fn test_clones_share_queue() {
        let log = NotificationLog::new();
        let other = log.clone();
        other.success("from clone");
        assert_eq!(log.pending().len(), 1);
    }
}
