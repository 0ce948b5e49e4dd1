use crate::domain::model::{Notification, NotificationLevel};
use crate::domain::ports::Notifier;
use std::sync::{Arc, Mutex};

/// Prints notifications to stderr, the way a toast would pop up in a browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Warning => {
                tracing::warn!(operation = %notification.operation, "{}", notification.message);
                eprintln!("⚠️  {}", notification.message);
            }
            NotificationLevel::Error => {
                tracing::error!(operation = %notification.operation, "{}", notification.message);
                eprintln!("❌ {}", notification.message);
            }
        }
    }
}

/// Keeps every notification in memory; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .map(|n| n.message)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        if let Ok(mut log) = self.notifications.lock() {
            log.push(notification.clone());
        }
    }
}
