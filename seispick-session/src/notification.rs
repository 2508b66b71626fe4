//! Transient user notifications.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use log::{info, warn};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Error => write!(f, "error"),
            NotificationKind::Warning => write!(f, "warning"),
            NotificationKind::Info => write!(f, "info"),
        }
    }
}

/// One dismissible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub duration: Duration,
}

/// Queue of notifications waiting to be shown.
#[derive(Debug, Clone)]
pub struct Notifications {
    queue: VecDeque<Notification>,
    next_id: u64,
    default_duration: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(Duration::from_millis(5000))
    }
}

impl Notifications {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            next_id: 1,
            default_duration,
        }
    }

    /// Queues a message with the default duration and returns its id.
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        self.push_for(kind, message, self.default_duration)
    }

    /// Queues a message with an explicit duration.
    pub fn push_for(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        duration: Duration,
    ) -> u64 {
        let message = message.into();
        match kind {
            NotificationKind::Error | NotificationKind::Warning => warn!("{kind}: {message}"),
            NotificationKind::Success | NotificationKind::Info => info!("{kind}: {message}"),
        }
        let id = self.next_id;
        self.next_id += 1;
        self.queue.push_back(Notification {
            id,
            kind,
            message,
            duration,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationKind::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationKind::Error, message)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationKind::Warning, message)
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationKind::Info, message)
    }

    /// Removes one notification; `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.queue.len();
        self.queue.retain(|n| n.id != id);
        self.queue.len() != before
    }

    /// Takes every queued notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.queue.back()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
