//! User-facing notification surface.
//!
//! Notifications are fire-and-forget: the engine never inspects a result.
//! The HTTP layer buffers them in a [`NotificationLog`] and drains it into
//! each response; the CLI reports them through `tracing`.

use serde::Serialize;

/// Notification severity, mapped to a toast style by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

/// Sink for user-facing notifications.
pub trait Notifier: Send {
    /// Emit a notification.
    fn notify(&mut self, message: &str, kind: NotificationKind);
}

/// Buffers notifications until the caller drains them.
#[derive(Debug, Default)]
pub struct NotificationLog {
    pending: Vec<Notification>,
}

impl NotificationLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all pending notifications, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    /// Pending notifications, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }
}

impl Notifier for NotificationLog {
    fn notify(&mut self, message: &str, kind: NotificationKind) {
        self.pending.push(Notification {
            message: message.to_owned(),
            kind,
        });
    }
}

/// Reports notifications as `info` log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, message: &str, kind: NotificationKind) {
        tracing::info!(?kind, "{message}");
    }
}
