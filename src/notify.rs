//! Fire-and-forget user notifications (the "toast" channel).
//!
//! Both game cores push short messages here; the host UI drains and shows them.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyLevel {
    Success,
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotifyLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NotifyLevel::Success, message: message.into() }
    }
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NotifyLevel::Info, message: message.into() }
    }
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NotifyLevel::Error, message: message.into() }
    }
}

/// Consumer of notifications. No acknowledgement flows back to the producer.
pub trait NotificationSink {
    fn notify(&mut self, note: Notification);
}

/// In-memory queue the host drains once per render.
#[derive(Debug, Default)]
pub struct NotificationLog {
    pending: Vec<Notification>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}

impl NotificationSink for NotificationLog {
    fn notify(&mut self, note: Notification) {
        tracing::debug!(level = ?note.level, message = %note.message, "notification");
        self.pending.push(note);
    }
}

impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, note: Notification) {
        self.push(note);
    }
}
