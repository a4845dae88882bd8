//! Transient user-facing notifications.
//!
//! Actions like a manual refresh or a failed reload surface a short, leveled
//! notice in the shell. Notices expire on their own after a few seconds;
//! the draw loop just asks for the ones still active.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// How long a notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Visual severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// An action completed.
    Success,
    /// An action failed.
    Error,
    /// Neutral information.
    Info,
}

/// One transient message.
#[derive(Debug, Clone)]
pub struct Notice {
    /// Message text.
    pub message: String,
    /// Severity for styling.
    pub level: NoticeLevel,
    created: Instant,
}

impl Notice {
    fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.created) >= NOTICE_TTL
    }
}

/// Collects notices and expires them lazily.
#[derive(Debug, Default)]
pub struct Notifier {
    notices: Mutex<Vec<Notice>>,
}

impl Notifier {
    /// Creates an empty notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a notice.
    pub fn push(&self, level: NoticeLevel, message: impl Into<String>) {
        self.notices
            .lock()
            .expect("notifier lock poisoned")
            .push(Notice {
                message: message.into(),
                level,
                created: Instant::now(),
            });
    }

    /// Shorthand for a success notice.
    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    /// Shorthand for an error notice.
    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    /// Returns the notices still within their display window, oldest first,
    /// dropping expired ones as a side effect.
    pub fn active(&self) -> Vec<Notice> {
        let now = Instant::now();
        let mut notices = self.notices.lock().expect("notifier lock poisoned");
        notices.retain(|n| !n.expired(now));
        notices.clone()
    }
}
