//! User-facing notifications ("toasts").
//!
//! The store, the navigation gate and the import/export pipeline only emit
//! semantic events through [`NotificationSink`]. Presentation and dismissal
//! timing belong to [`NotificationCenter`].

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use crate::config::NotificationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    /// Theme color name used to render this kind.
    pub fn color_name(self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.color_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Receiver of notification events.
pub trait NotificationSink {
    fn notify(&mut self, kind: NotificationKind, message: &str);

    fn info(&mut self, message: &str) {
        self.notify(NotificationKind::Info, message);
    }

    fn success(&mut self, message: &str) {
        self.notify(NotificationKind::Success, message);
    }

    fn warning(&mut self, message: &str) {
        self.notify(NotificationKind::Warning, message);
    }

    fn error(&mut self, message: &str) {
        self.notify(NotificationKind::Error, message);
    }
}

/// Collects notifications in order. Used in headless mode and in tests.
impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, kind: NotificationKind, message: &str) {
        self.push(Notification {
            kind,
            message: message.to_string(),
        });
    }
}

struct Toast {
    notification: Notification,
    expires_at: Instant,
}

/// Time-bounded toast queue shown as an overlay by the terminal UI.
pub struct NotificationCenter {
    toasts: VecDeque<Toast>,
    duration: Duration,
    max_visible: usize,
}

impl NotificationCenter {
    pub fn new(duration: Duration, max_visible: usize) -> Self {
        Self {
            toasts: VecDeque::new(),
            duration,
            max_visible: max_visible.max(1),
        }
    }

    pub fn from_config(config: &NotificationConfig) -> Self {
        Self::new(
            Duration::from_millis(config.duration_ms),
            config.max_visible,
        )
    }

    fn push_at(&mut self, kind: NotificationKind, message: &str, now: Instant) {
        self.toasts.push_back(Toast {
            notification: Notification {
                kind,
                message: message.to_string(),
            },
            expires_at: now + self.duration,
        });
        while self.toasts.len() > self.max_visible {
            self.toasts.pop_front();
        }
    }

    /// Drop toasts whose display time has elapsed. Returns true if any were removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.expires_at > now);
        self.toasts.len() != before
    }

    /// Visible toasts, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.toasts.iter().map(|t| &t.notification)
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.toasts.back().map(|t| &t.notification)
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn dismiss_all(&mut self) {
        self.toasts.clear();
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::from_config(&NotificationConfig::default())
    }
}

impl NotificationSink for NotificationCenter {
    fn notify(&mut self, kind: NotificationKind, message: &str) {
        self.push_at(kind, message, Instant::now());
    }
}
