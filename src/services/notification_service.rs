//! Toast notifications.
//!
//! Every mutation and every failure surfaces exactly one notice. Notices
//! queue up, expire after a display window, and are capped so a burst of
//! failures cannot grow without bound.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a notice stays visible.
const DEFAULT_DISPLAY_WINDOW: Duration = Duration::from_secs(5);

/// Maximum notices kept queued.
const MAX_QUEUE_SIZE: usize = 16;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// A single toast.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    created_at: Instant,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    /// Returns whether the notice has outlived the display window.
    pub fn is_expired(&self, window: Duration) -> bool {
        self.created_at.elapsed() >= window
    }
}

/// Queue of pending toasts.
pub struct NotificationService {
    queue: VecDeque<Notice>,
    display_window: Duration,
}

impl NotificationService {
    /// Creates an empty queue with the default display window.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            display_window: DEFAULT_DISPLAY_WINDOW,
        }
    }

    /// Overrides the display window.
    pub fn set_display_window(&mut self, window: Duration) {
        self.display_window = window;
    }

    /// Pushes a success notice.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    /// Pushes an error notice.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    /// Pushes an informational notice.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.prune();
        self.queue.push_back(Notice::new(level, message));
        while self.queue.len() > MAX_QUEUE_SIZE {
            self.queue.pop_front();
        }
    }

    /// Returns the notice currently shown, if any.
    pub fn current(&mut self) -> Option<&Notice> {
        self.prune();
        self.queue.front()
    }

    /// Dismisses the visible notice.
    pub fn dismiss(&mut self) {
        self.queue.pop_front();
    }

    /// Clears everything.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Number of pending notices, expired ones excluded.
    pub fn pending(&mut self) -> usize {
        self.prune();
        self.queue.len()
    }

    fn prune(&mut self) {
        let window = self.display_window;
        self.queue.retain(|notice| !notice.is_expired(window));
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_queue_in_order() {
        let mut service = NotificationService::new();
        service.success("Bank saved");
        service.error("Could not reach the server");

        assert_eq!(service.pending(), 2);
        let first = service.current().unwrap();
        assert_eq!(first.level, NoticeLevel::Success);
        assert_eq!(first.message, "Bank saved");

        service.dismiss();
        assert_eq!(service.current().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn notices_expire_after_window() {
        let mut service = NotificationService::new();
        service.set_display_window(Duration::from_millis(1));
        service.info("Refreshing");

        std::thread::sleep(Duration::from_millis(10));
        assert!(service.current().is_none());
        assert_eq!(service.pending(), 0);
    }

    #[test]
    fn queue_is_bounded() {
        let mut service = NotificationService::new();
        for i in 0..40 {
            service.error(format!("failure {i}"));
        }
        assert_eq!(service.pending(), MAX_QUEUE_SIZE);
        // Oldest notices were dropped first.
        assert_eq!(service.current().unwrap().message, "failure 24");
    }

    #[test]
    fn dismiss_on_empty_is_harmless() {
        let mut service = NotificationService::new();
        service.dismiss();
        assert!(service.current().is_none());
    }
}
