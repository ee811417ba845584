//! Transient success/error notifications.

use std::cell::RefCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

/// FIFO of notifications waiting to be shown.
#[derive(Debug, Default)]
pub struct Notifications {
    queue: RefCell<Vec<Notification>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(Level::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(Level::Error, message.into());
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }

    fn push(&self, level: Level, message: String) {
        self.queue.borrow_mut().push(Notification { level, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order_and_empties() {
        let notes = Notifications::new();
        notes.success("Got the calories!");
        notes.error("Server error - try again later");

        let drained = notes.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, Level::Success);
        assert_eq!(drained[1].message, "Server error - try again later");
        assert!(notes.drain().is_empty());
    }
}
