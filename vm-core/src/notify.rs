//! Short lived toast messages.

use std::time::Duration;

/// How long a toast stays visible.
pub const DISPLAY_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub level: Level,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct Notifications {
    next_id: u64,
    items: Vec<Notification>,
}

impl Notifications {
    /// Adds a toast and returns its id for dismissal.
    pub fn push(&mut self, level: Level, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let message = message.into();
        match level {
            Level::Success => log::info!("{message}"),
            Level::Error => log::warn!("{message}"),
        }
        self.items.push(Notification { id, level, message });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(Level::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(Level::Error, message)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    #[must_use]
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn count(&self, level: Level) -> usize {
        self.items.iter().filter(|n| n.level == level).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_dismiss() {
        let mut toasts = Notifications::default();
        let a = toasts.success("saved");
        let b = toasts.error("failed");
        assert_ne!(a, b);
        assert_eq!(toasts.count(Level::Success), 1);
        toasts.dismiss(a);
        assert_eq!(toasts.items().len(), 1);
        assert_eq!(toasts.items()[0].message, "failed");
        toasts.dismiss(a);
        toasts.dismiss(b);
        assert!(toasts.is_empty());
    }
}
