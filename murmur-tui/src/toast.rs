use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
}

/// In-app notification queue. Entries auto-clear after a fixed lifetime.
#[derive(Debug)]
pub struct Toasts {
    entries: Vec<Toast>,
    lifetime: Duration,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Toasts {
    pub fn new() -> Self {
        Self::with_lifetime(Duration::from_secs(4))
    }

    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            entries: Vec::new(),
            lifetime,
        }
    }

    pub fn push(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) {
        self.entries.push(Toast {
            title: title.into(),
            message: message.into(),
            severity,
            shown_at: Instant::now(),
        });
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(title, message, Severity::Success);
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(title, message, Severity::Error);
    }

    /// Drop entries older than the display lifetime.
    pub fn sweep(&mut self) {
        let lifetime = self.lifetime;
        self.entries.retain(|t| t.shown_at.elapsed() < lifetime);
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_returns_most_recent_entry() {
        let mut toasts = Toasts::new();
        toasts.error("Error", "first");
        toasts.success("Success", "second");

        let latest = toasts.latest().unwrap();
        assert_eq!(latest.message, "second");
        assert_eq!(latest.severity, Severity::Success);
        assert_eq!(toasts.len(), 2);
    }

    #[test]
    fn sweep_drops_expired_entries() {
        let mut toasts = Toasts::with_lifetime(Duration::ZERO);
        toasts.error("Error", "gone");
        toasts.sweep();
        assert!(toasts.is_empty());
    }

    #[test]
    fn sweep_keeps_fresh_entries() {
        let mut toasts = Toasts::with_lifetime(Duration::from_secs(60));
        toasts.success("Success", "kept");
        toasts.sweep();
        assert_eq!(toasts.len(), 1);
    }
}
