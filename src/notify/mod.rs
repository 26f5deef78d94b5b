use std::time::{Duration, Instant};

/// How long a notice stays on screen.
pub(crate) const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Level {
    Success,
    Info,
    Error,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "OK"),
            Self::Info => write!(f, "INFO"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Notice {
    pub(crate) level: Level,
    pub(crate) message: String,
    pub(crate) raised_at: Instant,
}

impl Notice {
    pub(crate) fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.raised_at) >= ttl
    }
}

/// Transient user-facing notices, newest last.
#[derive(Debug)]
pub(crate) struct Notifier {
    notices: Vec<Notice>,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(NOTICE_TTL)
    }
}

impl Notifier {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            notices: Vec::new(),
            ttl,
        }
    }

    pub(crate) fn success(&mut self, message: impl Into<String>) {
        self.push(Level::Success, message);
    }

    pub(crate) fn info(&mut self, message: impl Into<String>) {
        self.push(Level::Info, message);
    }

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        self.push(Level::Error, message);
    }

    fn push(&mut self, level: Level, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
            raised_at: Instant::now(),
        });
    }

    /// Drop notices older than the TTL.
    pub(crate) fn expire(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.notices.retain(|n| !n.is_expired(now, ttl));
    }

    /// The most recent notice still on screen.
    pub(crate) fn current(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub(crate) fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Take every pending notice, oldest first. Used by the CLI to print them.
    pub(crate) fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub(crate) fn count(&self, level: Level) -> usize {
        self.notices.iter().filter(|n| n.level == level).count()
    }
}

#[cfg(test)]
mod tests;
