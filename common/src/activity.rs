use serde::{Deserialize, Serialize};

/// Entries kept per screen; older ones fall off the end.
pub const ACTIVITY_LOG_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    pub fn css_class(&self) -> &'static str {
        match self {
            Level::Info => "log-info",
            Level::Success => "log-success",
            Level::Warning => "log-warning",
            Level::Error => "log-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: String,
    pub level: Level,
    pub message: String,
}

/// Timestamped operator-facing log of one screen, newest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    pub fn push(&mut self, timestamp: impl Into<String>, level: Level, message: impl Into<String>) {
        self.entries.insert(
            0,
            ActivityEntry {
                timestamp: timestamp.into(),
                level,
                message: message.into(),
            },
        );
        self.entries.truncate(ACTIVITY_LOG_CAPACITY);
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_and_bounded() {
        let mut log = ActivityLog::default();
        for i in 0..(ACTIVITY_LOG_CAPACITY + 5) {
            log.push(format!("t{i}"), Level::Info, format!("m{i}"));
        }
        assert_eq!(log.entries().len(), ACTIVITY_LOG_CAPACITY);
        assert_eq!(log.entries()[0].message, format!("m{}", ACTIVITY_LOG_CAPACITY + 4));
    }
}
