//! Severity vocabulary and the log record value type.
//!
//! A [`LogRecord`] is built once per logging call and never mutated; sinks
//! receive it by reference and serialize or render it as their backend
//! requires.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered severity levels.
///
/// `Any` sorts below every real level so a threshold filter set to `Any`
/// accepts everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Any,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "ANY",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// ANSI escape prefix used by terminal backends.
    pub fn color_code(&self) -> &'static str {
        match self {
            Self::Any => "\x1b[97m",
            Self::Debug => "\x1b[96m",
            Self::Info => "\x1b[92m",
            Self::Warning => "\x1b[93m",
            Self::Error => "\x1b[91m",
            Self::Critical => "\x1b[31m",
        }
    }

    /// Name wrapped in this level's terminal color.
    pub fn colored_name(&self) -> String {
        format!("{}{}\x1b[0m", self.color_code(), self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One emitted log event.
///
/// `timestamp` is monotonic seconds since the owning tree's construction,
/// not wall-clock time. `source` is the full logger path, leading separator
/// included (the root's path is empty, so `app/net` renders as source
/// `/app/net`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub source: String,
    pub timestamp: f64,
    pub level: Level,
    pub message: String,
}

impl LogRecord {
    pub fn new(
        source: impl Into<String>,
        timestamp: f64,
        level: Level,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            timestamp,
            level,
            message: message.into(),
        }
    }

    /// Source path with the leading separator stripped, as human-readable
    /// backends print it.
    pub fn display_source(&self) -> &str {
        self.source.trim_start_matches('/')
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:9.5} [{}] {} ({})",
            self.timestamp,
            self.level,
            self.message,
            self.display_source()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Any < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warning);
        assert!(Level::Warning < Level::Error);
        assert!(Level::Error < Level::Critical);
    }

    #[test]
    fn test_level_names() {
        assert_eq!(Level::Any.as_str(), "ANY");
        assert_eq!(Level::Warning.as_str(), "WARNING");
        assert_eq!(Level::Critical.as_str(), "CRITICAL");
    }

    #[test]
    fn test_colored_name_wraps_with_reset() {
        let painted = Level::Error.colored_name();
        assert!(painted.starts_with("\x1b[91m"));
        assert!(painted.ends_with("\x1b[0m"));
        assert!(painted.contains("ERROR"));
    }

    #[test]
    fn test_record_display_strips_leading_separator() {
        let record = LogRecord::new("/app/net", 1.5, Level::Info, "connected");
        let rendered = record.to_string();
        assert!(rendered.contains("[INFO]"));
        assert!(rendered.contains("connected"));
        assert!(rendered.contains("(app/net)"));
        assert!(!rendered.contains("(/app/net)"));
    }

    #[test]
    fn test_record_serde_round_trip() {
        let record = LogRecord::new("/app", 0.25, Level::Warning, "low disk");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"WARNING\""));
        let back: LogRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
