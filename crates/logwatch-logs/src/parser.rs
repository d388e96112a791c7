use std::fmt::Display;
use std::sync::LazyLock;

use chrono::{DateTime, TimeZone};
use regex::Regex;

use logwatch_types::LogEntry;

/// `2025-06-20 10:11:20 | INFO    24368 | module:function:385 - message`
///
/// Digits and level names are ASCII only, and the message may not carry a
/// carriage return.
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2})\s*\|\s*([A-Za-z0-9_]+)\s+([0-9]+)\s*\|\s*([^:]+:[^:]+:[0-9]+)\s*-\s*([^\r\n]+)$",
    )
    .expect("log line pattern is a valid regex")
});

/// Format used for the ingest timestamp of lines that do not parse
pub const FALLBACK_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Level given to lines that do not parse
pub const FALLBACK_LEVEL: &str = "INFO";

/// Source given to lines that do not parse
pub const FALLBACK_SOURCE: &str = "system";

/// Log parser for extracting structure from raw log lines
pub struct LogParser;

impl LogParser {
    /// Parse a raw log line into a LogEntry
    ///
    /// `received_at` is only used for lines that do not match the structured
    /// format, so the result depends on nothing but the arguments.
    pub fn parse<Tz>(raw: &str, received_at: &DateTime<Tz>) -> LogEntry
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match LINE_PATTERN.captures(raw) {
            Some(caps) => LogEntry {
                timestamp: caps[1].to_string(),
                level: caps[2].trim().to_string(),
                process: caps[3].to_string(),
                source: caps[4].to_string(),
                message: caps[5].to_string(),
                raw: raw.to_string(),
            },
            None => Self::fallback(raw, received_at),
        }
    }

    fn fallback<Tz>(raw: &str, received_at: &DateTime<Tz>) -> LogEntry
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        LogEntry {
            timestamp: received_at.format(FALLBACK_TIMESTAMP_FORMAT).to_string(),
            level: FALLBACK_LEVEL.to_string(),
            process: "-".to_string(),
            source: FALLBACK_SOURCE.to_string(),
            message: raw.to_string(),
            raw: raw.to_string(),
        }
    }
}
