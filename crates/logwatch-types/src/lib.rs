//! Shared types for logwatch
//!
//! This crate contains data structures used across multiple logwatch crates.

use ratatui::style::Color;
use serde::Deserialize;

// ============================================================================
// Log Types
// ============================================================================

/// Log severity level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Success,
    Warn,
    Error,
    Fatal,
    Unknown,
}

impl LogLevel {
    /// Parse log level from common formats
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "trace" | "trc" => Self::Trace,
            "debug" | "dbg" => Self::Debug,
            "info" | "inf" | "information" => Self::Info,
            "success" => Self::Success,
            "warn" | "warning" | "wrn" => Self::Warn,
            "error" | "err" | "exception" => Self::Error,
            "fatal" | "critical" | "crit" => Self::Fatal,
            _ => Self::Unknown,
        }
    }

    /// Get display color for this level
    pub fn color(&self) -> Color {
        match self {
            Self::Trace => Color::DarkGray,
            Self::Debug => Color::Cyan,
            Self::Info => Color::Blue,
            Self::Success => Color::Green,
            Self::Warn => Color::Yellow,
            Self::Error => Color::Red,
            Self::Fatal => Color::Magenta,
            Self::Unknown => Color::White,
        }
    }
}

/// A single parsed log record
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Display timestamp (verbatim from the line, or the local ingest time)
    pub timestamp: String,

    /// Severity token as written in the line
    pub level: String,

    /// Originating process id
    pub process: String,

    /// `module:function:line` locator
    pub source: String,

    /// Free-text payload
    pub message: String,

    /// Original raw log line
    pub raw: String,
}

impl LogEntry {
    /// Uppercased level token used to pick the level style
    pub fn level_class(&self) -> String {
        self.level.to_uppercase()
    }

    /// Typed severity derived from the level token
    pub fn severity(&self) -> LogLevel {
        LogLevel::from_str(&self.level)
    }
}

// ============================================================================
// API Types
// ============================================================================

/// Log file metadata returned by `GET /api/log/info`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LogInfo {
    pub file_exists: bool,
    pub file_size: u64,
    pub total_lines: u64,
    #[serde(default)]
    pub file_path: Option<String>,
}

/// One event delivered by the `GET /api/log/watch` push channel
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WatchEvent {
    /// Channel is ready
    Connected {
        #[serde(default)]
        message: Option<String>,
    },
    /// Replay of lines the bulk fetch already covers
    History {
        #[serde(default)]
        content: Option<String>,
    },
    /// A freshly appended raw line
    Log { content: String },
    /// Liveness signal. Its payload (a number or a date string, depending
    /// on the server) is not used.
    Heartbeat {},
    /// Server-side watch failure
    Error {
        #[serde(default)]
        message: Option<String>,
    },
    /// Any event type this client does not know about
    #[serde(other)]
    Unknown,
}

/// Live channel connection state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Never started, or stopped by the user
    #[default]
    Idle,
    /// Request sent, waiting for the response
    Connecting,
    /// Receiving events
    Connected,
    /// Transport failed; restart is manual
    Disconnected,
}

impl ConnectionState {
    /// Status indicator label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "offline",
            Self::Connecting => "connecting",
            Self::Connected => "live",
            Self::Disconnected => "disconnected",
        }
    }

    /// Status indicator color
    pub fn color(&self) -> Color {
        match self {
            Self::Idle => Color::DarkGray,
            Self::Connecting => Color::Yellow,
            Self::Connected => Color::Green,
            Self::Disconnected => Color::Red,
        }
    }
}
