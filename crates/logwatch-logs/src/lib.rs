//! Log processing for logwatch
//!
//! This crate provides the log viewer component: line parsing, the bounded
//! buffer, pure rendering, search with highlighting, auto-scroll state and
//! export.

mod buffer;
mod export;
mod info;
mod log_stream;
mod parser;
mod render;
mod scroll;
mod search;

pub use buffer::{DEFAULT_MAX_LOGS, LevelCounts, LogBuffer, PushOutcome};
pub use export::{ExportArtifact, ExportError};
pub use info::format_file_size;
pub use log_stream::{DEFAULT_TAIL, LogStream, LogStreamConfig, ScrollTarget};
pub use parser::LogParser;
pub use render::{
    Column, LogView, RenderOp, RenderedOutput, RenderedRow, ViewStatus, render, render_row,
    render_rows,
};
pub use scroll::ScrollState;
pub use search::{MIN_LIVE_QUERY_CHARS, SearchState, SearchSummary, fold};

// Re-export types used in our public API
pub use logwatch_types::{ConnectionState, LogEntry, LogInfo, LogLevel, WatchEvent};
