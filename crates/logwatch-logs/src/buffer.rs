use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;

use logwatch_types::{LogEntry, LogLevel};

/// Default number of entries kept in memory
pub const DEFAULT_MAX_LOGS: usize = 1000;

/// What a push did to the buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PushOutcome {
    /// The entry was appended and nothing was evicted
    Appended,
    /// The buffer overflowed and the oldest entries were dropped
    Truncated { evicted: usize },
}

/// Bounded, thread-safe log buffer
///
/// Clones share the same storage. Mutation is crate-private: only the
/// ingestion path in [`crate::LogStream`] writes, everything else reads.
#[derive(Clone)]
pub struct LogBuffer {
    /// Internal storage, oldest first
    entries: Arc<RwLock<VecDeque<LogEntry>>>,

    /// Maximum capacity
    capacity: usize,
}

impl LogBuffer {
    /// Create a new log buffer with the given capacity (at least one entry)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Push a new entry, evicting the oldest ones if over capacity
    pub(crate) fn push(&self, entry: LogEntry) -> PushOutcome {
        let mut entries = self.entries.write();
        entries.push_back(entry);

        let evicted = entries.len().saturating_sub(self.capacity);
        if evicted == 0 {
            return PushOutcome::Appended;
        }
        entries.drain(..evicted);
        PushOutcome::Truncated { evicted }
    }

    /// Replace the whole content, keeping only the newest `capacity` entries.
    /// Returns how many entries were dropped to fit.
    pub(crate) fn replace<I>(&self, new_entries: I) -> usize
    where
        I: IntoIterator<Item = LogEntry>,
    {
        let mut fresh: VecDeque<LogEntry> = new_entries.into_iter().collect();
        let dropped = fresh.len().saturating_sub(self.capacity);
        fresh.drain(..dropped);

        *self.entries.write() = fresh;
        dropped
    }

    /// Clear all entries
    pub(crate) fn clear(&self) {
        self.entries.write().clear();
    }

    /// Get all entries (cloned for rendering)
    pub fn all(&self) -> Vec<LogEntry> {
        self.entries.read().iter().cloned().collect()
    }

    /// Get entry at position (0 = oldest)
    pub fn get(&self, index: usize) -> Option<LogEntry> {
        self.entries.read().get(index).cloned()
    }

    /// Get entry count per log level
    pub fn level_counts(&self) -> LevelCounts {
        let entries = self.entries.read();
        let mut counts = LevelCounts::default();

        for entry in entries.iter() {
            match entry.severity() {
                LogLevel::Trace => counts.trace += 1,
                LogLevel::Debug => counts.debug += 1,
                LogLevel::Info => counts.info += 1,
                LogLevel::Success => counts.success += 1,
                LogLevel::Warn => counts.warn += 1,
                LogLevel::Error => counts.error += 1,
                LogLevel::Fatal => counts.fatal += 1,
                LogLevel::Unknown => counts.unknown += 1,
            }
        }

        counts
    }

    /// Total entry count
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Maximum number of retained entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Export all entries as raw lines
    pub fn export_raw(&self) -> String {
        self.entries
            .read()
            .iter()
            .map(|e| e.raw.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LOGS)
    }
}

/// Counts per log level
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelCounts {
    pub trace: usize,
    pub debug: usize,
    pub info: usize,
    pub success: usize,
    pub warn: usize,
    pub error: usize,
    pub fatal: usize,
    pub unknown: usize,
}

impl LevelCounts {
    pub fn total(&self) -> usize {
        self.trace
            + self.debug
            + self.info
            + self.success
            + self.warn
            + self.error
            + self.fatal
            + self.unknown
    }
}
