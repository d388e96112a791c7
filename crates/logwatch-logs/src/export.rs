use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::buffer::LogBuffer;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no logs to export")]
    Empty,

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Plain-text download of the buffered raw lines
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    /// `logs_<YYYY-MM-DD>.log`
    pub file_name: String,
    /// Raw lines joined by `\n`
    pub contents: String,
    /// Number of exported lines
    pub line_count: usize,
}

impl ExportArtifact {
    /// Snapshot every buffered entry, regardless of search state
    pub fn from_buffer(buffer: &LogBuffer, date: NaiveDate) -> Result<Self, ExportError> {
        let line_count = buffer.len();
        if line_count == 0 {
            return Err(ExportError::Empty);
        }

        Ok(Self {
            file_name: format!("logs_{}.log", date.format("%Y-%m-%d")),
            contents: buffer.export_raw(),
            line_count,
        })
    }

    /// Write the artifact into `dir`, returning the file path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), lines = self.line_count, "logs exported");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logwatch_types::LogEntry;

    fn raw_entry(raw: &str) -> LogEntry {
        LogEntry {
            timestamp: String::new(),
            level: "INFO".to_string(),
            process: "-".to_string(),
            source: "system".to_string(),
            message: raw.to_string(),
            raw: raw.to_string(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 20).unwrap()
    }

    #[test]
    fn test_empty_buffer_is_rejected() {
        let buffer = LogBuffer::new(4);
        assert!(matches!(
            ExportArtifact::from_buffer(&buffer, date()),
            Err(ExportError::Empty)
        ));
    }

    #[test]
    fn test_artifact_contents_and_name() {
        let buffer = LogBuffer::new(4);
        buffer.push(raw_entry("first"));
        buffer.push(raw_entry("second"));

        let artifact = ExportArtifact::from_buffer(&buffer, date()).unwrap();
        assert_eq!(artifact.file_name, "logs_2025-06-20.log");
        assert_eq!(artifact.contents, "first\nsecond");
        assert_eq!(artifact.line_count, 2);
    }

    #[test]
    fn test_write_to_directory() {
        let buffer = LogBuffer::new(4);
        buffer.push(raw_entry("only line"));
        let artifact = ExportArtifact::from_buffer(&buffer, date()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = artifact.write_to(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "only line");
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let buffer = LogBuffer::new(4);
        buffer.push(raw_entry("line"));
        let artifact = ExportArtifact::from_buffer(&buffer, date()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            artifact.write_to(&missing),
            Err(ExportError::Io { .. })
        ));
    }
}
