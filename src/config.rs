//! Command-line arguments layered over an optional TOML file

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use logwatch_client::{DEFAULT_INFO_INTERVAL, MAX_TAIL};
use logwatch_logs::{DEFAULT_MAX_LOGS, DEFAULT_TAIL};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// logwatch - tail, follow and search a remote application log
#[derive(Parser, Debug, Default)]
#[command(name = "logwatch")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Base URL of the server exposing /api/log
    #[arg(value_name = "BASE_URL")]
    pub base_url: Option<String>,

    /// Number of lines fetched on load and refresh
    #[arg(long)]
    pub tail: Option<usize>,

    /// Maximum number of log entries kept in memory
    #[arg(long)]
    pub max_logs: Option<usize>,

    /// Seconds between log file info refreshes
    #[arg(long, value_name = "SECS")]
    pub info_interval: Option<u64>,

    /// Directory exported log files are written to
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// TOML file with default settings
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start the live view right after loading
    #[arg(long)]
    pub follow: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Settings read from the `--config` file; every key is optional
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub tail: Option<usize>,
    pub max_logs: Option<usize>,
    pub info_interval: Option<u64>,
    pub export_dir: Option<PathBuf>,
    pub follow: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }
}

/// Effective settings: CLI over file over defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub tail: usize,
    pub max_logs: usize,
    pub info_interval: Duration,
    pub export_dir: PathBuf,
    pub follow: bool,
    pub debug: bool,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Resolve the settings, reading `--config` when given
    pub fn load(args: Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(args, file))
    }

    pub fn merge(args: Args, file: FileConfig) -> Self {
        let tail = args.tail.or(file.tail).unwrap_or(DEFAULT_TAIL);
        let max_logs = args.max_logs.or(file.max_logs).unwrap_or(DEFAULT_MAX_LOGS);
        let info_interval = args
            .info_interval
            .or(file.info_interval)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_INFO_INTERVAL);

        Self {
            base_url: args
                .base_url
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            tail: tail.clamp(1, MAX_TAIL),
            max_logs: max_logs.max(1),
            info_interval,
            export_dir: args
                .export_dir
                .or(file.export_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            follow: args.follow || file.follow.unwrap_or(false),
            debug: args.debug,
            log_file: args.log_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::merge(Args::default(), FileConfig::default());
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.tail, 50);
        assert_eq!(settings.max_logs, 1000);
        assert_eq!(settings.info_interval, Duration::from_secs(30));
        assert_eq!(settings.export_dir, PathBuf::from("."));
        assert!(!settings.follow);
    }

    #[test]
    fn test_cli_wins_over_file() {
        let args = Args::parse_from(["logwatch", "http://cli:1", "--tail", "10"]);
        let file = FileConfig {
            base_url: Some("http://file:2".to_string()),
            tail: Some(20),
            max_logs: Some(300),
            follow: Some(true),
            ..FileConfig::default()
        };

        let settings = Settings::merge(args, file);
        assert_eq!(settings.base_url, "http://cli:1");
        assert_eq!(settings.tail, 10);
        assert_eq!(settings.max_logs, 300);
        assert!(settings.follow);
    }

    #[test]
    fn test_limits_are_clamped() {
        let args = Args::parse_from(["logwatch", "--tail", "999999", "--max-logs", "0"]);
        let settings = Settings::merge(args, FileConfig::default());
        assert_eq!(settings.tail, MAX_TAIL);
        assert_eq!(settings.max_logs, 1);
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logwatch.toml");
        std::fs::write(
            &path,
            "base_url = \"https://admin.example.com\"\ninfo_interval = 5\nexport_dir = \"/tmp/exports\"\n",
        )
        .unwrap();

        let args = Args::parse_from(["logwatch", "--config", path.to_str().unwrap()]);
        let settings = Settings::load(args).unwrap();
        assert_eq!(settings.base_url, "https://admin.example.com");
        assert_eq!(settings.info_interval, Duration::from_secs(5));
        assert_eq!(settings.export_dir, PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_unknown_config_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "colour = \"red\"\n").unwrap();
        assert!(FileConfig::load(&path).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let args = Args::parse_from(["logwatch", "--config", "/nonexistent/logwatch.toml"]);
        assert!(Settings::load(args).is_err());
    }
}
