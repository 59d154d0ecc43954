//! Core configuration types.
//! - Config holds one run's settings: the two trees plus behaviour and logging knobs.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::mirror::SyncOptions;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Copies, updates, deletions and the final summary (default)
    #[default]
    Normal,
    /// Also directory creation and skipped entries
    Info,
    /// Everything, including per-file metadata steps
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for one sync run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Tree to mirror from
    pub src_dir: PathBuf,
    /// Tree to mirror into (created if missing)
    pub dst_dir: PathBuf,
    /// Remove destination-only entries
    pub delete_missing: bool,
    /// If true, log actions but do not modify the filesystem
    pub dry_run: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Construct a Config for `src` -> `dst`; other fields use defaults.
    pub fn new(src_dir: impl Into<PathBuf>, dst_dir: impl Into<PathBuf>) -> Self {
        Self {
            src_dir: src_dir.into(),
            dst_dir: dst_dir.into(),
            ..Default::default()
        }
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            delete_missing: self.delete_missing,
            dry_run: self.dry_run,
        }
    }
}
