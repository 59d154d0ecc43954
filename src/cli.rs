//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Long flags may be spelled with a single dash (`-src=DIR`, `-delete-missing`)
//!   as well as `--src DIR`; single-dash spellings are rewritten before clap sees them.
//! - `-delete-missing` accepts an optional `=true|false` value.
//! - --debug is a shorthand for --log-level debug.

use clap::{ArgAction, Parser, ValueHint};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Usage line printed when the two trees are not given.
pub const USAGE_HINT: &str =
    "Usage: dirsync -src=<source_folder> -dst=<destination_folder> [-delete-missing]";

/// Long flags that may be written with a single leading dash.
const LONG_FLAGS: &[&str] = &[
    "src",
    "dst",
    "delete-missing",
    "dry-run",
    "debug",
    "log-level",
    "log-file",
    "json",
    "print-config",
    "help",
    "version",
];

/// Mirror a source directory tree into a destination tree.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Mirror a source folder into a destination folder")]
pub struct Args {
    /// Source folder path.
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath, required_unless_present = "print_config")]
    pub src: Option<String>,

    /// Destination folder path (created if missing).
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath, required_unless_present = "print_config")]
    pub dst: Option<String>,

    /// Delete files in destination that don't exist in source.
    /// Unset means "use the config file value".
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub delete_missing: Option<bool>,

    /// Dry-run: log actions but do not modify the filesystem.
    #[arg(long, help = "Show what would be done, but do not modify files/directories")]
    pub dry_run: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, value_parser = clap::value_parser!(LogLevel), help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<LogLevel>,

    /// Also append logs to this file.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print the config file location used by dirsync (or DIRSYNC_CONFIG if set), then exit.
    #[arg(long, help = "Print the config file location used by dirsync and exit")]
    pub print_config: bool,
}

impl Args {
    /// Source and destination, if both were given and non-empty.
    pub fn trees(&self) -> Option<(PathBuf, PathBuf)> {
        let src = self.src.as_deref().filter(|s| !s.is_empty())?;
        let dst = self.dst.as_deref().filter(|s| !s.is_empty())?;
        Some((PathBuf::from(src), PathBuf::from(dst)))
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    /// An explicit `-delete-missing=false` switches off a config file's `true`.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some((src, dst)) = self.trees() {
            cfg.src_dir = src;
            cfg.dst_dir = dst;
        }
        if let Some(delete) = self.delete_missing {
            cfg.delete_missing = delete;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
    }
}

/// Rewrite `-flag[=v]` to `--flag[=v]` for known long flags. Stops at `--`.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;
    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }
        let rewritten = arg.to_str().and_then(|s| {
            let body = s.strip_prefix('-').filter(|b| !b.starts_with('-'))?;
            let name = body.split_once('=').map_or(body, |(n, _)| n);
            LONG_FLAGS.contains(&name).then(|| OsString::from(format!("-{s}")))
        });
        if arg == "--" {
            passthrough = true;
        }
        out.push(rewritten.unwrap_or(arg));
    }
    out
}

pub fn parse() -> Args {
    Args::parse_from(normalize_args(std::env::args_os()))
}
