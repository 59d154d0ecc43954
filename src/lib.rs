//! Core library for `dirsync`.
//!
//! Mirrors a source directory tree into a destination tree in one pass: missing
//! files are created, files whose size or modification time differ are
//! overwritten, and destination-only entries are optionally removed. Symlinks in
//! the source are never copied or followed.
//!
//! ```no_run
//! let report = dirsync::sync_dirs("/data/src", "/backup/dst", true)?;
//! println!("{report}");
//! # Ok::<(), dirsync::SyncError>(())
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod hints;
pub mod mirror;
pub mod output;
pub mod platform;
pub mod shutdown;

pub use config::{
    CONFIG_ENV, Config, FileConfig, LogLevel, config_path, default_config_path, default_log_path,
    ensure_disjoint, load_config_file, load_config_from_xml_path, path_has_symlink_ancestor,
    validate_source_dir,
};
pub use errors::{CopyStep, SyncError};
pub use mirror::{
    EntryKind, EntryMeta, Inventory, SyncAction, SyncOptions, SyncReport, decide, is_stale,
    sync_dirs, sync_dirs_with,
};
